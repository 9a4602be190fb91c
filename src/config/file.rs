use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional on-disk configuration for backend endpoints. Values set here
/// override the CLI-derived defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub create_batch_url: Option<String>,
    pub trigger_worker_url: Option<String>,
    pub list_batches_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ImportError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ImportError::InvalidConfigValueError {
            field: "toml_parsing".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with environment values; unknown
    /// variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("env placeholder regex");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.api.create_batch_url {
            validate_url("api.create_batch_url", url)?;
        }
        if let Some(url) = &self.api.trigger_worker_url {
            validate_url("api.trigger_worker_url", url)?;
        }
        if let Some(url) = &self.api.list_batches_url {
            validate_url("api.list_batches_url", url)?;
        }
        if let Some(timeout) = self.api.timeout_seconds {
            validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}
