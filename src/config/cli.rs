use crate::config::{ResolvedConfig, TomlConfig};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "phone-import")]
#[command(about = "Import phone number batches from spreadsheets into the analytics backend")]
pub struct CliConfig {
    /// Input file: .xlsx, .xls, .csv or .txt
    #[arg(long, short = 'f')]
    pub file: String,

    /// Batch name shown in the backend; defaults to an "Import <date>" name
    #[arg(long)]
    pub batch_name: Option<String>,

    /// 0-based column to extract from, overriding detection
    #[arg(long)]
    pub column: Option<usize>,

    /// Backend API base URL; endpoint paths are appended to it
    #[arg(long, default_value = "http://localhost:8080/api")]
    pub api_base: String,

    /// Optional TOML file with per-endpoint overrides
    #[arg(long)]
    pub config: Option<String>,

    /// Parse, detect and preview only; submit nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Operator-supplied batch name, or a timestamped default.
    pub fn batch_name_or_default(&self) -> String {
        match &self.batch_name {
            Some(name) => name.clone(),
            None => format!("Import {}", chrono::Local::now().format("%Y-%m-%d %H:%M")),
        }
    }

    /// Merges CLI flags with the optional TOML file into the endpoint set
    /// the pipeline uses. File values override the base-derived defaults.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let mut resolved = ResolvedConfig::from_api_base(&self.api_base);
        if let Some(path) = &self.config {
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            resolved.apply_file(&file);
        }
        resolved.validate()?;
        Ok(resolved)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("file", &self.file)?;
        validate_url("api_base", &self.api_base)?;
        if let Some(name) = &self.batch_name {
            validate_non_empty_string("batch_name", name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            file: "leads.csv".to_string(),
            batch_name: Some("May leads".to_string()),
            column: None,
            api_base: "https://backend.example.com/api".to_string(),
            config: None,
            dry_run: false,
            verbose: false,
        }
    }

    #[test]
    fn valid_config_resolves_endpoints() {
        let config = base_config();
        assert!(config.validate().is_ok());
        let resolved = config.resolve().unwrap();
        assert_eq!(
            resolved.create_batch_url,
            "https://backend.example.com/api/create_batch"
        );
    }

    #[test]
    fn whitespace_batch_name_fails_validation() {
        let mut config = base_config();
        config.batch_name = Some("   ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_batch_name_gets_a_timestamped_default() {
        let mut config = base_config();
        config.batch_name = None;
        let name = config.batch_name_or_default();
        assert!(name.starts_with("Import "));
    }

    #[test]
    fn bad_api_base_fails_validation() {
        let mut config = base_config();
        config.api_base = "not-a-url".to_string();
        assert!(config.validate().is_err());
    }
}
