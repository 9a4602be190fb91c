#[cfg(feature = "cli")]
pub mod cli;
pub mod file;
pub mod storage;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use file::TomlConfig;
pub use storage::LocalStorage;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Final endpoint set handed to the pipeline. Starts from the API base URL
/// and takes per-endpoint overrides from the optional TOML file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub create_batch_url: String,
    pub trigger_worker_url: String,
    pub list_batches_url: String,
    pub timeout_seconds: u64,
}

impl ResolvedConfig {
    pub fn from_api_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            create_batch_url: format!("{}/create_batch", base),
            trigger_worker_url: format!("{}/trigger_worker", base),
            list_batches_url: format!("{}/list_batches", base),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    pub fn apply_file(&mut self, file: &TomlConfig) {
        if let Some(url) = &file.api.create_batch_url {
            self.create_batch_url = url.clone();
        }
        if let Some(url) = &file.api.trigger_worker_url {
            self.trigger_worker_url = url.clone();
        }
        if let Some(url) = &file.api.list_batches_url {
            self.list_batches_url = url.clone();
        }
        if let Some(timeout) = file.api.timeout_seconds {
            self.timeout_seconds = timeout;
        }
    }
}

impl Validate for ResolvedConfig {
    fn validate(&self) -> Result<()> {
        validate_url("create_batch_url", &self.create_batch_url)?;
        validate_url("trigger_worker_url", &self.trigger_worker_url)?;
        validate_url("list_batches_url", &self.list_batches_url)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

impl ConfigProvider for ResolvedConfig {
    fn create_batch_url(&self) -> &str {
        &self.create_batch_url
    }

    fn trigger_worker_url(&self) -> &str {
        &self.trigger_worker_url
    }

    fn list_batches_url(&self) -> &str {
        &self.list_batches_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
