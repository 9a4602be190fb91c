pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LocalStorage, ResolvedConfig, TomlConfig};

pub use crate::core::engine::{ImportEngine, ImportReport, ImportRequest};
pub use crate::core::pipeline::StandardPipeline;
pub use crate::core::session::ImportSession;
pub use utils::error::{ImportError, Result};
