use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Unsupported file format: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("File contains no data rows")]
    EmptyFile,

    #[error("File parsing failed: {message}")]
    ParseError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Server error: {message}")]
    ServerError { message: String },

    #[error("Malformed server response: {message}")]
    MalformedResponse { message: String },

    #[error("Network request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, ImportError>;

impl From<calamine::Error> for ImportError {
    fn from(e: calamine::Error) -> Self {
        ImportError::ParseError {
            message: e.to_string(),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(e: csv::Error) -> Self {
        ImportError::ParseError {
            message: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Format,
    Parse,
    Validation,
    Network,
    Server,
    Config,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ImportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ImportError::UnsupportedFormat { .. } => ErrorCategory::Format,
            ImportError::EmptyFile | ImportError::ParseError { .. } => ErrorCategory::Parse,
            ImportError::ValidationError { .. } => ErrorCategory::Validation,
            ImportError::ServerError { .. } | ImportError::MalformedResponse { .. } => {
                ErrorCategory::Server
            }
            ImportError::NetworkError(_) => ErrorCategory::Network,
            ImportError::IoError(_) => ErrorCategory::Io,
            ImportError::InvalidConfigValueError { .. } | ImportError::MissingConfigError { .. } => {
                ErrorCategory::Config
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ImportError::ValidationError { .. }
            | ImportError::UnsupportedFormat { .. }
            | ImportError::EmptyFile => ErrorSeverity::Medium,
            ImportError::ParseError { .. } => ErrorSeverity::High,
            ImportError::ServerError { .. } | ImportError::MalformedResponse { .. } => {
                ErrorSeverity::High
            }
            ImportError::NetworkError(_) => ErrorSeverity::High,
            ImportError::IoError(_) => ErrorSeverity::Critical,
            ImportError::InvalidConfigValueError { .. } | ImportError::MissingConfigError { .. } => {
                ErrorSeverity::Medium
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ImportError::UnsupportedFormat { .. } => {
                "Use a .xlsx, .xls, .csv or .txt file".to_string()
            }
            ImportError::EmptyFile => {
                "Check that the file has at least one data row below the header".to_string()
            }
            ImportError::ParseError { .. } => {
                "Re-export the file from its source application and try again".to_string()
            }
            ImportError::ValidationError { .. } => {
                "Fix the reported field and re-run the import".to_string()
            }
            ImportError::ServerError { .. } => {
                "Check the backend logs; the raw response excerpt is included above".to_string()
            }
            ImportError::MalformedResponse { .. } => {
                "The backend answered with something that is not JSON; check its version"
                    .to_string()
            }
            ImportError::NetworkError(_) => {
                "Check connectivity and the configured API endpoints".to_string()
            }
            ImportError::IoError(_) => "Check that the file exists and is readable".to_string(),
            ImportError::InvalidConfigValueError { .. } | ImportError::MissingConfigError { .. } => {
                "Check the CLI flags and the TOML config file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::UnsupportedFormat { extension } => {
                format!("Files with the .{} extension cannot be imported", extension)
            }
            ImportError::EmptyFile => "The selected file contains no phone data".to_string(),
            ImportError::ValidationError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}
