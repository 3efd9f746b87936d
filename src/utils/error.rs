use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("Grammar pattern error: {0}")]
    PatternError(#[from] regex::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error in '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Sink '{channel}' rejected event: {message}")]
    SinkError { channel: String, message: String },
}

pub type Result<T> = std::result::Result<T, HookError>;
