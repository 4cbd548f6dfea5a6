use thiserror::Error;

/// Result type for flattening operations
pub type Result<T> = std::result::Result<T, FlattenError>;

/// Errors raised before any output is produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlattenError {
    /// A record failed validation (missing or duplicate identifier)
    #[error("Invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FlattenError {
    /// Create an invalid record error
    pub fn invalid_record(row: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            row,
            reason: reason.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
