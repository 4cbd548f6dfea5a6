use thiserror::Error;

pub type Result<T> = std::result::Result<T, IoError>;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Flatten error: {0}")]
    Flatten(#[from] treeflat_core::FlattenError),

    #[error("Missing column {column:?} in {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("Invalid seed file {path}: {reason}")]
    InvalidSeed { path: String, reason: String },
}
