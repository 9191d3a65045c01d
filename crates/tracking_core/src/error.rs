use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TrackingError {
    /// Errors caused by the shape of the input table rather than the environment.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            TrackingError::MissingColumn(_)
                | TrackingError::LengthMismatch { .. }
                | TrackingError::DuplicateColumn(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TrackingError>;
