use thiserror::Error;

/// Result type for matcher and scorer operations
pub type Result<T> = std::result::Result<T, FuzzyError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuzzyError {
    /// Scorer configuration failed validation
    #[error("Invalid scorer configuration: {0}")]
    InvalidConfig(String),
}

impl FuzzyError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
