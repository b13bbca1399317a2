use thiserror::Error;

/// Errors that can occur while loading the recipe catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The HTTP request could not be completed
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Every attempt in the retry budget failed
    #[error("Failed to fetch recipes after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },

    /// The response body was not valid JSON
    #[error("Invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl CatalogError {
    /// Whether another attempt may succeed where this one failed
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::Transport(_) | CatalogError::Status(_))
    }
}
