use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Singular matrix: {0}")]
    SingularMatrix(String),

    #[error("Numeric computation error: {0}")]
    Computation(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, ModelError::Configuration(_))
    }

    pub fn is_singular_matrix(&self) -> bool {
        matches!(self, ModelError::SingularMatrix(_))
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
