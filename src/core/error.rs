use thiserror::Error;

#[derive(Error, Debug)]
pub enum CosmogenError {
    #[error("Invalid star: {0}")]
    InvalidStar(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CosmogenError>;
