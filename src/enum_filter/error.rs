use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid enum map: {0}")]
    InvalidMap(String),

    #[error("Member is read-only: {0}")]
    ReadOnly(String),

    #[error("Invalid list: {0}")]
    InvalidList(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FilterError>;
