use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown pathway: {0:?}")]
    InvalidPathway(String),
    #[error("invalid request status: {0:?}")]
    InvalidStatus(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
