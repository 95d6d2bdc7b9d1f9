use thiserror::Error;

#[derive(Error, Debug)]
pub enum LapsedError {
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LapsedError>;
