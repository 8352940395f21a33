use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReticleError {
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Invalid crop: {0}")]
    InvalidCrop(String),
}

pub type Result<T> = std::result::Result<T, ReticleError>;
