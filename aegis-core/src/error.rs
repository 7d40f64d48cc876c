use thiserror::Error;

#[derive(Error, Debug)]
pub enum AegisError {
    #[error("Inference error: {0}")]
    InferenceError(String),

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[cfg(feature = "network")]
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, AegisError>;
