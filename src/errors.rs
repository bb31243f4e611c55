// ABOUTME: Error types for the deckgen engine
// ABOUTME: Provides structured error handling for each stage of the assembly pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to fetch remote resource: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Failed to parse slide records: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("PPTX serialization error: {0}")]
    PptxError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}

// Implement conversion from anyhow::Error to our DeckError
impl From<anyhow::Error> for DeckError {
    fn from(err: anyhow::Error) -> Self {
        DeckError::UnknownError(err.to_string())
    }
}

// Implement conversion from zip errors
impl From<zip::result::ZipError> for DeckError {
    fn from(err: zip::result::ZipError) -> Self {
        DeckError::PptxError(format!("ZIP operation failed: {}", err))
    }
}

impl From<image::ImageError> for DeckError {
    fn from(err: image::ImageError) -> Self {
        DeckError::ImageError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
