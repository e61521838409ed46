use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Browser error: {0}")]
    BrowserError(String),

    #[error("Extraction error: {0}")]
    ExtractionError(String),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
