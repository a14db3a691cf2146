//! Error types for ClozeDrill core

use thiserror::Error;

/// Errors raised while decoding uploads or loading configuration
#[derive(Error, Debug)]
pub enum DrillError {
    #[error("Unsupported file format: .{0}")]
    UnsupportedFormat(String),

    #[error("No sheets found in workbook")]
    EmptyWorkbook,

    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type DrillResult<T> = Result<T, DrillError>;
