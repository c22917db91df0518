//! Error types for SpendLens

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Category '{0}' not found in data")]
    CategoryNotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config syntax error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
