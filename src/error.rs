//! Error types for readalign.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlignError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Input contract errors
    #[error("Failed to read transcript {path}: {message}")]
    TranscriptRead { path: PathBuf, message: String },

    #[error("Failed to read book text {path}: {message}")]
    BookRead { path: PathBuf, message: String },

    #[error("Audio read failed for {path}: {message}")]
    AudioRead { path: PathBuf, message: String },

    // Alignment errors
    #[error("Chapter {chapter} alignment failed: {message}")]
    ChapterAlignment { chapter: u32, message: String },

    // Output errors
    #[error("Failed to write alignment to {path}: {message}")]
    WriteFailure { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, AlignError>;
