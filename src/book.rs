//! Book text input contract.
//!
//! The ebook-parsing stage runs upstream and hands over ordered chapter
//! plain-text blocks as JSON. Chapter ordering is preserved as given.

use crate::error::{AlignError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A whole book's text, chapter by chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub title: String,
    pub chapters: Vec<BookChapter>,
}

/// One chapter of plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookChapter {
    pub number: u32,
    pub text: String,
}

impl Book {
    /// Load a book JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| AlignError::BookRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| AlignError::BookRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Chapter text by number, if present.
    pub fn chapter_text(&self, number: u32) -> Option<&str> {
        self.chapters
            .iter()
            .find(|c| c.number == number)
            .map(|c| c.text.as_str())
    }
}
