//! Transcript input contract.
//!
//! The ASR stage runs upstream and hands over a JSON file of word-level
//! timestamped tokens per chapter. Ordering violations in the input are an
//! upstream bug, but we clamp and re-sort defensively instead of failing: a
//! flaky timestamp should cost one warning, not a whole chapter.

use crate::align::types::Token;
use crate::error::{AlignError, Result};
use crate::text::normalize;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// A whole-book transcript as produced by the transcription stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub book: String,
    pub chapters: Vec<TranscriptChapter>,
}

/// One chapter's worth of transcribed words.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptChapter {
    pub number: u32,
    #[serde(default)]
    pub filename: String,
    pub words: Vec<TranscriptWord>,
}

/// A single transcribed word with timestamps in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptWord {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Transcript {
    /// Load a transcript JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| AlignError::TranscriptRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| AlignError::TranscriptRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl TranscriptChapter {
    /// Convert raw words into normalized engine tokens, enforcing the token
    /// stream contract: ascending, non-overlapping, `end >= start`.
    pub fn tokens(&self) -> Vec<Token> {
        let mut words = self.words.clone();
        let sorted = words.windows(2).all(|w| w[0].start <= w[1].start);
        if !sorted {
            warn!(
                chapter = self.number,
                "token stream out of order; re-sorting (upstream contract violation)"
            );
            words.sort_by(|a, b| a.start.total_cmp(&b.start));
        }

        let mut tokens = Vec::with_capacity(words.len());
        let mut prev_end = 0.0f64;
        let mut clamped = false;
        for word in words {
            let start = if word.start < prev_end {
                clamped = true;
                prev_end
            } else {
                word.start
            };
            let end = if word.end < start {
                clamped = true;
                start
            } else {
                word.end
            };
            prev_end = end;
            tokens.push(Token {
                normalized: normalize(&word.text),
                text: word.text,
                start_time: start,
                end_time: end,
            });
        }
        if clamped {
            warn!(
                chapter = self.number,
                "token timestamps overlapped; clamped (upstream contract violation)"
            );
        }
        tokens
    }
}
