//! readalign - audiobook/ebook sentence alignment
//!
//! Reconciles word-level speech-recognition output with sentence-segmented
//! ebook text into an ordered per-sentence timestamp mapping with confidence
//! scores.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

pub mod align;
pub mod audio;
pub mod book;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod text;
pub mod transcript;

// Core pipeline (normalize → segment → match → score → write)
pub use align::{
    AlignerConfig, AlignmentRecord, ChapterAlignment, ConfidenceScorer, FuzzyAligner,
    ScorerConfig, Sentence, SilenceInterval, Token,
};
pub use audio::{ChapterAudio, SilenceConfig, SilenceSegmenter};
pub use engine::{align_chapter, run_batch, BatchSummary};
pub use text::{normalize, split_sentences};

// Input contracts
pub use book::Book;
pub use transcript::Transcript;

// Error handling
pub use error::{AlignError, Result};

// Config
pub use config::Config;
