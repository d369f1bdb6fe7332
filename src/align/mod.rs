//! The alignment engine core: data model, fuzzy matcher, confidence scoring,
//! and output serialization.

pub mod confidence;
pub mod matcher;
pub mod types;
pub mod writer;

pub use confidence::{ConfidenceScorer, ScorerConfig};
pub use matcher::{AlignerConfig, FuzzyAligner};
pub use types::{AlignmentRecord, ChapterAlignment, Sentence, SilenceInterval, Token};
