//! Core data types shared across the alignment engine.

use serde::{Deserialize, Serialize};

/// A single transcribed word with timestamps, as delivered by the ASR stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Verbatim transcribed text.
    pub text: String,
    /// Canonical lexical form, comparable against normalized sentence text.
    pub normalized: String,
    /// Start of the word in seconds from chapter start.
    pub start_time: f64,
    /// End of the word in seconds from chapter start.
    pub end_time: f64,
}

impl Token {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// One unit of the ebook's text segmentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    /// 0-based chapter-relative index; stable join key for downstream display.
    pub index: usize,
    /// Original sentence text, verbatim.
    pub raw_text: String,
    /// Canonical lexical form for fuzzy comparison.
    pub normalized_text: String,
}

impl Sentence {
    /// Number of words in the normalized form.
    pub fn word_count(&self) -> usize {
        self.normalized_text.split_whitespace().count()
    }
}

/// A detected pause in the audio, usable as a boundary snap target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceInterval {
    pub start_time: f64,
    pub end_time: f64,
}

impl SilenceInterval {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// One aligned sentence: the persisted output unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentRecord {
    /// Index into the chapter's sentence sequence.
    pub sentence_idx: usize,
    /// Span start in seconds, possibly snapped to a silence edge.
    pub start_time: f64,
    /// Span end in seconds, strictly greater than `start_time`.
    pub end_time: f64,
    /// Combined confidence in [0, 1].
    pub confidence: f64,
    /// Verbatim text of the token window that matched.
    pub matched_text: String,
}

/// Ordered alignment results for one chapter. Immutable once built; the only
/// entity that gets persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterAlignment {
    /// Chapter identifier from the transcript.
    pub chapter: u32,
    /// Records in non-decreasing, non-overlapping start order.
    pub records: Vec<AlignmentRecord>,
    /// Full ordered sentence text list, so a read-along display can render
    /// text without re-parsing the book (including sentences with no record).
    pub sentences: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_word_count() {
        let sentence = Sentence {
            index: 0,
            raw_text: "The cat sat.".to_string(),
            normalized_text: "the cat sat".to_string(),
        };
        assert_eq!(sentence.word_count(), 3);
    }

    #[test]
    fn alignment_record_json_field_names() {
        let record = AlignmentRecord {
            sentence_idx: 2,
            start_time: 1.0,
            end_time: 2.5,
            confidence: 0.91,
            matched_text: "hello world".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["sentence_idx"], 2);
        assert_eq!(json["start_time"], 1.0);
        assert_eq!(json["end_time"], 2.5);
        assert_eq!(json["matched_text"], "hello world");
    }
}
