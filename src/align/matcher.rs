//! Fuzzy aligner.
//!
//! Greedy windowed search that assigns each sentence, in order, to the
//! contiguous run of tokens whose concatenated normalized text best matches
//! it. A single cursor walks the token stream; the window for sentence i+1
//! never starts before the window for sentence i ends, so output spans form a
//! monotonic partition of the chapter timeline.
//!
//! Chosen over full dynamic-programming alignment for its near-linear cost
//! and tolerance to local ASR garbling; the public contract would admit a
//! banded DP substitute without changes elsewhere.

use crate::align::confidence::{boundary_fit, nearest_edge, ConfidenceScorer};
use crate::align::types::{AlignmentRecord, Sentence, SilenceInterval, Token};
use crate::defaults;
use crate::error::{AlignError, Result};
use tracing::{debug, trace};

/// Configuration for the windowed search.
#[derive(Debug, Clone, Copy)]
pub struct AlignerConfig {
    /// Minimum similarity (normalized edit-distance ratio) for a match to be
    /// accepted. Below it the sentence goes unmatched and the cursor holds.
    pub min_similarity: f64,
    /// How many consecutive non-improving window growths to tolerate before
    /// the search stops for the current sentence.
    pub lookahead_slack: usize,
    /// Tolerance (seconds) for snapping span boundaries to silence edges.
    pub snap_tolerance_secs: f64,
    /// Cap on window duration, as a multiple of the sentence's expected
    /// narration time at the slowest plausible rate.
    pub max_window_factor: f64,
    /// Skip recording-front matter (e.g. a LibriVox intro) by starting after
    /// the first chapter-header token and sentence, when one is found near
    /// the front of either stream. Sentence indices are preserved; skipped
    /// sentences are simply unmatched.
    pub skip_front_matter: bool,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            min_similarity: defaults::MIN_SIMILARITY,
            lookahead_slack: defaults::LOOKAHEAD_SLACK,
            snap_tolerance_secs: defaults::SNAP_TOLERANCE_SECS,
            max_window_factor: defaults::MAX_WINDOW_FACTOR,
            skip_front_matter: false,
        }
    }
}

impl AlignerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(AlignError::ConfigInvalidValue {
                key: "matcher.min_similarity".to_string(),
                message: "must be within [0, 1]".to_string(),
            });
        }
        if self.snap_tolerance_secs < 0.0 || !self.snap_tolerance_secs.is_finite() {
            return Err(AlignError::ConfigInvalidValue {
                key: "matcher.snap_tolerance_secs".to_string(),
                message: "must be a finite non-negative number".to_string(),
            });
        }
        if self.max_window_factor < 1.0 {
            return Err(AlignError::ConfigInvalidValue {
                key: "matcher.max_window_factor".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// How far into either stream the front-matter scan looks for a chapter
/// header. Front matter sits at the front; an unbounded scan would skip to a
/// mid-book occurrence of "chapter".
const FRONT_MATTER_SCAN_TOKENS: usize = 80;
const FRONT_MATTER_SCAN_SENTENCES: usize = 20;

/// Greedy monotonic matcher between a token stream and a sentence sequence.
pub struct FuzzyAligner {
    config: AlignerConfig,
    scorer: ConfidenceScorer,
}

impl FuzzyAligner {
    pub fn new(config: AlignerConfig, scorer: ConfidenceScorer) -> Self {
        Self { config, scorer }
    }

    /// Align `sentences` against `tokens`, using `silences` as boundary snap
    /// targets. Returns accepted records in sentence order; sentences with no
    /// viable match are omitted (and the cursor does not advance past tokens
    /// they failed to claim, so later sentences still get a fair chance).
    ///
    /// Both input slices must already be normalized; `silences` must be
    /// ascending and disjoint.
    pub fn align(
        &self,
        tokens: &[Token],
        sentences: &[Sentence],
        silences: &[SilenceInterval],
    ) -> Vec<AlignmentRecord> {
        if tokens.is_empty() || sentences.is_empty() {
            return Vec::new();
        }

        let (mut cursor, first_sentence) = if self.config.skip_front_matter {
            self.front_matter_offsets(tokens, sentences)
        } else {
            (0, 0)
        };

        let mut records = Vec::new();
        let mut prev_end = 0.0f64;

        for sentence in &sentences[first_sentence.min(sentences.len())..] {
            if cursor >= tokens.len() {
                break;
            }
            if sentence.normalized_text.is_empty() {
                continue;
            }

            let Some((window_len, similarity)) = self.best_window(&tokens[cursor..], sentence)
            else {
                continue;
            };

            if similarity < self.config.min_similarity {
                trace!(
                    sentence_idx = sentence.index,
                    similarity,
                    "no viable match; cursor holds"
                );
                continue;
            }

            let window = &tokens[cursor..cursor + window_len];
            let record = self.build_record(sentence, window, silences, similarity, &mut prev_end);
            records.push(record);
            cursor += window_len;
        }

        debug!(
            matched = records.len(),
            total = sentences.len(),
            "fuzzy alignment complete"
        );
        records
    }

    /// Grow a candidate window from the front of `tokens`, scoring each size
    /// against the sentence, and return the best (length, similarity) seen.
    ///
    /// Growth stops after `lookahead_slack` consecutive non-improving tokens
    /// or once the window exceeds its duration cap. Strict improvement is
    /// required to move the best, so equal-scoring longer windows lose to the
    /// shortest one.
    fn best_window(&self, tokens: &[Token], sentence: &Sentence) -> Option<(usize, f64)> {
        let target = &sentence.normalized_text;
        let max_duration = self.config.max_window_factor * sentence.word_count() as f64
            / self.scorer.config().min_words_per_sec;
        let window_start = tokens.first()?.start_time;

        let mut concat = String::new();
        let mut best: Option<(usize, f64)> = None;
        let mut since_best = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            if !token.normalized.is_empty() {
                if !concat.is_empty() {
                    concat.push(' ');
                }
                concat.push_str(&token.normalized);
            }
            let score = strsim::normalized_levenshtein(&concat, target);

            match best {
                Some((_, best_score)) if score <= best_score => {
                    since_best += 1;
                    if since_best > self.config.lookahead_slack {
                        break;
                    }
                }
                _ => {
                    best = Some((i + 1, score));
                    since_best = 0;
                }
            }

            if token.end_time - window_start > max_duration {
                break;
            }
        }
        best
    }

    /// Assemble a record for an accepted window: snap boundaries to nearby
    /// silence, then clamp so spans stay monotonic and strictly positive.
    fn build_record(
        &self,
        sentence: &Sentence,
        window: &[Token],
        silences: &[SilenceInterval],
        similarity: f64,
        prev_end: &mut f64,
    ) -> AlignmentRecord {
        let raw_start = window[0].start_time;
        let raw_end = window[window.len() - 1].end_time;
        let tolerance = self.config.snap_tolerance_secs;

        let mut start = snap(raw_start, silences, tolerance);
        let mut end = snap(raw_end, silences, tolerance);

        // Monotonicity: never reach back into the previous record's span.
        start = start.max(*prev_end);
        if end <= start {
            end = raw_end.max(start + defaults::MIN_SPAN_SECS);
        }
        *prev_end = end;

        // Boundary fit is judged on the un-snapped timestamps: it measures how
        // close the raw window sat to natural pauses, not how far we moved it.
        // Chapter start (t = 0) counts as a pause edge; narration begins there.
        let fit_start = boundary_fit(raw_start, silences, tolerance).max(edge_fit(raw_start, 0.0, tolerance));
        let fit_end = boundary_fit(raw_end, silences, tolerance);
        let fit = 0.5 * fit_start + 0.5 * fit_end;
        let plausibility = self
            .scorer
            .duration_plausibility(end - start, sentence.word_count());
        let confidence = self.scorer.combine(similarity, fit, plausibility);

        let matched_text = window
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        AlignmentRecord {
            sentence_idx: sentence.index,
            start_time: start,
            end_time: end,
            confidence,
            matched_text,
        }
    }

    /// Recovered front-matter heuristic: narrated intros and ebook metadata
    /// both end at the chapter header. Returns (token cursor, first sentence
    /// position) just past the header in each stream, or (0, 0) when none is
    /// found near the front.
    fn front_matter_offsets(&self, tokens: &[Token], sentences: &[Sentence]) -> (usize, usize) {
        let token_offset = tokens
            .iter()
            .take(FRONT_MATTER_SCAN_TOKENS)
            .position(|t| t.normalized.split_whitespace().any(|w| w == "chapter"))
            .map(|i| i + 1)
            .unwrap_or(0);
        let sentence_offset = sentences
            .iter()
            .take(FRONT_MATTER_SCAN_SENTENCES)
            .position(|s| {
                s.normalized_text
                    .split_whitespace()
                    .any(|w| w == "chapter" || w == "letter")
            })
            .map(|i| i + 1)
            .unwrap_or(0);
        if token_offset > 0 || sentence_offset > 0 {
            debug!(token_offset, sentence_offset, "skipping front matter");
        }
        (token_offset, sentence_offset)
    }
}

/// Fit of a timestamp against one specific edge, on the same linear scale as
/// [`boundary_fit`].
fn edge_fit(time: f64, edge: f64, tolerance: f64) -> f64 {
    if tolerance <= 0.0 {
        return 0.0;
    }
    let distance = (time - edge).abs();
    if distance <= tolerance {
        1.0 - distance / tolerance
    } else {
        0.0
    }
}

/// Snap a timestamp to the nearest silence edge within `tolerance`, or leave
/// it untouched. Equidistant edges resolve to the earlier one.
fn snap(time: f64, silences: &[SilenceInterval], tolerance: f64) -> f64 {
    match nearest_edge(time, silences) {
        Some((edge, distance)) if distance <= tolerance => edge,
        _ => time,
    }
}
