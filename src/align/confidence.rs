//! Confidence scorer.
//!
//! Combines text similarity, boundary fit against detected silence, and
//! span-duration plausibility into one scalar per aligned sentence. Pure
//! functions of their inputs; the weights are configuration, not business
//! logic.

use crate::align::types::SilenceInterval;
use crate::defaults;
use crate::error::{AlignError, Result};

/// Configuration for the confidence scorer.
#[derive(Debug, Clone, Copy)]
pub struct ScorerConfig {
    /// Weight for the text-similarity signal.
    pub weight_similarity: f64,
    /// Weight for the boundary-fit signal.
    pub weight_boundary: f64,
    /// Weight for the duration-plausibility signal.
    pub weight_duration: f64,
    /// Slowest plausible narration rate (words per second).
    pub min_words_per_sec: f64,
    /// Fastest plausible narration rate (words per second).
    pub max_words_per_sec: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            weight_similarity: defaults::WEIGHT_SIMILARITY,
            weight_boundary: defaults::WEIGHT_BOUNDARY,
            weight_duration: defaults::WEIGHT_DURATION,
            min_words_per_sec: defaults::MIN_WORDS_PER_SEC,
            max_words_per_sec: defaults::MAX_WORDS_PER_SEC,
        }
    }
}

impl ScorerConfig {
    /// Validate weights and rate range, naming the offending key on failure.
    pub fn validate(&self) -> Result<()> {
        for (key, w) in [
            ("scorer.weight_similarity", self.weight_similarity),
            ("scorer.weight_boundary", self.weight_boundary),
            ("scorer.weight_duration", self.weight_duration),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(AlignError::ConfigInvalidValue {
                    key: key.to_string(),
                    message: "must be a finite non-negative number".to_string(),
                });
            }
        }
        if self.weight_similarity + self.weight_boundary + self.weight_duration <= 0.0 {
            return Err(AlignError::ConfigInvalidValue {
                key: "scorer.weights".to_string(),
                message: "at least one weight must be positive".to_string(),
            });
        }
        if self.min_words_per_sec <= 0.0 || self.max_words_per_sec <= self.min_words_per_sec {
            return Err(AlignError::ConfigInvalidValue {
                key: "scorer.words_per_sec".to_string(),
                message: "require 0 < min < max".to_string(),
            });
        }
        Ok(())
    }
}

/// Weighted combiner for the three per-sentence signals.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceScorer {
    config: ScorerConfig,
}

impl ConfidenceScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Combine the three signals, each already in [0,1], into one confidence.
    pub fn combine(&self, similarity: f64, boundary_fit: f64, duration_plausibility: f64) -> f64 {
        let c = &self.config;
        let total = c.weight_similarity + c.weight_boundary + c.weight_duration;
        let weighted = c.weight_similarity * similarity
            + c.weight_boundary * boundary_fit
            + c.weight_duration * duration_plausibility;
        (weighted / total).clamp(0.0, 1.0)
    }

    /// How plausible a span duration is for a sentence of `word_count` words.
    ///
    /// 1.0 inside the configured speaking-rate range; decays proportionally
    /// outside it (too short implies a mis-split, too long a missed boundary).
    pub fn duration_plausibility(&self, duration_secs: f64, word_count: usize) -> f64 {
        if word_count == 0 || duration_secs <= 0.0 {
            return 0.0;
        }
        let rate = word_count as f64 / duration_secs;
        let c = &self.config;
        let score = if rate < c.min_words_per_sec {
            rate / c.min_words_per_sec
        } else if rate > c.max_words_per_sec {
            c.max_words_per_sec / rate
        } else {
            1.0
        };
        score.clamp(0.0, 1.0)
    }
}

/// Fit of an un-snapped boundary timestamp against detected silence.
///
/// 1 at a silence edge, linearly down to 0 at `tolerance` away; 0 when no
/// silence edge falls within tolerance (including when no silence was
/// detected at all).
pub fn boundary_fit(time: f64, silences: &[SilenceInterval], tolerance: f64) -> f64 {
    if tolerance <= 0.0 {
        return 0.0;
    }
    match nearest_edge(time, silences) {
        Some((_, distance)) if distance <= tolerance => 1.0 - distance / tolerance,
        _ => 0.0,
    }
}

/// Nearest silence edge to `time` and its absolute distance. Equidistant
/// edges resolve to the earlier one, keeping results deterministic.
pub fn nearest_edge(time: f64, silences: &[SilenceInterval]) -> Option<(f64, f64)> {
    let mut best: Option<(f64, f64)> = None;
    for interval in silences {
        for edge in [interval.start_time, interval.end_time] {
            let distance = (edge - time).abs();
            match best {
                Some((_, d)) if distance >= d => {}
                _ => best = Some((edge, distance)),
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn silence(start: f64, end: f64) -> SilenceInterval {
        SilenceInterval {
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn combine_is_weighted_average() {
        let scorer = ConfidenceScorer::new(ScorerConfig::default());
        assert!((scorer.combine(1.0, 1.0, 1.0) - 1.0).abs() < 1e-9);
        assert!(scorer.combine(0.0, 0.0, 0.0).abs() < 1e-9);
        // similarity dominates with default weights
        assert!(scorer.combine(1.0, 0.0, 0.0) > scorer.combine(0.0, 1.0, 0.0));
    }

    #[test]
    fn combine_clamps_to_unit_interval() {
        let scorer = ConfidenceScorer::new(ScorerConfig::default());
        let c = scorer.combine(1.0, 1.0, 1.0);
        assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn plausible_duration_scores_one() {
        let scorer = ConfidenceScorer::new(ScorerConfig::default());
        // 3 words over 1.5s = 2 words/sec, well inside the range
        assert!((scorer.duration_plausibility(1.5, 3) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn too_fast_and_too_slow_are_penalized() {
        let scorer = ConfidenceScorer::new(ScorerConfig::default());
        assert!(scorer.duration_plausibility(0.2, 5) < 1.0); // 25 words/sec
        assert!(scorer.duration_plausibility(30.0, 3) < 1.0); // 0.1 words/sec
    }

    #[test]
    fn degenerate_duration_scores_zero() {
        let scorer = ConfidenceScorer::new(ScorerConfig::default());
        assert_eq!(scorer.duration_plausibility(0.0, 3), 0.0);
        assert_eq!(scorer.duration_plausibility(1.0, 0), 0.0);
    }

    #[test]
    fn boundary_fit_peaks_at_edge() {
        let silences = [silence(1.5, 2.0)];
        assert!((boundary_fit(1.5, &silences, 0.5) - 1.0).abs() < 1e-9);
        assert!((boundary_fit(1.75, &silences, 0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn boundary_fit_zero_without_nearby_silence() {
        assert_eq!(boundary_fit(1.0, &[], 0.5), 0.0);
        let silences = [silence(10.0, 11.0)];
        assert_eq!(boundary_fit(1.0, &silences, 0.5), 0.0);
    }

    #[test]
    fn nearest_edge_prefers_earlier_on_tie() {
        let silences = [silence(0.0, 1.0), silence(3.0, 4.0)];
        // time 2.0 is equidistant from edges at 1.0 and 3.0
        let (edge, distance) = nearest_edge(2.0, &silences).unwrap();
        assert_eq!(edge, 1.0);
        assert_eq!(distance, 1.0);
    }

    #[test]
    fn validate_rejects_negative_weight() {
        let config = ScorerConfig {
            weight_boundary: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_all_zero_weights() {
        let config = ScorerConfig {
            weight_similarity: 0.0,
            weight_boundary: 0.0,
            weight_duration: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_rate_range() {
        let config = ScorerConfig {
            min_words_per_sec: 5.0,
            max_words_per_sec: 2.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unequal_weights_renormalize() {
        let config = ScorerConfig {
            weight_similarity: 2.0,
            weight_boundary: 1.0,
            weight_duration: 1.0,
            ..Default::default()
        };
        let scorer = ConfidenceScorer::new(config);
        assert!((scorer.combine(1.0, 1.0, 1.0) - 1.0).abs() < 1e-9);
        assert!((scorer.combine(1.0, 0.0, 0.0) - 0.5).abs() < 1e-9);
    }
}
