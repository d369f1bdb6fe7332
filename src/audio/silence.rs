//! Silence segmenter.
//!
//! Scans a chapter's energy envelope for pauses long enough to be sentence
//! boundary candidates. Output intervals are ascending and non-overlapping.

use crate::align::types::SilenceInterval;
use crate::defaults;
use tracing::debug;

/// Configuration for silence detection.
#[derive(Debug, Clone, Copy)]
pub struct SilenceConfig {
    /// RMS threshold (0.0 to 1.0) below which a window counts as silent.
    pub energy_threshold: f32,
    /// Minimum duration (seconds) for a silent run to be kept.
    pub min_silence_secs: f64,
    /// Adjacent silent runs closer than this gap (seconds) are merged before
    /// the duration filter runs.
    pub merge_gap_secs: f64,
    /// RMS analysis window length in milliseconds.
    pub window_ms: u32,
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            energy_threshold: defaults::SILENCE_ENERGY_THRESHOLD,
            min_silence_secs: defaults::MIN_SILENCE_SECS,
            merge_gap_secs: defaults::SILENCE_MERGE_GAP_SECS,
            window_ms: defaults::SILENCE_WINDOW_MS,
        }
    }
}

/// RMS-based pause detector over raw samples.
pub struct SilenceSegmenter {
    config: SilenceConfig,
}

impl SilenceSegmenter {
    pub fn new(config: SilenceConfig) -> Self {
        Self { config }
    }

    /// Scan `samples` and return candidate pause intervals.
    ///
    /// Returns an empty list when nothing clears the duration threshold
    /// (including for empty input); callers must treat that as "no boundary
    /// hints", not an error.
    pub fn segment(&self, samples: &[f32], sample_rate: u32) -> Vec<SilenceInterval> {
        if samples.is_empty() || sample_rate == 0 {
            return Vec::new();
        }

        let window_len = ((sample_rate as u64 * self.config.window_ms as u64) / 1000) as usize;
        let window_len = window_len.max(1);
        let window_secs = window_len as f64 / sample_rate as f64;

        // Mark silent windows and merge adjacent runs in one pass.
        let mut runs: Vec<SilenceInterval> = Vec::new();
        let mut run_start: Option<f64> = None;
        for (i, window) in samples.chunks(window_len).enumerate() {
            let t = i as f64 * window_secs;
            if rms(window) < self.config.energy_threshold {
                run_start.get_or_insert(t);
            } else if let Some(start) = run_start.take() {
                runs.push(SilenceInterval {
                    start_time: start,
                    end_time: t,
                });
            }
        }
        if let Some(start) = run_start {
            runs.push(SilenceInterval {
                start_time: start,
                end_time: samples.len() as f64 / sample_rate as f64,
            });
        }

        let merged = merge_nearby(runs, self.config.merge_gap_secs);
        let intervals: Vec<SilenceInterval> = merged
            .into_iter()
            .filter(|r| r.duration() >= self.config.min_silence_secs)
            .collect();

        debug!(
            count = intervals.len(),
            "silence segmentation complete"
        );
        intervals
    }
}

/// Merge runs separated by less than `gap` seconds. Input is ascending;
/// output stays ascending and non-overlapping.
fn merge_nearby(runs: Vec<SilenceInterval>, gap: f64) -> Vec<SilenceInterval> {
    let mut merged: Vec<SilenceInterval> = Vec::with_capacity(runs.len());
    for run in runs {
        match merged.last_mut() {
            Some(prev) if run.start_time - prev.end_time <= gap => {
                prev.end_time = prev.end_time.max(run.end_time);
            }
            _ => merged.push(run),
        }
    }
    merged
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 16000;

    fn speech(secs: f64) -> Vec<f32> {
        vec![0.3; (secs * RATE as f64) as usize]
    }

    fn quiet(secs: f64) -> Vec<f32> {
        vec![0.001; (secs * RATE as f64) as usize]
    }

    #[test]
    fn empty_input_yields_no_intervals() {
        let segmenter = SilenceSegmenter::new(SilenceConfig::default());
        assert!(segmenter.segment(&[], RATE).is_empty());
    }

    #[test]
    fn detects_a_pause_between_speech() {
        let mut samples = speech(1.0);
        samples.extend(quiet(0.8));
        samples.extend(speech(1.0));

        let segmenter = SilenceSegmenter::new(SilenceConfig::default());
        let intervals = segmenter.segment(&samples, RATE);
        assert_eq!(intervals.len(), 1);
        assert!((intervals[0].start_time - 1.0).abs() < 0.1);
        assert!((intervals[0].end_time - 1.8).abs() < 0.1);
    }

    #[test]
    fn short_gaps_are_discarded() {
        let mut samples = speech(1.0);
        samples.extend(quiet(0.1)); // stop-consonant scale gap
        samples.extend(speech(1.0));

        let segmenter = SilenceSegmenter::new(SilenceConfig::default());
        assert!(segmenter.segment(&samples, RATE).is_empty());
    }

    #[test]
    fn nearby_runs_merge() {
        let mut samples = speech(1.0);
        samples.extend(quiet(0.2));
        samples.extend(speech(0.1)); // blip inside the pause
        samples.extend(quiet(0.2));
        samples.extend(speech(1.0));

        let config = SilenceConfig {
            merge_gap_secs: 0.15,
            min_silence_secs: 0.3,
            ..Default::default()
        };
        let intervals = SilenceSegmenter::new(config).segment(&samples, RATE);
        assert_eq!(intervals.len(), 1);
        assert!(intervals[0].duration() >= 0.4);
    }

    #[test]
    fn intervals_are_ascending_and_disjoint() {
        let mut samples = Vec::new();
        for _ in 0..4 {
            samples.extend(speech(0.8));
            samples.extend(quiet(1.0));
        }
        let segmenter = SilenceSegmenter::new(SilenceConfig::default());
        let intervals = segmenter.segment(&samples, RATE);
        assert!(intervals.len() >= 3);
        for pair in intervals.windows(2) {
            assert!(pair[0].end_time <= pair[1].start_time);
        }
    }

    #[test]
    fn trailing_silence_extends_to_end_of_audio() {
        let mut samples = speech(1.0);
        samples.extend(quiet(1.0));
        let total = samples.len() as f64 / RATE as f64;

        let segmenter = SilenceSegmenter::new(SilenceConfig::default());
        let intervals = segmenter.segment(&samples, RATE);
        assert_eq!(intervals.len(), 1);
        assert!((intervals[0].end_time - total).abs() < 0.1);
    }

    #[test]
    fn all_speech_yields_no_intervals() {
        let segmenter = SilenceSegmenter::new(SilenceConfig::default());
        assert!(segmenter.segment(&speech(3.0), RATE).is_empty());
    }
}
