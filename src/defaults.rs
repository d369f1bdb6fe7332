//! Default configuration constants for readalign.
//!
//! Shared across config types so CLI flags, TOML files, and programmatic use
//! agree on the same tuning out of the box.

/// Default RMS energy threshold below which an analysis window counts as silent.
///
/// Audiobook recordings are mastered at fairly consistent levels; 0.01 sits
/// well below narrated speech while staying above the room-tone floor of
/// typical LibriVox-grade recordings.
pub const SILENCE_ENERGY_THRESHOLD: f32 = 0.01;

/// Default minimum duration (seconds) for a silent run to count as a pause.
///
/// Shorter gaps are stop consonants and breath catches, not sentence
/// boundaries.
pub const MIN_SILENCE_SECS: f64 = 0.3;

/// Default gap (seconds) under which adjacent silent runs are merged before
/// the duration filter is applied.
pub const SILENCE_MERGE_GAP_SECS: f64 = 0.5;

/// Default RMS analysis window length in milliseconds.
///
/// 50ms resolves pauses down to syllable scale without making the interval
/// list noisy.
pub const SILENCE_WINDOW_MS: u32 = 50;

/// Default minimum similarity for a sentence/window match to be accepted.
///
/// Normalized edit-distance ratio in [0,1]. 0.6 tolerates heavy ASR garbling
/// ("teh kat sat") while rejecting text that simply is not in the audio.
pub const MIN_SIMILARITY: f64 = 0.6;

/// Default number of consecutive non-improving window growths before the
/// search stops for the current sentence.
pub const LOOKAHEAD_SLACK: usize = 4;

/// Default tolerance (seconds) for snapping a span boundary to a nearby
/// silence-interval edge.
pub const SNAP_TOLERANCE_SECS: f64 = 0.5;

/// Slowest plausible narration rate in words per second.
///
/// Deliberate audiobook narration runs around 120-180 words per minute; spans
/// implying a slower rate usually mean the window swallowed a pause or an
/// unread passage.
pub const MIN_WORDS_PER_SEC: f64 = 1.2;

/// Fastest plausible narration rate in words per second.
pub const MAX_WORDS_PER_SEC: f64 = 4.5;

/// Default confidence-scorer weight for text similarity.
pub const WEIGHT_SIMILARITY: f64 = 0.6;

/// Default confidence-scorer weight for boundary fit against silence.
pub const WEIGHT_BOUNDARY: f64 = 0.2;

/// Default confidence-scorer weight for span-duration plausibility.
pub const WEIGHT_DURATION: f64 = 0.2;

/// Minimum emitted span length in seconds.
///
/// Keeps `start_time < end_time` strict even when silence snapping and
/// monotonicity clamping collapse a span.
pub const MIN_SPAN_SECS: f64 = 0.01;

/// Hard cap multiplier on window duration relative to the sentence's expected
/// narration time at the slowest plausible rate. Guards against runaway
/// windows on a bad match.
pub const MAX_WINDOW_FACTOR: f64 = 3.0;
