//! Audio loading and silence analysis.

pub mod silence;
pub mod wav;

pub use silence::{SilenceConfig, SilenceSegmenter};
pub use wav::ChapterAudio;
