//! Text processing: normalization and sentence segmentation.

pub mod normalize;
pub mod sentences;

pub use normalize::normalize;
pub use sentences::split_sentences;
