//! Configuration for the alignment engine.
//!
//! Tuning lives in a TOML file; every field has a documented default in
//! [`crate::defaults`], so an empty or missing file is a valid configuration.

use crate::align::confidence::ScorerConfig;
use crate::align::matcher::AlignerConfig;
use crate::audio::silence::SilenceConfig;
use crate::defaults;
use crate::error::{AlignError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub silence: SilenceSection,
    pub matcher: MatcherSection,
    pub scorer: ScorerSection,
}

/// Silence detection tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SilenceSection {
    pub energy_threshold: f32,
    pub min_silence_secs: f64,
    pub merge_gap_secs: f64,
    pub window_ms: u32,
}

/// Fuzzy matcher tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatcherSection {
    pub min_similarity: f64,
    pub lookahead_slack: usize,
    pub snap_tolerance_secs: f64,
    pub max_window_factor: f64,
    pub skip_front_matter: bool,
}

/// Confidence scorer weights and speaking-rate range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScorerSection {
    pub weight_similarity: f64,
    pub weight_boundary: f64,
    pub weight_duration: f64,
    pub min_words_per_sec: f64,
    pub max_words_per_sec: f64,
}

impl Default for SilenceSection {
    fn default() -> Self {
        Self {
            energy_threshold: defaults::SILENCE_ENERGY_THRESHOLD,
            min_silence_secs: defaults::MIN_SILENCE_SECS,
            merge_gap_secs: defaults::SILENCE_MERGE_GAP_SECS,
            window_ms: defaults::SILENCE_WINDOW_MS,
        }
    }
}

impl Default for MatcherSection {
    fn default() -> Self {
        Self {
            min_similarity: defaults::MIN_SIMILARITY,
            lookahead_slack: defaults::LOOKAHEAD_SLACK,
            snap_tolerance_secs: defaults::SNAP_TOLERANCE_SECS,
            max_window_factor: defaults::MAX_WINDOW_FACTOR,
            // Off by default: books that open a chapter with the word
            // "chapter" would lose real text to the heuristic.
            skip_front_matter: false,
        }
    }
}

impl Default for ScorerSection {
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

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Missing fields fall back to defaults; invalid TOML or invalid values
    /// are errors.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|_| AlignError::ConfigFileNotFound {
            path: path.display().to_string(),
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Check every named parameter, reporting the first offender.
    pub fn validate(&self) -> Result<()> {
        if self.silence.energy_threshold < 0.0 || !self.silence.energy_threshold.is_finite() {
            return Err(AlignError::ConfigInvalidValue {
                key: "silence.energy_threshold".to_string(),
                message: "must be a finite non-negative number".to_string(),
            });
        }
        if self.silence.min_silence_secs <= 0.0 {
            return Err(AlignError::ConfigInvalidValue {
                key: "silence.min_silence_secs".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.silence.window_ms == 0 {
            return Err(AlignError::ConfigInvalidValue {
                key: "silence.window_ms".to_string(),
                message: "must be positive".to_string(),
            });
        }
        self.aligner_config().validate()?;
        self.scorer_config().validate()?;
        Ok(())
    }

    pub fn silence_config(&self) -> SilenceConfig {
        SilenceConfig {
            energy_threshold: self.silence.energy_threshold,
            min_silence_secs: self.silence.min_silence_secs,
            merge_gap_secs: self.silence.merge_gap_secs,
            window_ms: self.silence.window_ms,
        }
    }

    pub fn aligner_config(&self) -> AlignerConfig {
        AlignerConfig {
            min_similarity: self.matcher.min_similarity,
            lookahead_slack: self.matcher.lookahead_slack,
            snap_tolerance_secs: self.matcher.snap_tolerance_secs,
            max_window_factor: self.matcher.max_window_factor,
            skip_front_matter: self.matcher.skip_front_matter,
        }
    }

    pub fn scorer_config(&self) -> ScorerConfig {
        ScorerConfig {
            weight_similarity: self.scorer.weight_similarity,
            weight_boundary: self.scorer.weight_boundary,
            weight_duration: self.scorer.weight_duration,
            min_words_per_sec: self.scorer.min_words_per_sec,
            max_words_per_sec: self.scorer.max_words_per_sec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn missing_path_means_defaults() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[matcher]\nmin_similarity = 0.75").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.matcher.min_similarity, 0.75);
        assert_eq!(
            config.silence.energy_threshold,
            defaults::SILENCE_ENERGY_THRESHOLD
        );
    }

    #[test]
    fn invalid_values_are_rejected_with_key_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[matcher]\nmin_similarity = 3.0").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("matcher.min_similarity"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Config::load(Path::new("/no/such/readalign.toml")).unwrap_err();
        assert!(matches!(err, AlignError::ConfigFileNotFound { .. }));
    }

    #[test]
    fn invalid_toml_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[").unwrap();
        assert!(Config::load(file.path()).is_err());
    }
}
