//! WAV loading for silence analysis.
//!
//! Reads a chapter's WAV file into normalized f32 mono samples. Stereo input
//! is downmixed; sample rate is reported as-is since silence detection works
//! in seconds, not samples.

use crate::error::{AlignError, Result};
use std::io::Read;
use std::path::Path;

/// A chapter's audio, decoded to mono f32 in [-1, 1].
#[derive(Debug, Clone)]
pub struct ChapterAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl ChapterAudio {
    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Load a WAV file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| AlignError::AudioRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_reader(Box::new(std::io::BufReader::new(file))).map_err(|e| match e {
            AlignError::AudioRead { message, .. } => AlignError::AudioRead {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Decode WAV data from any reader (used directly by tests).
    pub fn from_reader(reader: Box<dyn Read + Send>) -> Result<Self> {
        let mut wav_reader = hound::WavReader::new(reader).map_err(|e| AlignError::AudioRead {
            path: "<reader>".into(),
            message: format!("Failed to parse WAV header: {}", e),
        })?;

        let spec = wav_reader.spec();
        let channels = spec.channels.max(1) as usize;

        let raw: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => wav_reader
                .samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>(),
            hound::SampleFormat::Int => {
                let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
                wav_reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / max))
                    .collect::<std::result::Result<Vec<_>, _>>()
            }
        }
        .map_err(|e| AlignError::AudioRead {
            path: "<reader>".into(),
            message: format!("Failed to read WAV samples: {}", e),
        })?;

        // Downmix to mono by averaging channels
        let samples = if channels > 1 {
            raw.chunks(channels)
                .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
                .collect()
        } else {
            raw
        };

        Ok(Self {
            samples,
            sample_rate: spec.sample_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn wav_bytes(samples: &[i16], channels: u16, sample_rate: u32) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn loads_mono_i16() {
        let bytes = wav_bytes(&[0, 16384, -16384], 1, 16000);
        let audio = ChapterAudio::from_reader(Box::new(Cursor::new(bytes))).unwrap();
        assert_eq!(audio.sample_rate, 16000);
        assert_eq!(audio.samples.len(), 3);
        assert!((audio.samples[1] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn downmixes_stereo() {
        // L/R pairs: (1.0-ish, 0.0) should average to ~0.5
        let bytes = wav_bytes(&[32767, 0, 32767, 0], 2, 44100);
        let audio = ChapterAudio::from_reader(Box::new(Cursor::new(bytes))).unwrap();
        assert_eq!(audio.samples.len(), 2);
        assert!((audio.samples[0] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn duration_from_sample_count() {
        let bytes = wav_bytes(&vec![0i16; 32000], 1, 16000);
        let audio = ChapterAudio::from_reader(Box::new(Cursor::new(bytes))).unwrap();
        assert!((audio.duration_secs() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_garbage() {
        let result = ChapterAudio::from_reader(Box::new(Cursor::new(vec![0u8; 16])));
        assert!(result.is_err());
    }
}
