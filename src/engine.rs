//! Chapter orchestration.
//!
//! Wires the pipeline together for one chapter (tokens + sentences + silence
//! → scored records → file) and runs whole books as a chapter-per-task batch.
//! Chapters share no mutable state, so a failed chapter never touches its
//! neighbors.

use crate::align::types::{ChapterAlignment, Sentence, SilenceInterval, Token};
use crate::align::writer;
use crate::align::{ConfidenceScorer, FuzzyAligner};
use crate::audio::{ChapterAudio, SilenceSegmenter};
use crate::book::Book;
use crate::config::Config;
use crate::error::{AlignError, Result};
use crate::text::split_sentences;
use crate::transcript::{Transcript, TranscriptChapter};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Align one chapter's (tokens, sentences, silences) triple.
///
/// Pure with respect to its arguments; all tuning comes in through `config`.
/// Fails with [`AlignError::ChapterAlignment`] on an empty token stream or
/// when no sentence found a viable match.
pub fn align_chapter(
    chapter: u32,
    tokens: &[Token],
    sentences: &[Sentence],
    silences: &[SilenceInterval],
    config: &Config,
) -> Result<ChapterAlignment> {
    if tokens.is_empty() {
        return Err(AlignError::ChapterAlignment {
            chapter,
            message: "empty token stream".to_string(),
        });
    }

    let scorer = ConfidenceScorer::new(config.scorer_config());
    let aligner = FuzzyAligner::new(config.aligner_config(), scorer);
    let records = aligner.align(tokens, sentences, silences);

    if records.is_empty() {
        return Err(AlignError::ChapterAlignment {
            chapter,
            message: format!(
                "no sentence of {} cleared the similarity threshold",
                sentences.len()
            ),
        });
    }

    Ok(ChapterAlignment {
        chapter,
        records,
        sentences: sentences.iter().map(|s| s.raw_text.clone()).collect(),
    })
}

/// Per-book batch outcome. Chapter failures are isolated, not fatal.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Chapters aligned and written, with their output paths.
    pub written: Vec<(u32, PathBuf)>,
    /// Chapters that failed, with the reason.
    pub failed: Vec<(u32, String)>,
}

/// Align every chapter of `transcript` against `book`, one tokio task per
/// chapter, writing one file per chapter into `out_dir`.
///
/// `audio_dir`, when given, supplies per-chapter WAV files (the transcript's
/// `filename` with a `.wav` extension) for silence detection; chapters
/// without audio align on token timestamps alone.
pub async fn run_batch(
    transcript: Transcript,
    book: Book,
    audio_dir: Option<PathBuf>,
    out_dir: PathBuf,
    config: Config,
) -> Result<BatchSummary> {
    std::fs::create_dir_all(&out_dir).map_err(|e| AlignError::WriteFailure {
        path: out_dir.clone(),
        message: e.to_string(),
    })?;

    let mut tasks: JoinSet<(u32, Result<PathBuf>)> = JoinSet::new();
    for chapter in transcript.chapters {
        let number = chapter.number;
        let text = book.chapter_text(number).map(str::to_owned);
        let audio_path = audio_dir
            .as_deref()
            .map(|dir| wav_path(dir, &chapter.filename));
        let out_dir = out_dir.clone();
        let config = config.clone();

        // Alignment is CPU-bound; keep it off the async workers.
        tasks.spawn_blocking(move || {
            (
                number,
                process_chapter(chapter, text, audio_path, &out_dir, &config),
            )
        });
    }

    let mut summary = BatchSummary::default();
    while let Some(joined) = tasks.join_next().await {
        let (number, result) = joined.map_err(|e| AlignError::ChapterAlignment {
            chapter: 0,
            message: format!("chapter task panicked: {}", e),
        })?;
        match result {
            Ok(path) => summary.written.push((number, path)),
            Err(e) => {
                warn!(chapter = number, error = %e, "chapter alignment failed");
                summary.failed.push((number, e.to_string()));
            }
        }
    }
    summary.written.sort_by_key(|(n, _)| *n);
    summary.failed.sort_by_key(|(n, _)| *n);

    info!(
        aligned = summary.written.len(),
        failed = summary.failed.len(),
        "batch complete"
    );
    Ok(summary)
}

/// Full single-chapter pipeline: inputs → alignment → file on disk.
fn process_chapter(
    chapter: TranscriptChapter,
    text: Option<String>,
    audio_path: Option<PathBuf>,
    out_dir: &Path,
    config: &Config,
) -> Result<PathBuf> {
    let number = chapter.number;
    let text = text.ok_or_else(|| AlignError::ChapterAlignment {
        chapter: number,
        message: "no matching chapter in the book text".to_string(),
    })?;

    let tokens = chapter.tokens();
    let sentences = split_sentences(&text);
    let silences = match audio_path {
        Some(ref path) if path.exists() => {
            let audio = ChapterAudio::load(path)?;
            SilenceSegmenter::new(config.silence_config())
                .segment(&audio.samples, audio.sample_rate)
        }
        Some(ref path) => {
            debug!(
                chapter = number,
                path = %path.display(),
                "no audio file; aligning without silence hints"
            );
            Vec::new()
        }
        None => Vec::new(),
    };

    info!(
        chapter = number,
        tokens = tokens.len(),
        sentences = sentences.len(),
        silences = silences.len(),
        "aligning chapter"
    );

    let alignment = align_chapter(number, &tokens, &sentences, &silences, config)?;
    writer::write_chapter(out_dir, &alignment)
}

/// Chapter WAV path: the transcript's source filename with a `.wav` extension.
fn wav_path(audio_dir: &Path, filename: &str) -> PathBuf {
    audio_dir.join(Path::new(filename).with_extension("wav"))
}
