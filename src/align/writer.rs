//! Alignment writer.
//!
//! Persists one JSON file per chapter. Writes go to a temp file in the
//! destination directory and are renamed into place, so a crash mid-write
//! never leaves a corrupt partial file visible to downstream readers.

use crate::align::types::ChapterAlignment;
use crate::error::{AlignError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output path for one chapter inside `out_dir`. The one-file-per-chapter
/// naming is a contract downstream consumers rely on.
pub fn chapter_path(out_dir: &Path, chapter: u32) -> PathBuf {
    out_dir.join(format!("chapter_{}_alignment.json", chapter))
}

/// Serialize `alignment` to its chapter file under `out_dir`, atomically.
pub fn write_chapter(out_dir: &Path, alignment: &ChapterAlignment) -> Result<PathBuf> {
    let path = chapter_path(out_dir, alignment.chapter);
    let json = serde_json::to_vec_pretty(alignment)?;

    // Temp file must live on the same filesystem as the target for the
    // rename to be atomic.
    let tmp_path = out_dir.join(format!(".chapter_{}_alignment.json.tmp", alignment.chapter));
    let write_err = |e: std::io::Error| AlignError::WriteFailure {
        path: path.clone(),
        message: e.to_string(),
    };

    let mut file = fs::File::create(&tmp_path).map_err(write_err)?;
    file.write_all(&json).map_err(write_err)?;
    file.sync_all().map_err(write_err)?;
    drop(file);
    fs::rename(&tmp_path, &path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        AlignError::WriteFailure {
            path: path.clone(),
            message: e.to_string(),
        }
    })?;

    info!(
        chapter = alignment.chapter,
        records = alignment.records.len(),
        path = %path.display(),
        "wrote chapter alignment"
    );
    Ok(path)
}
