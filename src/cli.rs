//! Command-line interface for readalign.
//!
//! Thin plumbing over the engine: argument parsing via clap derive; the
//! alignment contract itself lives in [`crate::engine`].

use clap::Parser;
use std::path::PathBuf;

/// Align audiobook chapters with ebook text, sentence by sentence.
#[derive(Parser, Debug)]
#[command(name = "readalign", version, about = "Audiobook/ebook sentence alignment")]
pub struct Cli {
    /// Transcript JSON from the speech-recognition stage (word timestamps per chapter)
    #[arg(long, value_name = "PATH")]
    pub transcript: PathBuf,

    /// Book JSON from the ebook-parsing stage (plain text per chapter)
    #[arg(long, value_name = "PATH")]
    pub book: PathBuf,

    /// Directory of per-chapter WAV files for silence detection (optional)
    #[arg(long, value_name = "DIR")]
    pub audio_dir: Option<PathBuf>,

    /// Directory for per-chapter alignment JSON files
    #[arg(long, short, value_name = "DIR", default_value = "alignments")]
    pub out_dir: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip narrated front matter (e.g. a LibriVox intro) up to the first
    /// chapter header in each stream
    #[arg(long)]
    pub skip_front_matter: bool,

    /// Suppress progress output (quiet mode)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output (-v: per-chapter detail, -vv: full trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter directive for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "readalign=error"
        } else {
            match self.verbose {
                0 => "readalign=info",
                1 => "readalign=debug",
                _ => "readalign=trace",
            }
        }
    }
}
