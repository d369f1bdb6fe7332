//! readalign binary: load inputs, run the batch, report the outcome.

use anyhow::Context;
use clap::Parser;
use readalign::cli::Cli;
use readalign::{run_batch, Book, Config, Transcript};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config =
        Config::load_or_default(cli.config.as_deref()).context("loading configuration")?;
    if cli.skip_front_matter {
        config.matcher.skip_front_matter = true;
    }
    let transcript = Transcript::load(&cli.transcript).context("loading transcript")?;
    let book = Book::load(&cli.book).context("loading book text")?;

    let summary = run_batch(transcript, book, cli.audio_dir, cli.out_dir, config).await?;

    for (chapter, reason) in &summary.failed {
        eprintln!("chapter {}: {}", chapter, reason);
    }
    if summary.written.is_empty() {
        anyhow::bail!("no chapter could be aligned");
    }
    Ok(())
}
