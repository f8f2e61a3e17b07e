//! Takeout
//!
//! # What this program is
//! A small command-line tool that pulls the `.mp3` files out of a Google
//! Takeout music export (a zip file), drops them into a working directory,
//! and prints the ID3 tags of each one (title, artist, album, album artist,
//! disc and track numbers).
//!
//! # How a run goes
//! - Paths are resolved once, up front (command line, then environment, then
//!   defaults under the home directory).
//! - The output and working directories are created if needed.
//! - Every MP3 entry is extracted, then its tags are read and printed.
//! - A file that is already in the working directory is not extracted again,
//!   but its tags are still reported.
//! - One bad file never stops the run; it is reported and counted.
//!
//! The report goes to stdout. Logs go to stderr and follow `RUST_LOG`
//! (default `takeout=info`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use takeout::core::config::Config;

/// Command-line arguments for takeout
#[derive(Parser, Debug)]
#[command(name = "takeout")]
#[command(about = "Extract MP3s from a Google Takeout zip and report their tags")]
#[command(version)]
struct Args {
    /// Zip archive to read
    #[arg(env = "TAKEOUT_ARCHIVE")]
    archive: PathBuf,

    /// Output root [default: ~/Music/takeout]
    #[arg(short, long, env = "TAKEOUT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Working directory extracted files are written to [default: <output-dir>/tmp]
    #[arg(short, long, env = "TAKEOUT_WORK_DIR")]
    work_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "takeout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    info!("Takeout {}", env!("CARGO_PKG_VERSION"));

    let config = Config::resolve(args.archive, args.output_dir, args.work_dir)
        .context("failed to resolve directories")?;
    config
        .ensure_dirs()
        .context("failed to prepare output directories")?;

    info!("Archive: {}", config.archive.display());
    info!("Working directory: {}", config.work_dir.display());

    let stdout = std::io::stdout();
    let summary = takeout::core::run(&config, &mut stdout.lock())?;

    info!(
        "Done: {} of {} mp3 entries processed cleanly",
        summary.succeeded(),
        summary.entries
    );
    Ok(())
}
