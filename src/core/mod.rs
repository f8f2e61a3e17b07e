//! core/mod.rs
//!
//! The brain of the tool:
//! - Walk the zip archive for MP3 entries
//! - Extract each one into the working directory
//! - Read its tags and report them
//!
//! The pipeline is explicit and strictly sequential, one entry at a time:
//!   (A) archive::ArchiveWalker -> Mp3Entry
//!   (B) extract::extract(entry, work_dir) -> Extraction
//!   (C) tags::read_metadata(path) -> TrackMetadata
//!
//! Only failing to open the archive stops a run. Anything that goes wrong
//! with a single entry is reported, counted, and the walk moves on.

pub mod archive;
pub mod config;
pub mod error;
pub mod extract;
pub mod probe;
pub mod report;
pub mod tags;
pub mod types;

use std::io::{self, Read, Seek, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use archive::{ArchiveWalker, Mp3Entry};
use config::Config;
use error::{ArchiveError, RunError};
use types::{EntryStatus, RunSummary};

/// Open the configured archive and run every MP3 in it through the pipeline.
///
/// `out` receives the operator report.
pub fn run(config: &Config, out: &mut impl Write) -> Result<RunSummary, RunError> {
    let mut walker = ArchiveWalker::open(&config.archive)?;
    info!(
        archive = %config.archive.display(),
        records = walker.len(),
        "opened archive"
    );

    let summary = process_archive(&mut walker, &config.work_dir, out)?;

    report::write_summary(out, &summary)?;
    info!(
        entries = summary.entries,
        created = summary.created,
        already_present = summary.already_present,
        extract_failures = summary.extract_failures,
        metadata_failures = summary.metadata_failures,
        "run finished"
    );
    Ok(summary)
}

/// Walk an already opened archive. Used by [`run`]; callers with an in-memory
/// archive can drive it directly.
pub fn process_archive<R: Read + Seek>(
    walker: &mut ArchiveWalker<R>,
    work_dir: &Path,
    out: &mut impl Write,
) -> io::Result<RunSummary> {
    let mut summary = RunSummary::default();

    while let Some(next) = walker.next_entry() {
        let status = match next {
            Ok(mut entry) => process_entry(&mut entry, work_dir, out)?,
            Err(ArchiveError::Entry { name, source }) => {
                warn!(entry = %name, error = %source, "skipping unreadable archive entry");
                report::write_unreadable_entry(out, &name, &source)?;
                EntryStatus::ExtractFailed(source.to_string())
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable archive entry");
                writeln!(out, "   ERROR - {e}")?;
                EntryStatus::ExtractFailed(e.to_string())
            }
        };
        summary.record(&status);
    }

    Ok(summary)
}

/// Extract one entry, then read and report its tags.
///
/// An entry that already exists in `work_dir` is not rewritten, but its tags
/// are still read from the file that is there.
pub fn process_entry(
    entry: &mut Mp3Entry<'_>,
    work_dir: &Path,
    out: &mut impl Write,
) -> io::Result<EntryStatus> {
    let extracted = extract::extract(entry, work_dir);
    report::write_extraction(out, &entry.name, &extracted)?;

    let extraction = match extracted {
        Ok(x) => x,
        Err(e) => {
            warn!(entry = %entry.name, error = %e, "extraction failed");
            return Ok(EntryStatus::ExtractFailed(e.to_string()));
        }
    };
    debug!(entry = %entry.name, outcome = ?extraction.outcome, "extracted");

    match tags::read_metadata(&extraction.path) {
        Ok(metadata) => {
            let stream = probe::probe_stream(&extraction.path);
            report::write_metadata(out, &metadata, stream.as_ref())?;
            Ok(EntryStatus::Reported {
                outcome: extraction.outcome,
                metadata,
            })
        }
        Err(e) => {
            warn!(path = %extraction.path.display(), error = %e, "metadata read failed");
            report::write_metadata_error(out, &e)?;
            Ok(EntryStatus::MetadataFailed {
                outcome: extraction.outcome,
                reason: e.to_string(),
            })
        }
    }
}
