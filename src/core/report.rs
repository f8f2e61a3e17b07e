//! core/report.rs
//!
//! Operator-facing report: a few aligned lines per MP3, then a summary.
//! This is for people to read, not a machine format.

use std::io::{self, Write};
use std::time::Duration;

use super::error::{ExtractError, MetadataError};
use super::types::{ExtractOutcome, Extraction, RunSummary, StreamInfo, TrackMetadata};

pub fn write_extraction(
    out: &mut impl Write,
    name: &str,
    result: &Result<Extraction, ExtractError>,
) -> io::Result<()> {
    match result {
        Ok(extraction) => {
            let status = match extraction.outcome {
                ExtractOutcome::Created => "Done",
                ExtractOutcome::AlreadyExists => "SKIPPED - already extracted",
            };
            writeln!(out, "   Unzipping {name}... {status}")?;
            writeln!(out, "{}", extraction.path.display())
        }
        Err(e) => writeln!(out, "   Unzipping {name}... ERROR - {e}"),
    }
}

/// Report line for an archive record that could not be opened for reading.
pub fn write_unreadable_entry(
    out: &mut impl Write,
    name: &str,
    reason: &impl std::fmt::Display,
) -> io::Result<()> {
    writeln!(out, "   Unzipping {name}... ERROR - {reason}")
}

pub fn write_metadata(
    out: &mut impl Write,
    m: &TrackMetadata,
    stream: Option<&StreamInfo>,
) -> io::Result<()> {
    writeln!(out, "{:>14}: {}", "Format", m.format)?;
    writeln!(out, "{:>14}: {}", "Title", m.title)?;
    writeln!(out, "{:>14}: {} of {}", "Disc", m.disc, m.disc_total)?;
    writeln!(out, "{:>14}: {} of {}", "Track", m.track, m.track_total)?;
    writeln!(out, "{:>14}: {}", "Album", m.album)?;
    writeln!(out, "{:>14}: {}", "Artist", m.artist)?;
    writeln!(out, "{:>14}: {}", "AlbumArtist", m.album_artist)?;
    if let Some(s) = stream {
        writeln!(out, "{:>14}: {}", "Stream", stream_line(s))?;
    }
    Ok(())
}

pub fn write_metadata_error(out: &mut impl Write, e: &MetadataError) -> io::Result<()> {
    writeln!(out, "{:>14}: ERROR - {e}", "Metadata")
}

pub fn write_summary(out: &mut impl Write, s: &RunSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{} mp3 entries: {} extracted, {} already present, {} extraction failures, {} metadata failures",
        s.entries, s.created, s.already_present, s.extract_failures, s.metadata_failures
    )
}

fn stream_line(s: &StreamInfo) -> String {
    let mut parts = vec![s.codec.clone()];
    if let Some(rate) = s.sample_rate {
        parts.push(format!("{rate} Hz"));
    }
    if let Some(ch) = s.channels {
        parts.push(format!("{ch} ch"));
    }
    if let Some(d) = s.duration {
        parts.push(format_duration(d));
    }
    parts.join(", ")
}

/// "m:ss", or "h:mm:ss" past an hour.
fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}
