//! Core data types shared between the pipeline stages and the report.
//!
//! Rule of thumb:
//! - These structs are plain bags of data
//! - No zip code
//! - No tag parsing code
//!
//! `TrackMetadata` is ONE extracted file plus the tag fields we report.

use std::path::PathBuf;
use std::time::Duration;

/// What the Extractor did with one archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// The file was written fresh.
    Created,
    /// A regular file with the same base name was already in the working
    /// directory; it was left untouched.
    AlreadyExists,
}

/// Result of a successful extraction: where the file lives and how it got there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub path: PathBuf,
    pub outcome: ExtractOutcome,
}

/// Tag metadata read from one MP3.
///
/// Numbers are 0 when the tag does not carry them, so the report can print
/// "0 of 0" the same way for every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    /// Tag container, e.g. "ID3v2.4" or "ID3v1".
    pub format: String,

    pub title: String,
    pub album: String,
    pub artist: String,
    pub album_artist: String,

    pub disc: u32,
    pub disc_total: u32,
    pub track: u32,
    pub track_total: u32,
}

/// Audio stream properties, best effort.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    pub codec: String,
    pub sample_rate: Option<u32>,
    pub channels: Option<usize>,
    pub duration: Option<Duration>,
}

/// Final state of one MP3 entry after the whole pipeline ran over it.
#[derive(Debug)]
pub enum EntryStatus {
    Reported {
        outcome: ExtractOutcome,
        metadata: TrackMetadata,
    },
    ExtractFailed(String),
    MetadataFailed {
        outcome: ExtractOutcome,
        reason: String,
    },
}

/// Counters for one run over an archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// MP3 entries seen in the archive.
    pub entries: usize,
    pub created: usize,
    pub already_present: usize,
    pub extract_failures: usize,
    pub metadata_failures: usize,
}

impl RunSummary {
    pub(crate) fn record(&mut self, status: &EntryStatus) {
        self.entries += 1;
        match status {
            EntryStatus::Reported { outcome, .. } => self.count_outcome(*outcome),
            EntryStatus::ExtractFailed(_) => self.extract_failures += 1,
            EntryStatus::MetadataFailed { outcome, .. } => {
                self.count_outcome(*outcome);
                self.metadata_failures += 1;
            }
        }
    }

    fn count_outcome(&mut self, outcome: ExtractOutcome) {
        match outcome {
            ExtractOutcome::Created => self.created += 1,
            ExtractOutcome::AlreadyExists => self.already_present += 1,
        }
    }

    /// Entries that went through without any failure.
    pub fn succeeded(&self) -> usize {
        self.entries - self.extract_failures - self.metadata_failures
    }
}
