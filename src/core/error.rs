//! core/error.rs
//!
//! One error enum per stage. Only `SetupError` and `ArchiveError` stop a run;
//! `ExtractError` and `MetadataError` are per-entry and the pipeline keeps going.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("failed to create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("{path} exists but is not a directory")]
    NotADirectory { path: PathBuf },
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("failed to open archive {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("{path} is not a valid zip archive: {source}")]
    Invalid {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    #[error("not a valid zip archive: {0}")]
    NotZip(#[source] zip::result::ZipError),

    #[error("failed to read archive entry '{name}': {source}")]
    Entry {
        name: String,
        source: zip::result::ZipError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("entry '{entry}' has no usable file name")]
    InvalidName { entry: String },

    #[error("failed to create {path}: {source}")]
    DestinationCreate { path: PathBuf, source: io::Error },

    #[error("failed to copy '{entry}' to {path}: {source}")]
    Copy {
        entry: String,
        path: PathBuf,
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("failed to open {path}: {source}")]
    FileOpen { path: PathBuf, source: io::Error },

    #[error("no readable tag in {path}: {source}")]
    TagParse { path: PathBuf, source: id3::Error },
}

/// Errors that end a run early. Per-entry problems never show up here.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("failed to write report: {0}")]
    Report(#[from] io::Error),
}
