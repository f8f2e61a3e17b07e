//! core/extract.rs
//! Copy one archive entry into the working directory.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

use super::archive::Mp3Entry;
use super::error::ExtractError;
use super::types::{ExtractOutcome, Extraction};

/// Permission bits used when the archive does not record a unix mode.
const DEFAULT_MODE: u32 = 0o644;

/// Extract `entry` to `dest_dir/<base name>`.
///
/// An existing regular file at the target is never overwritten; the caller
/// gets its path back with [`ExtractOutcome::AlreadyExists`].
///
/// Existence check and creation are a single `create_new` open, so nothing can
/// slip in between them. If the copy fails the half-written file is removed.
pub fn extract(entry: &mut Mp3Entry<'_>, dest_dir: &Path) -> Result<Extraction, ExtractError> {
    let base = entry.base_name();
    if base.is_empty() || base == "." || base == ".." {
        return Err(ExtractError::InvalidName {
            entry: entry.name.clone(),
        });
    }
    let path = dest_dir.join(base);

    let mut dest = match create_new(&path, entry.mode.unwrap_or(DEFAULT_MODE)) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_file() => {
            debug!(path = %path.display(), "destination already exists");
            return Ok(Extraction {
                path,
                outcome: ExtractOutcome::AlreadyExists,
            });
        }
        Err(source) => return Err(ExtractError::DestinationCreate { path, source }),
    };

    let copied = io::copy(&mut entry.reader, &mut dest).and_then(|n| {
        dest.flush()?;
        Ok(n)
    });
    drop(dest);

    match copied {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes, "extracted");
            Ok(Extraction {
                path,
                outcome: ExtractOutcome::Created,
            })
        }
        Err(source) => {
            let _ = fs::remove_file(&path);
            Err(ExtractError::Copy {
                entry: entry.name.clone(),
                path,
                source,
            })
        }
    }
}

fn create_new(path: &Path, mode: u32) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode & 0o777);
    }
    #[cfg(not(unix))]
    let _ = mode;

    options.open(path)
}
