//! core/archive.rs
//! Walk a zip archive and hand out its MP3 entries one at a time.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::debug;

use super::error::ArchiveError;

/// One MP3 file inside the archive.
///
/// Borrows the walker, so only one entry can be alive at a time and the next
/// call to [`ArchiveWalker::next_entry`] has to wait until this one is dropped.
pub struct Mp3Entry<'a> {
    /// Full name inside the archive, including directories.
    pub name: String,
    /// Uncompressed size as declared by the archive.
    pub size: u64,
    /// Unix mode recorded in the archive, if any.
    pub mode: Option<u32>,
    pub reader: Box<dyn Read + 'a>,
}

impl Mp3Entry<'_> {
    /// Last path component of the entry name.
    pub fn base_name(&self) -> &str {
        base_name(&self.name)
    }
}

/// Lazy, forward-only walk over the MP3 entries of a zip archive.
///
/// The archive handle lives as long as the walker and is closed on drop.
pub struct ArchiveWalker<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
    index: usize,
}

impl ArchiveWalker<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let file = File::open(path).map_err(|source| ArchiveError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(BufReader::new(file)).map_err(|e| match e {
            ArchiveError::NotZip(source) => ArchiveError::Invalid {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

impl<R: Read + Seek> ArchiveWalker<R> {
    pub fn new(reader: R) -> Result<Self, ArchiveError> {
        let archive = zip::ZipArchive::new(reader).map_err(ArchiveError::NotZip)?;
        Ok(Self { archive, index: 0 })
    }

    /// Total number of records in the archive, MP3 or not.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Next MP3 entry, or `None` once the archive is exhausted.
    ///
    /// Directories and files without an `.mp3` extension are skipped here and
    /// never reach the caller.
    pub fn next_entry(&mut self) -> Option<Result<Mp3Entry<'_>, ArchiveError>> {
        // Pick the index from the central directory name alone; only the chosen
        // MP3 record is opened for reading, so an unreadable non-MP3 record
        // (encrypted, odd compression) is skipped like any other.
        let index = loop {
            if self.index >= self.archive.len() {
                return None;
            }
            let index = self.index;
            self.index += 1;

            match self.archive.name_for_index(index) {
                Some(name) if !name.ends_with(['/', '\\']) && is_mp3(name) => break index,
                Some(name) => debug!(entry = name, "skipping non-mp3 entry"),
                None => debug!(index, "skipping record without a name"),
            }
        };

        let name = self
            .archive
            .name_for_index(index)
            .unwrap_or_default()
            .to_string();
        let file = match self.archive.by_index(index) {
            Ok(file) => file,
            Err(source) => return Some(Err(ArchiveError::Entry { name, source })),
        };

        Some(Ok(Mp3Entry {
            name,
            size: file.size(),
            mode: file.unix_mode(),
            reader: Box::new(file),
        }))
    }
}

/// Last `/`-separated component of an archive entry name.
pub(crate) fn base_name(name: &str) -> &str {
    name.trim_end_matches('/').rsplit('/').next().unwrap_or(name)
}

pub(crate) fn is_mp3(name: &str) -> bool {
    Path::new(base_name(name))
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::unstable::write::FileOptionsExt;
    use zip::write::SimpleFileOptions;

    fn zip_with(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            if name.ends_with('/') {
                writer
                    .add_directory(*name, SimpleFileOptions::default())
                    .unwrap();
            } else {
                writer.start_file(*name, SimpleFileOptions::default()).unwrap();
                writer.write_all(data.as_bytes()).unwrap();
            }
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn mp3_extension_is_case_insensitive() {
        assert!(is_mp3("Takeout/Google Play Music/Tracks/Song.mp3"));
        assert!(is_mp3("SONG.MP3"));
        assert!(is_mp3("a/b/Mixed.Mp3"));
        assert!(!is_mp3("cover.jpg"));
        assert!(!is_mp3("Tracks/playlist.csv"));
        assert!(!is_mp3("mp3"));
        assert!(!is_mp3("notes.mp3.txt"));
    }

    #[test]
    fn base_name_drops_directories() {
        assert_eq!(base_name("a/b/Track01.mp3"), "Track01.mp3");
        assert_eq!(base_name("Track01.mp3"), "Track01.mp3");
        assert_eq!(base_name("dir/"), "dir");
    }

    #[test]
    fn walker_yields_only_mp3_files() {
        let cursor = zip_with(&[
            ("Takeout/", ""),
            ("Takeout/archive_browser.html", "<html/>"),
            ("Takeout/Tracks/One.mp3", "one"),
            ("Takeout/Tracks/One.csv", "title,artist"),
            ("Takeout/Tracks/Two.MP3", "two"),
        ]);

        let mut walker = ArchiveWalker::new(cursor).unwrap();
        assert_eq!(walker.len(), 5);

        let mut names = Vec::new();
        while let Some(entry) = walker.next_entry() {
            let mut entry = entry.unwrap();
            let mut body = Vec::new();
            entry.reader.read_to_end(&mut body).unwrap();
            assert_eq!(body.len() as u64, entry.size);
            names.push((entry.base_name().to_string(), body));
        }

        assert_eq!(
            names,
            vec![
                ("One.mp3".to_string(), b"one".to_vec()),
                ("Two.MP3".to_string(), b"two".to_vec()),
            ]
        );
        assert!(walker.next_entry().is_none());
    }

    #[test]
    fn unreadable_non_mp3_record_is_skipped_quietly() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(
                "Takeout/secret.txt",
                SimpleFileOptions::default().with_deprecated_encryption(b"pw"),
            )
            .unwrap();
        writer.write_all(b"locked").unwrap();
        writer
            .start_file("Takeout/Song.mp3", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"song").unwrap();
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);

        let mut walker = ArchiveWalker::new(cursor).unwrap();
        let mut seen = Vec::new();
        while let Some(entry) = walker.next_entry() {
            seen.push(entry.map(|e| e.name).map_err(|e| e.to_string()));
        }

        assert_eq!(seen, vec![Ok("Takeout/Song.mp3".to_string())]);
    }

    #[test]
    fn unreadable_mp3_record_is_an_error_naming_the_entry() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(
                "Takeout/Locked.mp3",
                SimpleFileOptions::default().with_deprecated_encryption(b"pw"),
            )
            .unwrap();
        writer.write_all(b"locked").unwrap();
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);

        let mut walker = ArchiveWalker::new(cursor).unwrap();
        match walker.next_entry() {
            Some(Err(ArchiveError::Entry { name, .. })) => assert_eq!(name, "Takeout/Locked.mp3"),
            Some(Ok(e)) => panic!("expected an error, got entry {}", e.name),
            other => panic!("expected an error, got {:?}", other.map(|r| r.err())),
        }
        assert!(walker.next_entry().is_none());
    }

    #[test]
    fn new_rejects_non_zip_bytes_without_a_path() {
        let err = ArchiveWalker::new(Cursor::new(b"not a zip".to_vec()))
            .err()
            .expect("garbage should not parse");

        assert!(matches!(err, ArchiveError::NotZip(_)));
        assert!(err.to_string().starts_with("not a valid zip archive"));
    }

    #[test]
    fn open_rejects_non_zip_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a-zip.zip");
        std::fs::write(&path, b"definitely not a zip archive").unwrap();

        match ArchiveWalker::open(&path) {
            Err(ArchiveError::Invalid { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Invalid, got {:?}", other.err()),
        }
    }

    #[test]
    fn open_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.zip");
        assert!(matches!(
            ArchiveWalker::open(&path),
            Err(ArchiveError::Open { .. })
        ));
    }
}
