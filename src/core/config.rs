//! core/config.rs
//! Paths for one run, resolved once before anything is extracted.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::error::SetupError;

/// Default output root, relative to the home directory.
const DEFAULT_OUTPUT_DIR: [&str; 2] = ["Music", "takeout"];
/// Working directory name under the output root.
const WORK_SUBDIR: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Zip archive to read.
    pub archive: PathBuf,
    /// Root of the organised library.
    pub output_dir: PathBuf,
    /// Scratch directory extracted files land in.
    pub work_dir: PathBuf,
}

impl Config {
    /// Resolve paths with fallbacks:
    /// 1. explicit value (command line / environment)
    /// 2. `~/Music/takeout` for the output root
    /// 3. `<output root>/tmp` for the working directory
    ///
    /// The home directory is only looked up when a default needs it.
    pub fn resolve(
        archive: PathBuf,
        output_dir: Option<PathBuf>,
        work_dir: Option<PathBuf>,
    ) -> Result<Self, SetupError> {
        Self::resolve_with_home(archive, output_dir, work_dir, dirs::home_dir)
    }

    fn resolve_with_home(
        archive: PathBuf,
        output_dir: Option<PathBuf>,
        work_dir: Option<PathBuf>,
        home: impl FnOnce() -> Option<PathBuf>,
    ) -> Result<Self, SetupError> {
        let output_dir = match output_dir {
            Some(dir) => dir,
            None => {
                let mut dir = home().ok_or(SetupError::NoHomeDir)?;
                dir.extend(DEFAULT_OUTPUT_DIR);
                dir
            }
        };
        let work_dir = work_dir.unwrap_or_else(|| output_dir.join(WORK_SUBDIR));

        Ok(Self {
            archive,
            output_dir,
            work_dir,
        })
    }

    /// Create the output and working directories if they are missing.
    pub fn ensure_dirs(&self) -> Result<(), SetupError> {
        for dir in [&self.output_dir, &self.work_dir] {
            ensure_dir(dir)?;
        }
        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> Result<(), SetupError> {
    if dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        return Err(SetupError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    info!("Creating directory: {}", dir.display());
    fs::create_dir_all(dir).map_err(|source| SetupError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_hang_off_home() {
        let cfg = Config::resolve_with_home("in.zip".into(), None, None, || {
            Some(PathBuf::from("/home/me"))
        })
        .unwrap();

        assert_eq!(cfg.output_dir, PathBuf::from("/home/me/Music/takeout"));
        assert_eq!(cfg.work_dir, PathBuf::from("/home/me/Music/takeout/tmp"));
    }

    #[test]
    fn explicit_paths_win_and_skip_home_lookup() {
        let cfg = Config::resolve_with_home(
            "in.zip".into(),
            Some("/srv/music".into()),
            Some("/scratch".into()),
            || panic!("home lookup should not run"),
        )
        .unwrap();

        assert_eq!(cfg.output_dir, PathBuf::from("/srv/music"));
        assert_eq!(cfg.work_dir, PathBuf::from("/scratch"));
    }

    #[test]
    fn work_dir_follows_explicit_output_dir() {
        let cfg =
            Config::resolve_with_home("in.zip".into(), Some("/srv/music".into()), None, || None)
                .unwrap();
        assert_eq!(cfg.work_dir, PathBuf::from("/srv/music/tmp"));
    }

    #[test]
    fn no_home_is_a_setup_error() {
        let err = Config::resolve_with_home("in.zip".into(), None, None, || None).unwrap_err();
        assert!(matches!(err, SetupError::NoHomeDir));
    }

    #[test]
    fn ensure_dirs_creates_nested_directories() {
        let root = tempfile::tempdir().unwrap();
        let cfg = Config {
            archive: root.path().join("in.zip"),
            output_dir: root.path().join("Music/takeout"),
            work_dir: root.path().join("Music/takeout/tmp"),
        };

        cfg.ensure_dirs().unwrap();
        cfg.ensure_dirs().unwrap();

        assert!(cfg.work_dir.is_dir());
    }

    #[test]
    fn file_in_place_of_directory_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("out");
        fs::write(&blocker, b"").unwrap();

        let cfg = Config {
            archive: root.path().join("in.zip"),
            output_dir: blocker.clone(),
            work_dir: blocker.join("tmp"),
        };

        assert!(matches!(
            cfg.ensure_dirs(),
            Err(SetupError::NotADirectory { .. })
        ));
    }
}
