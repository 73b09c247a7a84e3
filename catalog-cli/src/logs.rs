//! Log file location, rotation and logger setup.
//!
//! Logs go to the platform cache directory (XDG on Linux, standard locations
//! on macOS/Windows), falling back to the working directory.

use std::fs;
use std::fs::File;
use std::path::PathBuf;

use directories::ProjectDirs;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::CliError;

const LATEST_LOG: &str = "latest.log";

/// Archived logs kept besides `latest.log`.
const KEEP_ARCHIVED: usize = 25;

/// The directory holding `latest.log` and its archived predecessors.
pub struct LogDir {
    dir: PathBuf,
}

impl LogDir {
    /// Platform cache directory for the catalog, or the working directory.
    pub fn locate() -> Self {
        let dir = ProjectDirs::from("dev", "catalog", "character-catalog")
            .map(|dirs| dirs.cache_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self { dir }
    }

    /// Uses an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn latest(&self) -> PathBuf {
        self.dir.join(LATEST_LOG)
    }

    /// Renames `latest.log` to a timestamped name and prunes old archives.
    pub fn rotate(&self) {
        let latest = self.latest();
        if latest.exists() {
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            let _ = fs::rename(&latest, self.dir.join(format!("{stamp}.log")));
        }
        self.prune(KEEP_ARCHIVED);
    }

    /// Deletes all but the `keep` most recently modified archived logs.
    pub fn prune(&self, keep: usize) {
        let Ok(entries) = fs::read_dir(&self.dir) else { return };

        let mut archived: Vec<_> = entries
            .filter_map(Result::ok)
            .filter(|entry| {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                name.ends_with(".log") && name != LATEST_LOG
            })
            .collect();
        if archived.len() <= keep {
            return;
        }

        // Newest first, so everything past `keep` goes.
        archived.sort_by_key(|entry| std::cmp::Reverse(entry.metadata().and_then(|m| m.modified()).ok()));
        for entry in archived.iter().skip(keep) {
            let _ = fs::remove_file(entry.path());
        }
    }

    /// Rotates, then routes the `log` facade into a fresh `latest.log`.
    pub fn init_logger(&self, level: LevelFilter) -> Result<PathBuf, CliError> {
        fs::create_dir_all(&self.dir)?;
        self.rotate();

        let path = self.latest();
        let file = File::create(&path)?;
        WriteLogger::init(level, Config::default(), file)
            .map_err(|e| CliError::Logger(e.to_string()))?;
        Ok(path)
    }
}
