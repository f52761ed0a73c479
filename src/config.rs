//! Filesystem locations used by the application. There is no config file;
//! everything lives in a dot-folder beneath the user's home directory.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".attendance-tracker";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "attendance.db";
/// Log file written next to the database. The terminal belongs to the UI.
const LOG_FILE_NAME: &str = "attendance.log";

/// Resolved paths for the database and the log file.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_path: PathBuf,
}

impl AppPaths {
    /// Resolve the default locations inside the user's home.
    pub fn resolve() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::in_dir(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Lay the files out inside an explicit directory.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            db_path: data_dir.join(DB_FILE_NAME),
            log_path: data_dir.join(LOG_FILE_NAME),
            data_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_inside_the_data_dir() {
        let paths = AppPaths::in_dir("/tmp/attendance-test");
        assert_eq!(paths.db_path, Path::new("/tmp/attendance-test/attendance.db"));
        assert_eq!(paths.log_path, Path::new("/tmp/attendance-test/attendance.log"));
        assert_eq!(paths.data_dir, Path::new("/tmp/attendance-test"));
    }
}
