//! Rotating log file with size-based rotation and numbered backups.
//!
//! The plugin's stdout is the rendered UI, so log output goes to a file in
//! the plugin data directory instead. When the file would grow past its size
//! limit it is shifted to `<name>.1`, older backups move up by one, and the
//! oldest beyond the retention limit is removed:
//!
//! ```text
//! zadmin.log   → zadmin.log.1
//! zadmin.log.1 → zadmin.log.2
//! zadmin.log.2 → zadmin.log.3
//! zadmin.log.3 → (removed)
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

/// Open handle and the number of bytes already in the file.
#[derive(Debug)]
struct Current {
    file: File,
    len: u64,
}

/// Thread-safe rotating log file, usable as a `tracing-subscriber` writer.
///
/// The file is opened lazily on the first write, so construction succeeds
/// even when the directory does not exist yet.
///
/// # Example
///
/// ```rust
/// use std::io::Write;
/// use zadmin::observability::RotatingFile;
///
/// let dir = tempfile::tempdir().unwrap();
/// let log = RotatingFile::with_limits(dir.path().join("zadmin.log"), 64, 2);
/// (&log).write_all(b"page switched\n").unwrap();
/// ```
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    current: Mutex<Option<Current>>,
}

impl RotatingFile {
    /// Creates a writer with the default limits (10 MB, 3 backups).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Creates a writer rotating at `max_bytes` and keeping `backups` old files.
    #[must_use]
    pub fn with_limits(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> Self {
        Self {
            path: path.into(),
            max_bytes,
            backups,
            current: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of backup number `n` (1 is the newest).
    fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn open(&self) -> io::Result<Current> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let len = file.metadata()?.len();
        Ok(Current { file, len })
    }

    /// Shifts the backups up by one and moves the live file to `.1`.
    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            };
        }

        let oldest = self.backup_path(self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        if self.path.exists() {
            fs::rename(&self.path, self.backup_path(1))?;
        }
        Ok(())
    }

    fn write_bytes(&self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .current
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("log file lock poisoned: {e}")))?;

        let incoming = buf.len() as u64;
        let needs_rotation = match guard.as_ref() {
            Some(current) => current.len > 0 && current.len + incoming > self.max_bytes,
            None => fs::metadata(&self.path)
                .is_ok_and(|m| m.len() > 0 && m.len() + incoming > self.max_bytes),
        };
        if needs_rotation {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            *guard = Some(self.open()?);
        }
        let Some(current) = guard.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "log file unavailable"));
        };
        current.file.write_all(buf)?;
        current.len += incoming;
        Ok(buf.len())
    }
}

impl Write for &RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .current
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("log file lock poisoned: {e}")))?;
        match guard.as_mut() {
            Some(current) => current.file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = &'a Self;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn appends_until_limit_then_rotates() {
        let dir = tempfile::tempdir().unwrap();
        let log = RotatingFile::with_limits(dir.path().join("zadmin.log"), 13, 2);

        (&log).write_all(b"first\n").unwrap();
        (&log).write_all(b"second\n").unwrap();
        assert_eq!(lines(log.path()), vec!["first", "second"]);

        (&log).write_all(b"third\n").unwrap();
        assert_eq!(lines(log.path()), vec!["third"]);
        assert_eq!(lines(&log.backup_path(1)), vec!["first", "second"]);
    }

    #[test]
    fn keeps_at_most_the_configured_backups() {
        let dir = tempfile::tempdir().unwrap();
        let log = RotatingFile::with_limits(dir.path().join("zadmin.log"), 4, 2);

        for line in ["aaa\n", "bbb\n", "ccc\n", "ddd\n"] {
            (&log).write_all(line.as_bytes()).unwrap();
        }

        assert_eq!(lines(log.path()), vec!["ddd"]);
        assert_eq!(lines(&log.backup_path(1)), vec!["ccc"]);
        assert_eq!(lines(&log.backup_path(2)), vec!["bbb"]);
        assert!(!log.backup_path(3).exists());
    }

    #[test]
    fn existing_file_size_counts_towards_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zadmin.log");
        fs::write(&path, "0123456789\n").unwrap();

        let log = RotatingFile::with_limits(&path, 12, 1);
        (&log).write_all(b"next\n").unwrap();
        assert_eq!(lines(&path), vec!["next"]);
        assert_eq!(lines(&log.backup_path(1)), vec!["0123456789"]);
    }
}
