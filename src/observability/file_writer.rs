//! Append-only trace file with size-based rotation.
//!
//! Once the file passes [`MAX_FILE_SIZE_BYTES`] it is renamed to
//! `<stem>.json.<unix-seconds>` and a fresh file is started. At most
//! [`MAX_BACKUP_FILES`] rotated files are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_BACKUP_FILES: usize = 3;

pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Opened on the first write.
    file: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing the file, and
    /// an error if a previous writer panicked while holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            *guard = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            );
        }
        let file = guard
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file not open"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        let mut backup = self.file_path.with_extension(format!("json.{stamp}"));
        // Two rotations within the same second must not overwrite each other.
        let mut suffix = 1;
        while backup.exists() {
            backup = self.file_path.with_extension(format!("json.{stamp}-{suffix}"));
            suffix += 1;
        }

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup)?;
        }
        self.prune_backups()
    }

    fn prune_backups(&self) -> io::Result<()> {
        let dir = self.file_path.parent().unwrap_or_else(|| Path::new("."));
        let Some(stem) = self.file_path.file_stem().and_then(|s| s.to_str()) else {
            return Ok(());
        };
        let prefix = format!("{stem}.json.");

        let mut backups: Vec<(PathBuf, Option<SystemTime>)> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_str().is_some_and(|n| n.starts_with(&prefix)))
            .map(|entry| {
                let modified = entry.metadata().and_then(|m| m.modified()).ok();
                (entry.path(), modified)
            })
            .collect();

        // Newest first; ties broken by name so the order is stable.
        backups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

        for (old, _) in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(old);
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups_in(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().contains(".json."))
            .count()
    }

    #[test]
    fn appends_one_line_per_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sanction-check-otlp.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line(r#"{"a":1}"#).unwrap();
        writer.write_line(r#"{"b":2}"#).unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_past_the_size_limit_and_keeps_few_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sanction-check-otlp.json");
        let writer = FileWriter::with_limits(path.clone(), 8, 2);

        for i in 0..6 {
            writer.write_line(&format!("span batch number {i}")).unwrap();
        }

        assert_eq!(backups_in(dir.path()), 2);
        assert_eq!(fs::read_to_string(path).unwrap(), "span batch number 5\n");
    }
}
