//! Append-only line writer with size-based rotation.
//!
//! When the next line would push the active file past its size limit, the
//! file is shifted into numbered backups (`name.1` newest, `name.N` oldest)
//! and a fresh file is started. The oldest backup beyond the limit is dropped.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Size at which the active trace file is rotated (10 MB).
const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept next to the active file.
const DEFAULT_BACKUPS: usize = 3;

/// Line writer that rotates its file by size.
#[derive(Debug)]
pub struct RotatingWriter {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    /// Open handle and the number of bytes already in the file.
    active: Option<(File, u64)>,
}

impl RotatingWriter {
    /// Writer with the default limits. Nothing is opened until the first write.
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_BACKUPS)
    }

    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            active: None,
        }
    }

    /// Appends `line` plus a newline, rotating first if it would not fit.
    ///
    /// A line larger than the limit is still written, alone in a fresh file.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from opening, renaming or writing files.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        let incoming = line.len() as u64 + 1;

        let max_bytes = self.max_bytes;
        let current = self.open()?.1;
        if current > 0 && current + incoming > max_bytes {
            self.active = None;
            self.rotate()?;
        }

        let (file, written) = self.open()?;
        writeln!(file, "{line}")?;
        file.flush()?;
        *written += incoming;
        Ok(())
    }

    fn open(&mut self) -> io::Result<&mut (File, u64)> {
        if self.active.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            let written = file.metadata()?.len();
            self.active = Some((file, written));
        }
        self.active
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file not open"))
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = backup_path(&self.path, self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.backups).rev() {
            let from = backup_path(&self.path, index);
            if from.exists() {
                fs::rename(&from, backup_path(&self.path, index + 1))?;
            }
        }
        fs::rename(&self.path, backup_path(&self.path, 1))
    }
}

/// `path` with `.{index}` appended to its file name.
fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{index}"));
    PathBuf::from(name)
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
    fn test_appends_without_rotation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("otlp.json");
        let mut writer = RotatingWriter::with_limits(path.clone(), 1024, 2);

        writer.write_line("one").unwrap();
        writer.write_line("two").unwrap();

        assert_eq!(lines(&path), vec!["one", "two"]);
        assert!(!backup_path(&path, 1).exists());
    }

    #[test]
    fn test_rotates_into_numbered_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("otlp.json");
        let mut writer = RotatingWriter::with_limits(path.clone(), 8, 2);

        for line in ["aaaa", "bbbb", "cccc", "dddd"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(lines(&path), vec!["dddd"]);
        assert_eq!(lines(&backup_path(&path, 1)), vec!["cccc"]);
        assert_eq!(lines(&backup_path(&path, 2)), vec!["bbbb"]);
        assert!(!backup_path(&path, 3).exists());
    }

    #[test]
    fn test_resumes_size_of_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("otlp.json");
        fs::write(&path, "previous\n").unwrap();

        let mut writer = RotatingWriter::with_limits(path.clone(), 12, 1);
        writer.write_line("next").unwrap();

        assert_eq!(lines(&path), vec!["next"]);
        assert_eq!(lines(&backup_path(&path, 1)), vec!["previous"]);
    }

    #[test]
    fn test_oversized_line_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("otlp.json");
        let mut writer = RotatingWriter::with_limits(path.clone(), 4, 1);

        writer.write_line("much longer than four bytes").unwrap();
        assert_eq!(lines(&path), vec!["much longer than four bytes"]);
    }

    #[test]
    fn test_backup_path() {
        assert_eq!(
            backup_path(Path::new("/data/hnpane-otlp.json"), 2),
            PathBuf::from("/data/hnpane-otlp.json.2")
        );
    }
}
