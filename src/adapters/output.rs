//! Output file sink

use crate::adapters::traits::EntrySink;
use crate::domain::{Result, ScrubError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How an existing output file is treated when the batch starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Append,
    Truncate,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Append => write!(f, "append"),
            Self::Truncate => write!(f, "truncate"),
        }
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "append" => Ok(Self::Append),
            "truncate" | "overwrite" => Ok(Self::Truncate),
            other => Err(format!(
                "Invalid output mode '{other}'. Must be 'append' or 'truncate'"
            )),
        }
    }
}

/// One file handle held for the whole batch
///
/// Every entry is flushed before [`EntrySink::write_entry`] returns, so a
/// crash mid-run leaves all previously written rows in the file.
pub struct FileSink {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    entries: usize,
}

impl FileSink {
    /// Open `path`, creating parent directories as needed
    pub fn open(path: impl AsRef<Path>, mode: OutputMode) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            OutputMode::Append => options.append(true),
            OutputMode::Truncate => options.write(true).truncate(true),
        };
        let file = options.open(path).map_err(|e| {
            ScrubError::Io(format!("Cannot open output file {}: {e}", path.display()))
        })?;

        tracing::debug!(output = %path.display(), mode = %mode, "Opened output file");

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path: path.to_path_buf(),
            entries: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> usize {
        self.entries
    }
}

impl EntrySink for FileSink {
    fn write_entry(&mut self, text: &str) -> Result<()> {
        let writer = self.writer.as_mut().ok_or_else(|| {
            ScrubError::Io(format!("Output file {} is already closed", self.path.display()))
        })?;
        write!(writer, "{text}\n\n")?;
        writer.flush()?;
        self.entries += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                tracing::warn!(output = %self.path.display(), error = %e, "Failed to flush output file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_entries_separated_by_blank_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        let mut sink = FileSink::open(&path, OutputMode::Truncate).unwrap();
        sink.write_entry("one").unwrap();
        sink.write_entry("two").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\n\ntwo\n\n");
        sink.finish().unwrap();
        assert_eq!(sink.entries(), 2);
    }

    #[test]
    fn test_append_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old\n\n").unwrap();

        let mut sink = FileSink::open(&path, OutputMode::Append).unwrap();
        sink.write_entry("new").unwrap();
        sink.finish().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\n\nnew\n\n");
    }

    #[test]
    fn test_truncate_discards_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old\n\n").unwrap();

        let mut sink = FileSink::open(&path, OutputMode::Truncate).unwrap();
        sink.write_entry("new").unwrap();
        sink.finish().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n\n");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/out.txt");
        let mut sink = FileSink::open(&path, OutputMode::Append).unwrap();
        sink.write_entry("x").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_after_finish_fails() {
        let dir = TempDir::new().unwrap();
        let mut sink = FileSink::open(dir.path().join("out.txt"), OutputMode::Append).unwrap();
        sink.finish().unwrap();
        assert!(sink.write_entry("late").is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("append".parse::<OutputMode>().unwrap(), OutputMode::Append);
        assert_eq!("TRUNCATE".parse::<OutputMode>().unwrap(), OutputMode::Truncate);
        assert!("rotate".parse::<OutputMode>().is_err());
    }
}
