//! Size-based rotating file appender
//!
//! When the active file reaches the configured size it is renamed to
//! `<name>.1` (shifting older backups up to `max_backups`), optionally
//! gzip-compressed to `<name>.1.gz`, and a fresh file is opened.

use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use crate::core::log_record::LogRecord;
use crate::core::output_format::OutputFormat;
use crate::core::timestamp::TimestampFormat;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Rotation settings for [`RotatingFileAppender`]
///
/// # Examples
///
/// ```
/// use scoped_logger::appenders::RotationPolicy;
///
/// let policy = RotationPolicy::new()
///     .with_max_size(50 * 1024 * 1024)
///     .with_max_backups(7)
///     .with_compression(true);
/// assert_eq!(policy.max_backups, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Bytes written to the active file before it is rotated
    pub max_size: u64,
    /// Maximum number of rotated files to keep
    pub max_backups: usize,
    /// Whether to gzip rotated files
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_size: 10 * 1024 * 1024,
            max_backups: 5,
            compress: false,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, size: u64) -> Self {
        self.max_size = size;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

pub struct RotatingFileAppender {
    base_path: PathBuf,
    policy: RotationPolicy,
    writer: Option<BufWriter<File>>,
    current_size: u64,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl RotatingFileAppender {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_policy(path, RotationPolicy::default())
    }

    /// Open `path` for appending, creating missing parent directories
    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let (file, current_size) = Self::open(&base_path)?;

        Ok(Self {
            base_path,
            policy,
            writer: Some(BufWriter::new(file)),
            current_size,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        })
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    fn open(path: &Path) -> Result<(File, u64)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;
        let size = file.metadata()?.len();
        Ok((file, size))
    }

    /// Backup path for a given index: `app.log.3` or `app.log.3.gz`
    fn backup_path(&self, index: usize, compressed: bool) -> PathBuf {
        let mut name = self
            .base_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "app.log".into());
        name.push(format!(".{}", index));
        if compressed {
            name.push(".gz");
        }
        self.base_path.with_file_name(name)
    }

    fn rotate(&mut self) -> Result<()> {
        let rotation_error = |message: String| {
            LoggerError::file_rotation(self.base_path.display().to_string(), message)
        };

        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .map_err(|e| rotation_error(format!("Failed to flush before rotation: {}", e)))?;
        }

        if self.policy.max_backups == 0 {
            fs::remove_file(&self.base_path)
                .map_err(|e| rotation_error(format!("Failed to discard log file: {}", e)))?;
        } else {
            // Drop the oldest backup, then shift the rest up by one
            for compressed in [false, true] {
                let oldest = self.backup_path(self.policy.max_backups, compressed);
                if oldest.exists() {
                    fs::remove_file(&oldest).map_err(|e| {
                        rotation_error(format!("Failed to remove '{}': {}", oldest.display(), e))
                    })?;
                }
            }
            for i in (1..self.policy.max_backups).rev() {
                for compressed in [false, true] {
                    let from = self.backup_path(i, compressed);
                    if from.exists() {
                        fs::rename(&from, self.backup_path(i + 1, compressed)).map_err(|e| {
                            rotation_error(format!("Failed to shift backup files: {}", e))
                        })?;
                    }
                }
            }

            let first = self.backup_path(1, false);
            fs::rename(&self.base_path, &first)
                .map_err(|e| rotation_error(format!("Failed to rotate current log file: {}", e)))?;

            if self.policy.compress {
                compress_file(&first, &self.backup_path(1, true))?;
            }
        }

        let (file, size) = Self::open(&self.base_path)?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = size;
        Ok(())
    }
}

/// Gzip `source` into `target`, removing `source` only once `target` is complete
fn compress_file(source: &Path, target: &Path) -> Result<()> {
    let temp_path = target.with_extension("gz.tmp");
    let compress_error = |message: &str, e: std::io::Error| {
        let _ = fs::remove_file(&temp_path);
        LoggerError::io_operation("compress log file", message.to_string(), e)
    };

    let input = File::open(source).map_err(|e| compress_error("Failed to open rotated file", e))?;
    let output = File::create(&temp_path)
        .map_err(|e| compress_error("Failed to create temporary compressed file", e))?;

    let mut reader = BufReader::with_capacity(64 * 1024, input);
    let mut encoder = flate2::write::GzEncoder::new(
        BufWriter::with_capacity(64 * 1024, output),
        flate2::Compression::default(),
    );
    std::io::copy(&mut reader, &mut encoder)
        .map_err(|e| compress_error("Failed to compress data", e))?;
    encoder
        .finish()
        .and_then(|mut writer| writer.flush())
        .map_err(|e| compress_error("Failed to finish compression", e))?;

    fs::rename(&temp_path, target)
        .map_err(|e| compress_error("Failed to move compressed file into place", e))?;

    if let Err(e) = fs::remove_file(source) {
        eprintln!(
            "[LOGGER WARNING] Compressed {} but could not remove the original: {}",
            source.display(),
            e
        );
    }
    Ok(())
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "rotating_file"
    }

    fn append(&mut self, record: &LogRecord) -> Result<()> {
        if self.current_size >= self.policy.max_size {
            if let Err(e) = self.rotate() {
                eprintln!("[LOGGER WARNING] Log rotation failed: {}. Continuing with current file.", e);
                if self.writer.is_none() {
                    let (file, _) = Self::open(&self.base_path)?;
                    self.writer = Some(BufWriter::new(file));
                }
                // Let the file outgrow the limit rather than retry on every record
                self.current_size = 0;
            }
        }

        let mut line = self.output_format.format(record, &self.timestamp_format);
        line.push('\n');

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("Writer not initialized"))?;
        writer.write_all(line.as_bytes())?;
        self.current_size += line.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CallSite, SeverityLevel};
    use std::io::Read;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn record(message: String) -> LogRecord {
        LogRecord::new(
            SeverityLevel::Info,
            Arc::from("rot"),
            &CallSite::new("src/rot.rs", 1, "rot::test"),
            message,
        )
    }

    #[test]
    fn test_rotating_appender_creation() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("nested").join("test.log");

        let appender = RotatingFileAppender::new(&log_path).unwrap();
        assert_eq!(appender.path(), log_path);
        assert_eq!(appender.current_size(), 0);
        assert!(log_path.exists());
    }

    #[test]
    fn test_size_based_rotation() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("rotation.log");
        let policy = RotationPolicy::new().with_max_size(100).with_max_backups(3);

        let mut appender = RotatingFileAppender::with_policy(&log_path, policy).unwrap();
        for i in 0..20 {
            appender.append(&record(format!("Test message number {}", i))).unwrap();
        }
        appender.flush().unwrap();

        assert!(dir.path().join("rotation.log.1").exists());
        assert!(dir.path().join("rotation.log.3").exists());
        assert!(!dir.path().join("rotation.log.4").exists());
    }

    #[test]
    fn test_rotation_with_compression() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("packed.log");
        let policy = RotationPolicy::new()
            .with_max_size(50)
            .with_max_backups(2)
            .with_compression(true);

        let mut appender = RotatingFileAppender::with_policy(&log_path, policy).unwrap();
        for i in 0..10 {
            appender.append(&record(format!("Entry {}", i))).unwrap();
        }
        appender.flush().unwrap();

        let gz_path = dir.path().join("packed.log.1.gz");
        assert!(gz_path.exists());
        assert!(!dir.path().join("packed.log.1").exists());

        let mut decoder = flate2::read::GzDecoder::new(File::open(gz_path).unwrap());
        let mut content = String::new();
        decoder.read_to_string(&mut content).unwrap();
        assert!(content.contains("Entry"));
    }

    #[test]
    fn test_zero_backups_discards_old_file() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("single.log");
        let policy = RotationPolicy::new().with_max_size(40).with_max_backups(0);

        let mut appender = RotatingFileAppender::with_policy(&log_path, policy).unwrap();
        for i in 0..10 {
            appender.append(&record(format!("Entry {}", i))).unwrap();
        }
        appender.flush().unwrap();

        assert!(!dir.path().join("single.log.1").exists());
        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Entry 9"));
        assert!(!content.contains("Entry 0"));
    }
}
