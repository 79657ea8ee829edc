//! Logging configuration
//!
//! Configuration is a TOML document with a `[core]` table, an optional
//! `[loggers]` table of per-logger severity overrides and one or more
//! `[[sinks]]` entries:
//!
//! ```toml
//! [core]
//! filter = "INFO"
//!
//! [loggers]
//! "net.http" = "DEBUG"
//!
//! [[sinks]]
//! kind = "console"
//! filter = "WARN"
//!
//! [[sinks]]
//! kind = "rotating_file"
//! path = "logs/app.log"
//! max_size = 1048576
//! ```
//!
//! Parsing only builds a [`LogConfig`]; nothing is opened or installed
//! until a [`LogManager`](crate::LogManager) takes it.

use super::{
    error::{LoggerError, Result},
    log_core::{LevelFilter, PreparedConfig, SinkSlot},
    output_format::OutputFormat,
    severity::SeverityLevel,
    timestamp::TimestampFormat,
};
use crate::appenders::{
    ConsoleAppender, FileAppender, JsonAppender, RotatingFileAppender, RotationPolicy,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Source name used in errors for configuration that did not come from a file
pub const STREAM_SOURCE: &str = "<stream>";

fn default_queue_capacity() -> usize {
    1024
}

fn default_true() -> bool {
    true
}

fn default_max_size() -> u64 {
    RotationPolicy::default().max_size
}

fn default_max_backups() -> usize {
    RotationPolicy::default().max_backups
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreSection {
    /// Minimum severity for every logger without an override
    #[serde(default)]
    pub filter: SeverityLevel,
    /// Dispatch records on a worker thread instead of the caller's
    #[serde(default)]
    pub asynchronous: bool,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for CoreSection {
    fn default() -> Self {
        Self {
            filter: SeverityLevel::default(),
            asynchronous: false,
            queue_capacity: default_queue_capacity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleSinkConfig {
    #[serde(default)]
    pub filter: Option<SeverityLevel>,
    #[serde(default = "default_true")]
    pub colors: bool,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub timestamp: TimestampFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSinkConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub filter: Option<SeverityLevel>,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub timestamp: TimestampFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotatingFileSinkConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub filter: Option<SeverityLevel>,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub timestamp: TimestampFormat,
    #[serde(default = "default_max_size")]
    pub max_size: u64,
    #[serde(default = "default_max_backups")]
    pub max_backups: usize,
    #[serde(default)]
    pub compress: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonSinkConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub filter: Option<SeverityLevel>,
}

/// One `[[sinks]]` entry, selected by its `kind` key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkConfig {
    Console(ConsoleSinkConfig),
    File(FileSinkConfig),
    RotatingFile(RotatingFileSinkConfig),
    Json(JsonSinkConfig),
}

impl SinkConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            SinkConfig::Console(_) => "console",
            SinkConfig::File(_) => "file",
            SinkConfig::RotatingFile(_) => "rotating_file",
            SinkConfig::Json(_) => "json",
        }
    }

    pub fn filter(&self) -> Option<SeverityLevel> {
        match self {
            SinkConfig::Console(c) => c.filter,
            SinkConfig::File(c) => c.filter,
            SinkConfig::RotatingFile(c) => c.filter,
            SinkConfig::Json(c) => c.filter,
        }
    }

    fn validate(&self, index: usize, problems: &mut Vec<String>) {
        let path = match self {
            SinkConfig::Console(_) => None,
            SinkConfig::File(c) => Some(&c.path),
            SinkConfig::RotatingFile(c) => {
                if c.max_size == 0 {
                    problems.push(format!("sinks[{}]: max_size must be greater than 0", index));
                }
                Some(&c.path)
            }
            SinkConfig::Json(c) => Some(&c.path),
        };
        if path.is_some_and(|p| p.as_os_str().is_empty()) {
            problems.push(format!("sinks[{}] ({}): path must not be empty", index, self.kind()));
        }
    }

    /// Open the sink's output and wrap it with its severity filter
    fn open(&self) -> Result<SinkSlot> {
        let appender: Box<dyn super::Appender> = match self {
            SinkConfig::Console(c) => Box::new(
                ConsoleAppender::with_colors(c.colors)
                    .with_output_format(c.format)
                    .with_timestamp_format(c.timestamp.clone()),
            ),
            SinkConfig::File(c) => Box::new(
                FileAppender::new(&c.path)?
                    .with_output_format(c.format)
                    .with_timestamp_format(c.timestamp.clone()),
            ),
            SinkConfig::RotatingFile(c) => {
                let policy = RotationPolicy::new()
                    .with_max_size(c.max_size)
                    .with_max_backups(c.max_backups)
                    .with_compression(c.compress);
                Box::new(
                    RotatingFileAppender::with_policy(&c.path, policy)?
                        .with_output_format(c.format)
                        .with_timestamp_format(c.timestamp.clone()),
                )
            }
            SinkConfig::Json(c) => Box::new(JsonAppender::new(&c.path)?),
        };
        Ok(SinkSlot::new(appender, self.filter()))
    }
}

/// A parsed logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default)]
    pub core: CoreSection,
    #[serde(default)]
    pub loggers: HashMap<String, SeverityLevel>,
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text; `source_name` names the origin in error messages
    pub fn from_toml_str(text: &str, source_name: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| LoggerError::config(source_name, e.message()))
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| LoggerError::config_io(STREAM_SOURCE, e))?;
        Self::from_toml_str(&text, STREAM_SOURCE)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|e| LoggerError::config_io(source_name.clone(), e))?;
        Self::from_toml_str(&text, &source_name)
    }

    #[must_use]
    pub fn with_filter(mut self, level: SeverityLevel) -> Self {
        self.core.filter = level;
        self
    }

    #[must_use]
    pub fn with_logger_level(mut self, logger: impl Into<String>, level: SeverityLevel) -> Self {
        self.loggers.insert(logger.into(), level);
        self
    }

    #[must_use]
    pub fn with_async(mut self, queue_capacity: usize) -> Self {
        self.core.asynchronous = true;
        self.core.queue_capacity = queue_capacity;
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: SinkConfig) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Check the configuration, collecting every problem into one error.
    ///
    /// `extra_sinks` counts appenders supplied outside the document.
    pub fn validate(&self, source_name: &str, extra_sinks: usize) -> Result<()> {
        let mut problems = Vec::new();

        if self.sinks.is_empty() && extra_sinks == 0 {
            problems.push("at least one [[sinks]] entry is required".to_string());
        }
        if self.core.asynchronous && self.core.queue_capacity == 0 {
            problems.push("core.queue_capacity must be greater than 0".to_string());
        }
        if self.loggers.keys().any(|name| name.is_empty()) {
            problems.push("logger names in [loggers] must not be empty".to_string());
        }
        for (index, sink) in self.sinks.iter().enumerate() {
            sink.validate(index, &mut problems);
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::config(source_name, problems.join("; ")))
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.loggers
            .iter()
            .fold(LevelFilter::new(self.core.filter), |filter, (name, level)| {
                filter.with_override(name.clone(), *level)
            })
    }

    /// Validate and open every sink. Nothing is installed yet, and sinks
    /// opened before a failing one are closed again when the error returns.
    pub(crate) fn prepare(
        &self,
        source_name: &str,
        extra_sinks: Vec<SinkSlot>,
    ) -> Result<PreparedConfig> {
        self.validate(source_name, extra_sinks.len())?;

        let mut sinks = Vec::with_capacity(self.sinks.len() + extra_sinks.len());
        for (index, sink) in self.sinks.iter().enumerate() {
            let slot = sink.open().map_err(|e| {
                LoggerError::config(
                    source_name,
                    format!("sinks[{}] ({}): {}", index, sink.kind(), e),
                )
            })?;
            sinks.push(slot);
        }
        sinks.extend(extra_sinks);

        Ok(PreparedConfig {
            filter: self.level_filter(),
            sinks,
            async_capacity: self.core.asynchronous.then_some(self.core.queue_capacity),
        })
    }
}
