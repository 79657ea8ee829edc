//! Process-wide logging lifecycle
//!
//! A [`LogManager`] turns a [`LogConfig`] into installed sinks on a
//! [`LogCore`] and owns them until it is dropped. At most one manager is
//! active per core; while none is, every emission is silently dropped.

use super::{
    appender::Appender,
    config::{LogConfig, STREAM_SOURCE},
    error::{LoggerError, Result},
    log_core::{LogCore, SinkSlot},
    severity::SeverityLevel,
};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Owner of the active logging configuration.
///
/// Construction validates the configuration and opens every sink before
/// anything is installed, so a failed construction leaves the core exactly
/// as it was. A core that is already configured is rejected before any
/// sink file is opened. Dropping the manager drains pending records, flushes the
/// sinks and returns the core to its unconfigured state.
///
/// # Example
///
/// ```
/// use scoped_logger::{LogManager, Logger};
///
/// let manager = LogManager::from_toml_str(r#"
///     [core]
///     filter = "DEBUG"
///
///     [[sinks]]
///     kind = "console"
/// "#).unwrap();
///
/// Logger::new("app").info("configured");
/// drop(manager);
/// ```
pub struct LogManager {
    core: Arc<LogCore>,
    installed: bool,
}

impl LogManager {
    /// Configure the global core from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        if crate::__private::LOGGING_DISABLED {
            return Ok(Self::inert(LogCore::global()));
        }
        let path = path.as_ref();
        Self::builder()
            .source_name(path.display().to_string())
            .config(LogConfig::from_path(path)?)
            .build()
    }

    /// Configure the global core from a TOML stream
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        if crate::__private::LOGGING_DISABLED {
            return Ok(Self::inert(LogCore::global()));
        }
        Self::builder().config(LogConfig::from_reader(reader)?).build()
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        if crate::__private::LOGGING_DISABLED {
            return Ok(Self::inert(LogCore::global()));
        }
        Self::builder()
            .config(LogConfig::from_toml_str(text, STREAM_SOURCE)?)
            .build()
    }

    pub fn from_config(config: LogConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> LogManagerBuilder {
        LogManagerBuilder::new()
    }

    /// A manager that owns nothing, used when logging is compiled out
    fn inert(core: Arc<LogCore>) -> Self {
        Self {
            core,
            installed: false,
        }
    }

    pub fn core(&self) -> &Arc<LogCore> {
        &self.core
    }

    /// Whether this manager's configuration is installed on its core
    pub fn is_active(&self) -> bool {
        self.installed
    }

    /// Flush every sink, waiting for queued records on an async core
    pub fn flush(&self) -> Result<()> {
        if !self.installed {
            return Ok(());
        }
        self.core.flush()
    }
}

impl Drop for LogManager {
    fn drop(&mut self) {
        if self.installed {
            self.core.uninstall();
        }
    }
}

impl std::fmt::Debug for LogManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogManager")
            .field("installed", &self.installed)
            .field("core", &self.core)
            .finish()
    }
}

/// Builder for [`LogManager`]
///
/// Appenders added here are installed after the configured sinks and count
/// toward the "at least one sink" requirement.
pub struct LogManagerBuilder {
    config: LogConfig,
    source_name: String,
    appenders: Vec<SinkSlot>,
    core: Option<Arc<LogCore>>,
}

impl LogManagerBuilder {
    pub fn new() -> Self {
        Self {
            config: LogConfig::default(),
            source_name: "<programmatic>".to_string(),
            appenders: Vec::new(),
            core: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Name reported in configuration errors
    #[must_use]
    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    #[must_use]
    pub fn appender(self, appender: Box<dyn Appender>) -> Self {
        self.filtered_appender(appender, None)
    }

    /// Add an appender with its own minimum severity
    #[must_use]
    pub fn filtered_appender(
        mut self,
        appender: Box<dyn Appender>,
        min_level: Option<SeverityLevel>,
    ) -> Self {
        self.appenders.push(SinkSlot::new(appender, min_level));
        self
    }

    /// Install into `core` instead of the global one
    #[must_use]
    pub fn core(mut self, core: Arc<LogCore>) -> Self {
        self.core = Some(core);
        self
    }

    pub fn build(self) -> Result<LogManager> {
        let core = self.core.unwrap_or_else(LogCore::global);

        if crate::__private::LOGGING_DISABLED {
            return Ok(LogManager::inert(core));
        }

        // Checked before prepare so a rejected manager creates no files.
        // install re-checks under the state lock.
        if core.is_configured() {
            return Err(LoggerError::AlreadyConfigured);
        }

        let prepared = self.config.prepare(&self.source_name, self.appenders)?;
        core.install(prepared)?;

        Ok(LogManager {
            core,
            installed: true,
        })
    }
}

impl Default for LogManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
