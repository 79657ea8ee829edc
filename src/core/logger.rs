//! Named logger handles

use super::{
    log_core::LogCore,
    log_record::{CallSite, LogRecord},
    severity::SeverityLevel,
};
use std::fmt;
use std::sync::Arc;

/// Function attribute for records emitted through the plain methods,
/// which only know the caller's file and line
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

/// A named handle into a [`LogCore`].
///
/// Cloning is cheap and every clone writes to the same core under the same
/// name. Emission never fails and needs no external locking.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    core: Arc<LogCore>,
}

impl Logger {
    /// Create a logger bound to the process-wide log core
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self::with_core(name, LogCore::global())
    }

    /// Create a logger bound to a specific log core
    #[must_use]
    pub fn with_core(name: impl AsRef<str>, core: Arc<LogCore>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            core,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn core(&self) -> &Arc<LogCore> {
        &self.core
    }

    /// Whether a record at `level` would currently reach any sink filter.
    ///
    /// Always false for levels compiled out by `elide-debug` or
    /// `disable-logging`.
    #[inline]
    pub fn enabled(&self, level: SeverityLevel) -> bool {
        !level.is_elided() && self.core.enabled(&self.name, level)
    }

    /// Emit a record with explicit call-site attributes
    pub fn emit(
        &self,
        level: SeverityLevel,
        file: &'static str,
        line: u32,
        function: &'static str,
        message: impl Into<String>,
    ) {
        self.emit_at(level, &CallSite::new(file, line, function), message);
    }

    pub fn emit_at(&self, level: SeverityLevel, call_site: &CallSite, message: impl Into<String>) {
        if level.is_elided() {
            return;
        }
        let record = LogRecord::new(level, Arc::clone(&self.name), call_site, message.into());
        self.core.submit(record);
    }

    /// Emit at `level`, attributing the record to the caller's file and line
    #[track_caller]
    pub fn log(&self, level: SeverityLevel, message: impl Into<String>) {
        let location = std::panic::Location::caller();
        self.emit(level, location.file(), location.line(), UNKNOWN_FUNCTION, message);
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(SeverityLevel::Trace, message);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(SeverityLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(SeverityLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(SeverityLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(SeverityLevel::Error, message);
    }

    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(SeverityLevel::Fatal, message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("name", &self.name).finish()
    }
}

/// Create a logger bound to the process-wide log core
#[must_use]
pub fn create_logger(name: &str) -> Logger {
    Logger::new(name)
}
