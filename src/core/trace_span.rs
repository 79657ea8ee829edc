//! Scoped enter/exit tracing

use super::{log_record::CallSite, logger::Logger, severity::SeverityLevel};

/// Guard that logs `ENTER: <message>` when created and `EXIT: <message>`
/// when dropped, both at TRACE with the same call-site attributes.
///
/// The exit record is emitted on every path out of the owning scope: normal
/// return, early return, `?` propagation and panic unwinding. The guard is
/// neither `Clone` nor `Copy`, so one span always yields exactly one pair.
///
/// Whether the span is recorded is decided once, on entry: a span whose
/// ENTER was filtered out (or compiled out by `elide-debug`) never emits an
/// EXIT, even if the configuration changes while it is open.
///
/// # Example
///
/// ```
/// use scoped_logger::{call_site, Logger, TraceSpan};
///
/// fn load(logger: &Logger) -> Result<u32, String> {
///     let _span = TraceSpan::enter(logger, "load", call_site!());
///     let value = "42".parse::<u32>().map_err(|e| e.to_string())?;
///     Ok(value)
/// }
///
/// assert_eq!(load(&Logger::new("loader")), Ok(42));
/// ```
#[must_use = "the span closes as soon as the guard is dropped"]
pub struct TraceSpan {
    logger: Logger,
    message: String,
    call_site: CallSite,
    entered: bool,
}

impl TraceSpan {
    pub fn enter(logger: &Logger, message: impl Into<String>, call_site: CallSite) -> Self {
        let mut span = Self {
            logger: logger.clone(),
            message: message.into(),
            call_site,
            entered: false,
        };
        if logger.enabled(SeverityLevel::Trace) {
            span.emit("ENTER");
            span.entered = true;
        }
        span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn call_site(&self) -> &CallSite {
        &self.call_site
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Whether ENTER was emitted, and so EXIT will be
    pub fn is_recorded(&self) -> bool {
        self.entered
    }

    fn emit(&self, phase: &str) {
        self.logger.emit_at(
            SeverityLevel::Trace,
            &self.call_site,
            format!("{}: {}", phase, self.message),
        );
    }
}

impl Drop for TraceSpan {
    fn drop(&mut self) {
        if self.entered {
            self.emit("EXIT");
        }
    }
}

impl std::fmt::Debug for TraceSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceSpan")
            .field("logger", &self.logger.name())
            .field("message", &self.message)
            .field("call_site", &self.call_site)
            .field("entered", &self.entered)
            .finish()
    }
}
