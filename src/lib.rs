//! # Scoped Logger
//!
//! Severity-leveled logging for libraries and applications, with lazily
//! created per-module loggers, scoped enter/exit trace spans and a single
//! process-wide configuration owner.
//!
//! ## Features
//!
//! - **Lazy loggers**: [`declare_logger!`] gives each module a logger that is
//!   built on first use, exactly once, even under contention
//! - **Call-site capture**: every macro records file, line and function
//! - **Trace spans**: [`trace_span!`] and [`auto_trace!`] log paired
//!   `ENTER`/`EXIT` records on every way out of a scope
//! - **One configuration owner**: a [`LogManager`] built from TOML installs
//!   console, file, rotating and JSON sinks and removes them when dropped
//! - **Build-time elision**: the `elide-debug` and `disable-logging`
//!   features compile call sites out entirely
//!
//! ## Example
//!
//! ```
//! use scoped_logger::{auto_trace, declare_logger, info, LogManager};
//!
//! declare_logger!("quickstart");
//!
//! fn handle(request: u32) {
//!     auto_trace!();
//!     info!("handling request {}", request);
//! }
//!
//! let _manager = LogManager::from_toml_str(r#"
//!     [core]
//!     filter = "TRACE"
//!
//!     [[sinks]]
//!     kind = "console"
//!     colors = false
//! "#).unwrap();
//!
//! handle(7);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

#[doc(hidden)]
pub mod __private {
    //! Build switches and helpers for the exported macros. The flags are
    //! evaluated here so they follow this crate's features, not the caller's.

    pub const LOGGING_DISABLED: bool = cfg!(feature = "disable-logging");
    pub const DEBUG_ELIDED: bool = cfg!(feature = "elide-debug");

    /// Strip the marker item and closure frames from a `type_name` path
    pub fn enclosing_function(marker_path: &'static str) -> &'static str {
        let mut path = marker_path
            .strip_suffix("::__function_marker")
            .unwrap_or(marker_path);
        while let Some(outer) = path.strip_suffix("::{{closure}}") {
            path = outer;
        }
        path
    }
}

pub mod prelude {
    pub use crate::appenders::{
        ConsoleAppender, FileAppender, JsonAppender, MemoryAppender, RotatingFileAppender,
        RotationPolicy,
    };
    pub use crate::core::{
        create_logger, Appender, CallSite, LazyLogger, LogConfig, LogManager, LogRecord, Logger,
        LoggerError, Result, SeverityLevel, TraceSpan,
    };
    pub use crate::{
        auto_trace, call_site, debug, declare_logger, error, fatal, function_name, info, trace,
        trace_span, warn,
    };
}

pub use appenders::{
    ConsoleAppender, FileAppender, JsonAppender, MemoryAppender, RotatingFileAppender,
    RotationPolicy,
};
pub use core::{
    create_logger, Appender, CallSite, ConsoleSinkConfig, CoreMetrics, CoreSection,
    FileSinkConfig, JsonSinkConfig, LazyLogger, LevelFilter, LogConfig, LogCore, LogManager,
    LogManagerBuilder, LogRecord, Logger, LoggerError, LoggerRegistry, OutputFormat, Result,
    RotatingFileSinkConfig, SeverityLevel, SinkConfig, TimestampFormat, TraceSpan,
    UNKNOWN_FUNCTION,
};
