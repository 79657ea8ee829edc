//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod log_core;
pub mod log_manager;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod registry;
pub mod severity;
pub mod timestamp;
pub mod trace_span;

pub use appender::Appender;
pub use config::{
    ConsoleSinkConfig, CoreSection, FileSinkConfig, JsonSinkConfig, LogConfig,
    RotatingFileSinkConfig, SinkConfig,
};
pub use error::{LoggerError, Result};
pub use log_core::{LevelFilter, LogCore};
pub use log_manager::{LogManager, LogManagerBuilder};
pub use log_record::{CallSite, LogRecord};
pub use logger::{create_logger, Logger, UNKNOWN_FUNCTION};
pub use metrics::CoreMetrics;
pub use output_format::OutputFormat;
pub use registry::{LazyLogger, LoggerRegistry};
pub use severity::SeverityLevel;
pub use timestamp::TimestampFormat;
pub use trace_span::TraceSpan;
