//! Appender trait for log output destinations

use super::{error::Result, log_record::LogRecord};

/// A destination the log core hands records to.
///
/// Implementations are driven under the core's lock, one record at a time,
/// so they need no internal synchronization of their own.
pub trait Appender: Send + Sync {
    fn append(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
