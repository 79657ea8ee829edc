//! Lazily created loggers
//!
//! [`LazyLogger`] is the per-call-site slot behind [`declare_logger!`]: a
//! `static` that builds its logger on first use, exactly once, no matter how
//! many threads race for it. [`LoggerRegistry`] offers the same guarantee
//! keyed by name, as an explicit value that can be passed around instead of
//! living in a static.
//!
//! [`declare_logger!`]: crate::declare_logger

use super::{log_core::LogCore, logger::Logger};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

/// A logger slot built on first access.
///
/// # Example
///
/// ```
/// use scoped_logger::LazyLogger;
///
/// static LOGGER: LazyLogger = LazyLogger::new("storage");
///
/// assert!(!LOGGER.is_initialized());
/// assert_eq!(LOGGER.get().name(), "storage");
/// assert!(std::ptr::eq(LOGGER.get(), LOGGER.get()));
/// ```
pub struct LazyLogger {
    name: &'static str,
    cell: OnceLock<Logger>,
}

impl LazyLogger {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceLock::new(),
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The logger, bound to the global core on first call
    #[inline]
    pub fn get(&self) -> &Logger {
        self.cell.get_or_init(|| Logger::new(self.name))
    }

    /// The logger, built by `init` if this is the first access.
    ///
    /// Concurrent first callers block until the single winner finishes;
    /// `init` runs at most once over the slot's lifetime.
    #[inline]
    pub fn get_or_init(&self, init: impl FnOnce(&'static str) -> Logger) -> &Logger {
        self.cell.get_or_init(|| init(self.name))
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl std::fmt::Debug for LazyLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyLogger")
            .field("name", &self.name)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// Name-keyed logger registry bound to one log core.
///
/// Each name maps to exactly one [`Logger`], created on first request.
pub struct LoggerRegistry {
    core: Arc<LogCore>,
    loggers: RwLock<HashMap<String, Logger>>,
    created: AtomicUsize,
}

impl LoggerRegistry {
    pub fn new(core: Arc<LogCore>) -> Self {
        Self {
            core,
            loggers: RwLock::new(HashMap::new()),
            created: AtomicUsize::new(0),
        }
    }

    /// Registry bound to the process-wide log core
    pub fn global() -> Self {
        Self::new(LogCore::global())
    }

    pub fn core(&self) -> &Arc<LogCore> {
        &self.core
    }

    /// The logger for `name`, created if this is the first request
    pub fn get(&self, name: &str) -> Logger {
        if let Some(logger) = self.loggers.read().get(name) {
            return logger.clone();
        }

        // Another thread may have won the race between the two locks
        let mut loggers = self.loggers.write();
        loggers
            .entry(name.to_string())
            .or_insert_with(|| {
                self.created.fetch_add(1, Ordering::Relaxed);
                Logger::with_core(name, Arc::clone(&self.core))
            })
            .clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }

    /// Number of loggers this registry has constructed
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("loggers", &self.len())
            .finish()
    }
}
