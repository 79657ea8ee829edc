//! The log core: the sink service every logger writes into
//!
//! A `LogCore` is either unconfigured (records are dropped and counted) or
//! holds exactly one installed configuration: a severity filter in front of
//! a list of appenders, driven synchronously on the caller's thread or by a
//! single worker thread fed through a bounded queue.
//!
//! Installing and uninstalling is reserved to [`LogManager`](crate::LogManager).

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    log_record::LogRecord,
    metrics::CoreMetrics,
    severity::SeverityLevel,
};
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::thread;

/// Records collected by the async worker before sinks are flushed
const BATCH_SIZE: usize = 50;

static GLOBAL_CORE: OnceLock<Arc<LogCore>> = OnceLock::new();

/// Severity thresholds: a core-wide minimum plus per-logger overrides.
///
/// Overrides match the logger name exactly or as a dotted prefix, the
/// longest match winning: an override for `net` also covers `net.http`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelFilter {
    min_level: SeverityLevel,
    overrides: HashMap<String, SeverityLevel>,
}

impl LevelFilter {
    pub fn new(min_level: SeverityLevel) -> Self {
        Self {
            min_level,
            overrides: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_override(mut self, logger: impl Into<String>, level: SeverityLevel) -> Self {
        self.overrides.insert(logger.into(), level);
        self
    }

    pub fn min_level(&self) -> SeverityLevel {
        self.min_level
    }

    /// Effective threshold for a logger name
    pub fn threshold(&self, logger: &str) -> SeverityLevel {
        let mut name = logger;
        loop {
            if let Some(level) = self.overrides.get(name) {
                return *level;
            }
            match name.rsplit_once('.') {
                Some((parent, _)) => name = parent,
                None => return self.min_level,
            }
        }
    }

    pub fn accepts(&self, logger: &str, level: SeverityLevel) -> bool {
        level >= self.threshold(logger)
    }
}

/// An appender together with its own optional minimum severity
pub struct SinkSlot {
    appender: Box<dyn Appender>,
    min_level: Option<SeverityLevel>,
}

impl SinkSlot {
    pub fn new(appender: Box<dyn Appender>, min_level: Option<SeverityLevel>) -> Self {
        Self {
            appender,
            min_level,
        }
    }

    pub fn name(&self) -> &str {
        self.appender.name()
    }

    fn accepts(&self, level: SeverityLevel) -> bool {
        self.min_level.map_or(true, |min| level >= min)
    }
}

/// A fully validated configuration, ready to be installed into a core
pub struct PreparedConfig {
    pub filter: LevelFilter,
    pub sinks: Vec<SinkSlot>,
    /// Queue capacity when records are dispatched on a worker thread
    pub async_capacity: Option<usize>,
}

enum Command {
    Record(LogRecord),
    Flush(Sender<()>),
}

enum Dispatch {
    Sync(Mutex<Vec<SinkSlot>>),
    Async {
        sender: Sender<Command>,
        worker: thread::JoinHandle<()>,
    },
}

struct ActiveConfig {
    filter: LevelFilter,
    dispatch: Dispatch,
}

pub struct LogCore {
    state: RwLock<Option<ActiveConfig>>,
    metrics: Arc<CoreMetrics>,
}

impl LogCore {
    /// Create an unconfigured core, independent of the global one
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(None),
            metrics: Arc::new(CoreMetrics::new()),
        })
    }

    /// The process-wide core used by `Logger::new` and `LogManager` by default
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL_CORE.get_or_init(LogCore::new))
    }

    pub fn is_configured(&self) -> bool {
        self.state.read().is_some()
    }

    pub fn metrics(&self) -> &CoreMetrics {
        &self.metrics
    }

    /// Whether a record from `logger` at `level` would pass the core filter.
    ///
    /// An unconfigured core accepts nothing.
    pub fn enabled(&self, logger: &str, level: SeverityLevel) -> bool {
        self.state
            .read()
            .as_ref()
            .is_some_and(|active| active.filter.accepts(logger, level))
    }

    /// Hand a record to the installed sinks.
    ///
    /// Never fails: records emitted while unconfigured are dropped, sink
    /// errors are counted and reported on stderr.
    pub fn submit(&self, record: LogRecord) {
        let state = self.state.read();
        let Some(active) = state.as_ref() else {
            self.metrics.record_dropped_unconfigured();
            return;
        };

        if !active.filter.accepts(&record.logger, record.level) {
            self.metrics.record_filtered();
            return;
        }

        match &active.dispatch {
            Dispatch::Sync(sinks) => {
                let mut sinks = sinks.lock();
                write_to_sinks(&mut sinks, &record, &self.metrics);
            }
            Dispatch::Async { sender, .. } => {
                // A full queue blocks the caller
                if let Err(err) = sender.send(Command::Record(record)) {
                    self.metrics.record_sink_failure();
                    if let Command::Record(lost) = err.into_inner() {
                        eprintln!(
                            "[LOGGER ERROR] Async worker stopped, record from '{}' lost: {}",
                            lost.logger, lost.message
                        );
                    }
                }
            }
        }
    }

    /// Flush every installed sink, waiting for queued records first
    pub fn flush(&self) -> Result<()> {
        let state = self.state.read();
        let Some(active) = state.as_ref() else {
            return Ok(());
        };

        match &active.dispatch {
            Dispatch::Sync(sinks) => {
                for slot in sinks.lock().iter_mut() {
                    slot.appender.flush()?;
                }
                Ok(())
            }
            Dispatch::Async { sender, .. } => {
                let (ack_tx, ack_rx) = bounded(1);
                sender
                    .send(Command::Flush(ack_tx))
                    .map_err(|_| LoggerError::sink("async worker", "dispatch queue closed"))?;
                ack_rx
                    .recv()
                    .map_err(|_| LoggerError::sink("async worker", "worker stopped before flush"))
            }
        }
    }

    /// Install a configuration; fails if one is already installed
    pub(crate) fn install(&self, config: PreparedConfig) -> Result<()> {
        let mut state = self.state.write();
        if state.is_some() {
            return Err(LoggerError::AlreadyConfigured);
        }

        let dispatch = match config.async_capacity {
            None => Dispatch::Sync(Mutex::new(config.sinks)),
            Some(capacity) => {
                let (sender, receiver) = bounded(capacity);
                let metrics = Arc::clone(&self.metrics);
                let worker = thread::Builder::new()
                    .name("log-core-worker".to_string())
                    .spawn(move || run_worker(receiver, config.sinks, &metrics))
                    .map_err(|e| {
                        LoggerError::io_operation(
                            "starting log worker",
                            "cannot spawn dispatch thread",
                            e,
                        )
                    })?;
                Dispatch::Async { sender, worker }
            }
        };

        *state = Some(ActiveConfig {
            filter: config.filter,
            dispatch,
        });
        self.metrics.record_install();
        Ok(())
    }

    /// Remove the installed configuration, draining and flushing its sinks
    pub(crate) fn uninstall(&self) {
        let Some(active) = self.state.write().take() else {
            return;
        };

        match active.dispatch {
            Dispatch::Sync(sinks) => {
                flush_sinks(&mut sinks.into_inner());
            }
            Dispatch::Async { sender, worker } => {
                // Closing the channel lets the worker drain and flush
                drop(sender);
                if let Err(e) = worker.join() {
                    eprintln!("[LOGGER ERROR] Log worker thread panicked during shutdown: {:?}", e);
                }
            }
        }
    }
}

impl std::fmt::Debug for LogCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogCore")
            .field("configured", &self.is_configured())
            .field("metrics", &self.metrics)
            .finish()
    }
}

fn run_worker(receiver: Receiver<Command>, mut sinks: Vec<SinkSlot>, metrics: &CoreMetrics) {
    while let Ok(command) = receiver.recv() {
        let mut pending = Some(command);
        let mut processed = 0;

        // Drain what is already queued before flushing
        while let Some(command) = pending.take() {
            match command {
                Command::Record(record) => {
                    write_to_sinks(&mut sinks, &record, metrics);
                    processed += 1;
                }
                Command::Flush(ack) => {
                    flush_sinks(&mut sinks);
                    let _ = ack.send(());
                }
            }
            if processed < BATCH_SIZE {
                pending = receiver.try_recv().ok();
            }
        }

        flush_sinks(&mut sinks);
    }

    flush_sinks(&mut sinks);
}

/// Write a record to every sink that accepts it, isolating each sink
/// so one failing or panicking appender cannot starve the others.
fn write_to_sinks(sinks: &mut [SinkSlot], record: &LogRecord, metrics: &CoreMetrics) {
    let mut has_error = false;

    for slot in sinks.iter_mut() {
        if !slot.accepts(record.level) {
            continue;
        }

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            slot.appender.append(record)
        }));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", slot.name(), e);
                metrics.record_sink_failure();
                has_error = true;
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER CRITICAL] Sink '{}' panicked: {}. Other sinks continue to function.",
                    slot.name(),
                    panic_message(panic_info.as_ref())
                );
                metrics.record_sink_failure();
                has_error = true;
            }
        }
    }

    if !has_error {
        metrics.record_delivered();
    }
}

fn flush_sinks(sinks: &mut [SinkSlot]) {
    for slot in sinks.iter_mut() {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            slot.appender.flush()
        }));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", slot.name(), e),
            Err(panic_info) => eprintln!(
                "[LOGGER CRITICAL] Sink '{}' panicked during flush: {}",
                slot.name(),
                panic_message(panic_info.as_ref())
            ),
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
