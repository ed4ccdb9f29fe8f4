//! Timing events for database operations.
//!
//! Every operation reports how long each of its phases took through a
//! [`Logger`] handed to the [`Db`](crate::Db) at build time. Nothing is
//! measured unless the logger is enabled.

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

/// Receives timing events.
pub trait Logger: Send + Sync + 'static {
    /// Checked once when an operation starts.
    fn is_enabled(&self) -> bool;

    fn log(&self, event: &Event<'_>);
}

/// One completed phase of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event<'a> {
    /// Operation name, e.g. `insert` or `batch_update`.
    pub oper: &'a str,

    /// Entity the operation targets.
    pub entity: &'a str,

    /// Phase that just finished, e.g. `compiled` or `executed`.
    pub phase: &'a str,

    /// Time spent in the phase.
    pub elapsed: Duration,
}

/// Emits events as `tracing` debug events with the `sqlbridge` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn is_enabled(&self) -> bool {
        tracing::enabled!(target: "sqlbridge", tracing::Level::DEBUG)
    }

    fn log(&self, event: &Event<'_>) {
        tracing::debug!(
            target: "sqlbridge",
            oper = event.oper,
            entity = event.entity,
            elapsed_ms = event.elapsed.as_secs_f64() * 1000.0,
            "{}",
            event.phase
        );
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn is_enabled(&self) -> bool {
        false
    }

    fn log(&self, _event: &Event<'_>) {}
}

/// Measures consecutive phases of one operation.
pub struct Stopwatch {
    logger: Arc<dyn Logger>,
    oper: &'static str,
    entity: String,

    /// Start of the current phase; `None` when logging is disabled.
    last: Option<Instant>,
}

impl Stopwatch {
    pub fn start(logger: &Arc<dyn Logger>, oper: &'static str, entity: &str) -> Stopwatch {
        let last = logger.is_enabled().then(Instant::now);

        Stopwatch {
            logger: logger.clone(),
            oper,
            entity: if last.is_some() {
                entity.to_string()
            } else {
                String::new()
            },
            last,
        }
    }

    /// Ends the current phase and starts the next one.
    pub fn lap(&mut self, phase: &str) {
        let Some(last) = self.last else {
            return;
        };

        self.logger.log(&Event {
            oper: self.oper,
            entity: &self.entity,
            phase,
            elapsed: last.elapsed(),
        });

        self.last = Some(Instant::now());
    }
}

impl fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stopwatch")
            .field("oper", &self.oper)
            .field("entity", &self.entity)
            .field("enabled", &self.last.is_some())
            .finish()
    }
}
