//! Notification signals surfaced to the user.
//!
//! The stores report operation outcomes as `(severity, message)` pairs and
//! never care how they are shown. [`TerminalSink`] renders them as colored
//! terminal lines; [`MemorySink`] records them for assertions and headless
//! runs. Sinks are observational: a sink must not fail the operation that
//! signals it.

use std::fmt;
use std::sync::Mutex;

use colored::Colorize;

/// Outcome category of a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    /// Lowercase name, used in logs and test assertions
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receiver for store signals
pub trait NotificationSink: Send + Sync {
    /// Delivers one signal; implementations must not panic or block
    fn notify(&self, severity: Severity, message: &str);
}

/// Sink that prints colored lines to the terminal
///
/// Errors go to stderr, everything else to stdout.
#[derive(Debug, Default, Clone)]
pub struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success => println!("{}", message.green()),
            Severity::Error => eprintln!("{}", message.red()),
            Severity::Info => println!("{}", message.cyan()),
            Severity::Warning => println!("{}", message.yellow()),
        }
    }
}

/// Sink that records signals in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    signals: Mutex<Vec<(Severity, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded signals, in delivery order
    pub fn signals(&self) -> Vec<(Severity, String)> {
        self.signals.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Messages only, in delivery order
    pub fn messages(&self) -> Vec<String> {
        self.signals
            .lock()
            .map(|s| s.iter().map(|(_, m)| m.clone()).collect())
            .unwrap_or_default()
    }

    /// True when a signal with `severity` contains `fragment`
    pub fn has(&self, severity: Severity, fragment: &str) -> bool {
        self.signals
            .lock()
            .map(|s| {
                s.iter()
                    .any(|(sev, msg)| *sev == severity && msg.as_str().contains(fragment))
            })
            .unwrap_or(false)
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, severity: Severity, message: &str) {
        if let Ok(mut signals) = self.signals.lock() {
            signals.push((severity, message.to_string()));
        }
    }
}
