use serde::{Deserialize, Serialize};

/// How loudly a message should be surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Generic notification sink.
///
/// The matrix model and the services report success/failure/validation
/// messages through this trait and never format or display UI
/// themselves. The backend wires in a logger-backed implementation;
/// tests can capture messages with their own.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}
