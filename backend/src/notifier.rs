use common::notify::{Notifier, Severity};
use log::{error, info, warn};

/// Notification sink backed by the process logger. The API itself has no
/// UI to push toasts to; messages land in the server log and the HTTP
/// response body carries the user-facing text.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => info!("{message}"),
            Severity::Warning => warn!("{message}"),
            Severity::Error => error!("{message}"),
        }
    }
}
