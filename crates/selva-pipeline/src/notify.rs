//! Notification hook: fire-and-forget, best-effort.
//!
//! Real delivery (email, etc.) lives outside this crate; the pipeline
//! only knows this seam. Notifications raised during a check run are
//! queued and dispatched after the run's transaction commits, so a
//! rolled-back alert is never announced. Delivery failures are logged
//! and never affect alert persistence.

use selva_core::types::{Alert, User};

/// A failed notification attempt. Non-fatal by contract.
#[derive(Debug, thiserror::Error)]
#[error("notification failed: {message}")]
pub struct NotifyError {
    pub message: String,
}

/// Collaborator contract for notifying a user about a new alert.
pub trait Notifier {
    fn notify(&self, user: &User, alert: &Alert, description: &str) -> Result<(), NotifyError>;
}

/// A notification queued during a check run, held back until the run's
/// transaction has committed.
#[derive(Debug, Clone)]
pub struct PendingNotification {
    pub user: User,
    pub alert: Alert,
    pub description: String,
}

/// Dispatch queued notifications. Failures are logged, never returned.
pub(crate) fn dispatch_all(notifier: &dyn Notifier, pending: &[PendingNotification]) {
    for p in pending {
        if let Err(e) = notifier.notify(&p.user, &p.alert, &p.description) {
            tracing::warn!(alert_id = p.alert.id, user = %p.user.email, error = %e,
                "notification failed; alert kept");
        }
    }
}

/// Default notifier: logs the would-be message.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, user: &User, alert: &Alert, description: &str) -> Result<(), NotifyError> {
        tracing::info!(
            alert_id = alert.id,
            user = %user.email,
            description,
            "alert notification"
        );
        Ok(())
    }
}
