//! Rule and alert owners.

use serde::{Deserialize, Serialize};

/// Owner of rules and the alerts they trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Email notification opt-in; when false the notifier is never invoked
    /// for this user's alerts.
    pub notify_by_email: bool,
}
