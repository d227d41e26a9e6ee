//! The alert materializer: turns an out-of-bounds evaluation into an
//! immutable alert record.

use rusqlite::Connection;
use selva_core::config::NotificationConfig;
use selva_core::errors::{AlertError, PipelineError};
use selva_core::rules::RuleTier;
use selva_core::types::{now_micros, Alert, CandidateRef, RuleRef};
use selva_storage::queries::{alerts, users};

use crate::notify::PendingNotification;

/// Persist an alert for one (rule, candidate, value) triple.
///
/// The rule's descriptive fields are snapshotted into `rule_attributes`
/// at insert time, inside the caller's transaction, so later rule edits
/// cannot alter historical alert text. An unresolvable owner aborts the
/// enclosing transaction. When notifications are enabled and the owner
/// has opted in, a notification is queued on `pending`; the caller
/// dispatches the queue only after its transaction commits.
pub fn create_alert<R: RuleTier>(
    conn: &Connection,
    rule: &R,
    rule_ref: RuleRef,
    candidate_ref: CandidateRef,
    value: f64,
    notifications: &NotificationConfig,
    pending: &mut Vec<PendingNotification>,
) -> Result<Alert, PipelineError> {
    let user = users::find(conn, rule.owner())?
        .ok_or(AlertError::UnknownOwner { user_id: rule.owner() })?;

    let snapshot = rule.snapshot();
    let created_at = now_micros();
    let id = alerts::insert(conn, user.id, rule_ref, candidate_ref, &snapshot, value, created_at)?;

    let alert = Alert {
        id,
        user_id: user.id,
        rule: rule_ref,
        candidate: candidate_ref,
        rule_attributes: snapshot,
        value,
        created_at,
        last_seen_at: None,
    };
    tracing::info!(
        alert_id = alert.id,
        user_id = alert.user_id,
        rule = ?rule_ref,
        value,
        "alert raised"
    );

    if notifications.enabled && user.notify_by_email {
        let description = rule.describe(value);
        pending.push(PendingNotification { user, alert: alert.clone(), description });
    }

    Ok(alert)
}
