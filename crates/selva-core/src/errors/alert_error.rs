//! Alert materialization errors.

/// Errors raised while materializing an alert record.
/// An alert without a resolvable owner is an invariant violation, so
/// `UnknownOwner` aborts the enclosing pipeline transaction.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("Alert owner (user {user_id}) could not be resolved")]
    UnknownOwner { user_id: i64 },
}
