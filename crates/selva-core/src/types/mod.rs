//! Domain types shared across storage and pipeline.

pub mod alert;
pub mod mask;
pub mod measurement;
pub mod reading;
pub mod scope;
pub mod user;
pub mod window;

pub use alert::{Alert, CandidateRef, RuleRef};
pub use mask::{CoverageMask, MaskKind, MaskSource};
pub use measurement::CoverageMeasurement;
pub use reading::{Reading, Station};
pub use scope::{Scope, ScopeKind};
pub use user::User;
pub use window::{now_micros, CheckTier, Window};
