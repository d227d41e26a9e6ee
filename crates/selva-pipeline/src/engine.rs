//! The rule resolution and evaluation engine.
//!
//! One invocation runs three tier sub-runs (parameter, scope,
//! scope-kind) inside a single immediate transaction. Each tier opens
//! its own checkpoint window; the windows may differ by microseconds
//! within one run. That independence is intentional: every tier scans
//! its own candidate source, and a tier must never miss data because a
//! sibling's window went stale. The price is that a committed run
//! leaves three checkpoint rows, one per tier.

use rusqlite::{Connection, Transaction};
use selva_core::config::MonitorConfig;
use selva_core::errors::PipelineError;
use selva_core::rules::{out_of_bounds, RuleTier};
use selva_core::types::{CandidateRef, CheckTier, CoverageMeasurement, RuleRef, Window};
use selva_storage::connection::writer::with_immediate_transaction;
use selva_storage::queries::{checks, measurements, readings, rules};

use crate::alerts::create_alert;
use crate::notify::{self, Notifier, PendingNotification};

/// Outcome of one tier sub-run.
#[derive(Debug, Clone, Copy)]
pub struct TierSummary {
    pub window: Window,
    pub candidates: usize,
    pub alerts_raised: usize,
}

/// Outcome of one full check run.
#[derive(Debug, Clone, Copy)]
pub struct CheckSummary {
    pub parameter: TierSummary,
    pub scope: TierSummary,
    pub scope_kind: TierSummary,
}

impl CheckSummary {
    pub fn alerts_raised(&self) -> usize {
        self.parameter.alerts_raised + self.scope.alerts_raised + self.scope_kind.alerts_raised
    }
}

/// Run all three rule tiers over newly created data.
///
/// The whole invocation is one transaction: on any fatal error every
/// alert and every checkpoint from this run rolls back, so a retry
/// reuses the same stale windows instead of silently skipping data.
/// Notifications are queued during the run and dispatched only after
/// the transaction commits, so a rolled-back alert is never announced.
pub fn run_checks(
    conn: &Connection,
    config: &MonitorConfig,
    notifier: &dyn Notifier,
) -> Result<CheckSummary, PipelineError> {
    let mut pending = Vec::new();
    let summary = with_immediate_transaction::<_, _, PipelineError>(conn, |tx| {
        let parameter = run_parameter_tier(tx, config, &mut pending)?;

        let scope_rules = rules::all_scope(tx)?;
        let scope = run_measurement_tier(
            tx, config, &mut pending, CheckTier::Scope, &scope_rules,
            |r| RuleRef::Scope(r.id),
        )?;

        let kind_rules = rules::all_scope_kind(tx)?;
        let scope_kind = run_measurement_tier(
            tx, config, &mut pending, CheckTier::ScopeKind, &kind_rules,
            |r| RuleRef::ScopeKind(r.id),
        )?;

        Ok(CheckSummary { parameter, scope, scope_kind })
    })?;

    notify::dispatch_all(notifier, &pending);

    tracing::info!(
        parameter_alerts = summary.parameter.alerts_raised,
        scope_alerts = summary.scope.alerts_raised,
        scope_kind_alerts = summary.scope_kind.alerts_raised,
        "alert check run complete"
    );
    Ok(summary)
}

fn run_parameter_tier(
    tx: &Transaction<'_>,
    config: &MonitorConfig,
    pending: &mut Vec<PendingNotification>,
) -> Result<TierSummary, PipelineError> {
    let window = checks::open_window(tx, CheckTier::Parameter)?;
    let candidates = readings::in_window(tx, &window)?;
    let tier_rules = rules::all_parameter(tx)?;

    let mut alerts_raised = 0;
    for rule in &tier_rules {
        for candidate in rule.narrow(&candidates) {
            let Some(current) = rule.metric(candidate) else {
                tracing::debug!(
                    rule_id = rule.id,
                    reading_id = candidate.id,
                    parameter = %rule.parameter,
                    "reading carries no value for parameter; skipped"
                );
                continue;
            };
            let value = if rule.is_absolute() {
                current
            } else {
                // Lag-by-one over all history, partitioned by station; a
                // missing previous value is 0.0 by policy.
                let baseline = readings::prior(tx, candidate.station_id, candidate.created_at)?
                    .and_then(|prev| rule.metric(&prev))
                    .unwrap_or(0.0);
                current - baseline
            };
            if out_of_bounds(value, rule.bounds()) {
                create_alert(
                    tx,
                    rule,
                    RuleRef::Parameter(rule.id),
                    CandidateRef::Reading(candidate.id),
                    value,
                    &config.notifications,
                    pending,
                )?;
                alerts_raised += 1;
            }
        }
    }

    Ok(TierSummary { window, candidates: candidates.len(), alerts_raised })
}

/// Shared sub-run for the two measurement-backed tiers (scope and
/// scope-kind); they differ only in the rule type and alert reference.
fn run_measurement_tier<R>(
    tx: &Transaction<'_>,
    config: &MonitorConfig,
    pending: &mut Vec<PendingNotification>,
    tier: CheckTier,
    tier_rules: &[R],
    rule_ref: impl Fn(&R) -> RuleRef,
) -> Result<TierSummary, PipelineError>
where
    R: RuleTier<Candidate = CoverageMeasurement>,
{
    let window = checks::open_window(tx, tier)?;
    let candidates = measurements::in_window(tx, &window)?;

    let mut alerts_raised = 0;
    for rule in tier_rules {
        for candidate in rule.narrow(&candidates) {
            let Some(current) = rule.metric(candidate) else {
                continue;
            };
            let value = if rule.is_absolute() {
                current
            } else {
                // Lag-by-one partitioned by (scope, source, kind) so
                // deltas never mix mask families.
                let baseline = measurements::prior(
                    tx,
                    candidate.scope_id,
                    candidate.source,
                    candidate.kind,
                    candidate.created_at,
                )?
                .and_then(|prev| rule.metric(&prev))
                .unwrap_or(0.0);
                current - baseline
            };
            if out_of_bounds(value, rule.bounds()) {
                create_alert(
                    tx,
                    rule,
                    rule_ref(rule),
                    CandidateRef::Measurement(candidate.id),
                    value,
                    &config.notifications,
                    pending,
                )?;
                alerts_raised += 1;
            }
        }
    }

    Ok(TierSummary { window, candidates: candidates.len(), alerts_raised })
}
