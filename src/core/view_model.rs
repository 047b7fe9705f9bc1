//! Pure derivations over [`AppState`]: progress toward the goal, milestone
//! flags, and the add-transaction state transition.

use crate::domain::{AppState, Milestone, MilestoneStatus, Transaction, TransactionKind};

use super::input::{validate_amount, InputError};

/// Percentage of `goal` reached, capped at 100.
///
/// Negative net worth passes through as a negative percentage; only the upper
/// bound is clamped. A goal that is not a positive finite number yields 0.
pub fn compute_progress(net_worth: f64, goal: f64) -> f64 {
    if goal <= 0.0 || !goal.is_finite() {
        return 0.0;
    }
    (net_worth / goal * 100.0).min(100.0)
}

/// Evaluates each milestone independently against `net_worth`.
pub fn milestone_status(net_worth: f64, milestones: &[Milestone]) -> Vec<MilestoneStatus> {
    milestones
        .iter()
        .map(|milestone| MilestoneStatus {
            label: milestone.label.clone(),
            value: milestone.value,
            reached: net_worth >= milestone.value,
        })
        .collect()
}

/// Produces the state that follows recording one transaction.
///
/// The input state is untouched; callers swap in the returned value, so a
/// rejected amount leaves nothing half-applied.
pub fn apply_transaction(
    state: &AppState,
    kind: TransactionKind,
    amount: f64,
    id: i64,
    date: impl Into<String>,
) -> Result<AppState, InputError> {
    let amount = validate_amount(amount)?;
    // JSON has no encoding for infinities, so such a total could never reload.
    let net_worth = state.net_worth + kind.signed(amount);
    if !net_worth.is_finite() {
        return Err(InputError::OutOfRange);
    }
    let transaction = Transaction::new(id, kind, amount, date);

    let mut history = Vec::with_capacity(state.history.len() + 1);
    history.push(transaction);
    history.extend(state.history.iter().cloned());

    Ok(AppState { net_worth, history })
}

/// Everything the screen shows, derived from one state snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub net_worth: f64,
    pub goal: f64,
    pub progress: f64,
    pub milestones: Vec<MilestoneStatus>,
    pub transaction_count: usize,
}

impl Dashboard {
    pub fn build(state: &AppState, goal: f64, milestones: &[Milestone]) -> Self {
        Self {
            net_worth: state.net_worth,
            goal,
            progress: compute_progress(state.net_worth, goal),
            milestones: milestone_status(state.net_worth, milestones),
            transaction_count: state.history.len(),
        }
    }

    /// Lowest milestone not yet reached.
    pub fn next_milestone(&self) -> Option<&MilestoneStatus> {
        self.milestones
            .iter()
            .filter(|status| !status.reached)
            .min_by(|a, b| a.value.total_cmp(&b.value))
    }

    pub fn remaining_to_goal(&self) -> f64 {
        (self.goal - self.net_worth).max(0.0)
    }

    pub fn reached_count(&self) -> usize {
        self.milestones.iter().filter(|status| status.reached).count()
    }
}
