use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GOAL: f64 = 1_000_000_000.0;

/// Checkpoints shown on the way to the default goal.
pub static DEFAULT_MILESTONES: Lazy<Vec<Milestone>> = Lazy::new(|| {
    vec![
        Milestone::new("$1 Million", 1_000_000.0),
        Milestone::new("$10 Million", 10_000_000.0),
        Milestone::new("$100 Million", 100_000_000.0),
        Milestone::new("$1 Billion", 1_000_000_000.0),
    ]
});

/// A labelled net-worth threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub label: String,
    pub value: f64,
}

impl Milestone {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Evaluation of a single milestone against the current net worth.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneStatus {
    pub label: String,
    pub value: f64,
    pub reached: bool,
}

impl MilestoneStatus {
    pub fn status_label(&self) -> &'static str {
        if self.reached {
            "Completed"
        } else {
            "Pending"
        }
    }
}
