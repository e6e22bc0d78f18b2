use serde::{Deserialize, Serialize};

use super::age::Age;

/// Statutory age limit: the CSPA age must stay strictly below this many years.
pub const CSPA_AGE_THRESHOLD_YEARS: i32 = 21;

/// How to treat an approval date that precedes the priority date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativePendingPolicy {
    /// Carry the negative pending period into the calculation unchanged.
    #[default]
    Allow,
    /// Fail the calculation with `ApprovalBeforePriority`.
    Reject,
}

/// Tunable rules applied by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorPolicy {
    pub age_threshold_years: i32,
    pub negative_pending: NegativePendingPolicy,
}

impl Default for CalculatorPolicy {
    fn default() -> Self {
        Self {
            age_threshold_years: CSPA_AGE_THRESHOLD_YEARS,
            negative_pending: NegativePendingPolicy::Allow,
        }
    }
}

impl CalculatorPolicy {
    pub fn is_eligible(&self, cspa_age: &Age) -> bool {
        cspa_age.years < self.age_threshold_years
    }

    pub fn rejects_pending_days(&self, pending_days: i64) -> bool {
        pending_days < 0 && self.negative_pending == NegativePendingPolicy::Reject
    }
}
