//! CSPA age calculation against a bulletin table.
//!
//! The CSPA age is the applicant's age on the bulletin date, reduced by the
//! time the petition spent pending (priority date to approval date). A visa
//! is available when that adjusted age is still under the threshold in
//! [`CalculatorPolicy`].

mod age;
mod policy;
mod verdict;

pub use age::Age;
pub use policy::{CalculatorPolicy, NegativePendingPolicy, CSPA_AGE_THRESHOLD_YEARS};
pub use verdict::{EligibilityVerdict, VerdictKind};

use crate::bulletin::{BulletinTable, Category, Country};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Why a calculation produced no ages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum CalculationError {
    #[error("invalid input dates")]
    InvalidInputDates,
    #[error("no cutoff date available for this category/country")]
    CutoffNotFound,
    #[error("approval date precedes the priority date")]
    ApprovalBeforePriority,
}

/// Output of one calculation.
///
/// `error` is set exactly when every numeric field and `verdict` are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub pending_days: Option<i64>,
    pub total_days: Option<i64>,
    pub cspa_age: Option<Age>,
    pub actual_age: Option<Age>,
    pub error: Option<CalculationError>,
    pub verdict: Option<EligibilityVerdict>,
}

impl CalculationResult {
    pub fn failed(error: CalculationError) -> Self {
        Self {
            pending_days: None,
            total_days: None,
            cspa_age: None,
            actual_age: None,
            error: Some(error),
            verdict: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_available(&self) -> bool {
        self.verdict
            .as_ref()
            .is_some_and(EligibilityVerdict::is_available)
    }
}

/// Calculator bound to one bulletin table for the life of a session.
#[derive(Debug, Clone, Default)]
pub struct CspaCalculator {
    table: BulletinTable,
    policy: CalculatorPolicy,
}

impl CspaCalculator {
    pub fn new(table: BulletinTable) -> Self {
        Self {
            table,
            policy: CalculatorPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CalculatorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn table(&self) -> &BulletinTable {
        &self.table
    }

    pub fn policy(&self) -> &CalculatorPolicy {
        &self.policy
    }

    /// Swap in freshly loaded bulletin data.
    pub fn replace_table(&mut self, table: BulletinTable) {
        self.table = table;
    }

    pub fn is_valid_input_date(date: Option<NaiveDate>) -> bool {
        date.is_some()
    }

    pub fn calculate(
        &self,
        birth_date: Option<NaiveDate>,
        priority_date: Option<NaiveDate>,
        approval_date: Option<NaiveDate>,
        category: Category,
        country: Country,
    ) -> CalculationResult {
        let (Some(birth_date), Some(priority_date), Some(approval_date)) =
            (birth_date, priority_date, approval_date)
        else {
            debug!(%category, %country, "calculation skipped: missing input dates");
            return CalculationResult::failed(CalculationError::InvalidInputDates);
        };

        let Some(bulletin_date) = self.table.lookup(category, country) else {
            debug!(%category, %country, "calculation skipped: no cutoff date");
            return CalculationResult::failed(CalculationError::CutoffNotFound);
        };

        let result =
            self.calculate_with_bulletin_date(birth_date, priority_date, approval_date, bulletin_date);
        debug!(
            %category,
            %country,
            %bulletin_date,
            error = ?result.error,
            available = result.is_available(),
            "cspa age calculated"
        );
        result
    }

    /// Compute durations, ages and the verdict against an explicit bulletin date.
    pub fn calculate_with_bulletin_date(
        &self,
        birth_date: NaiveDate,
        priority_date: NaiveDate,
        approval_date: NaiveDate,
        bulletin_date: NaiveDate,
    ) -> CalculationResult {
        let pending = approval_date.signed_duration_since(priority_date);
        let pending_days = pending.num_days();
        if self.policy.rejects_pending_days(pending_days) {
            return CalculationResult::failed(CalculationError::ApprovalBeforePriority);
        }

        let total_days = bulletin_date.signed_duration_since(birth_date).num_days();

        let Some(adjusted_date) = bulletin_date.checked_sub_signed(pending) else {
            return CalculationResult::failed(CalculationError::InvalidInputDates);
        };

        let (Some(cspa_age), Some(actual_age)) = (
            Age::between(birth_date, adjusted_date),
            Age::between(birth_date, bulletin_date),
        ) else {
            return CalculationResult::failed(CalculationError::InvalidInputDates);
        };

        let verdict = EligibilityVerdict::decide(&self.policy, bulletin_date, cspa_age);

        CalculationResult {
            pending_days: Some(pending_days),
            total_days: Some(total_days),
            cspa_age: Some(cspa_age),
            actual_age: Some(actual_age),
            error: None,
            verdict: Some(verdict),
        }
    }
}
