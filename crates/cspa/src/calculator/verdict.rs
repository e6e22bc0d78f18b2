use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::age::Age;
use super::policy::CalculatorPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    Available,
    Unavailable,
}

/// Eligibility outcome plus the structured fields its message was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub kind: VerdictKind,
    pub bulletin_date: NaiveDate,
    pub cspa_age: Age,
    pub message: String,
}

impl EligibilityVerdict {
    pub(crate) fn decide(policy: &CalculatorPolicy, bulletin_date: NaiveDate, cspa_age: Age) -> Self {
        if policy.is_eligible(&cspa_age) {
            let message = format!(
                "Your CSPA age on {} (the Visa Bulletin date) would be {} years, {} months, and {} days",
                bulletin_date.format("%b %-d, %Y"),
                cspa_age.years,
                cspa_age.months,
                cspa_age.days
            );
            Self {
                kind: VerdictKind::Available,
                bulletin_date,
                cspa_age,
                message,
            }
        } else {
            Self {
                kind: VerdictKind::Unavailable,
                bulletin_date,
                cspa_age,
                message: format!(
                    "Unfortunately you cannot apply for a visa. The CSPA age is equal to or older than {} years",
                    policy.age_threshold_years
                ),
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.kind == VerdictKind::Available
    }
}
