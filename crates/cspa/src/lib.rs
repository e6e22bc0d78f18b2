//! Child Status Protection Act (CSPA) age calculation.
//!
//! The [`bulletin`] module indexes the family-sponsored visa bulletin by
//! preference category and chargeability country, and the [`calculator`]
//! module turns an applicant's dates into a CSPA age and an eligibility
//! verdict against that table.

pub mod bulletin;
pub mod calculator;
pub mod config;
pub mod error;
pub mod telemetry;

pub use bulletin::{BulletinCell, BulletinRow, BulletinTable, Category, Country, UnknownKey};
pub use calculator::{
    Age, CalculationError, CalculationResult, CalculatorPolicy, CspaCalculator,
    EligibilityVerdict, NegativePendingPolicy, VerdictKind, CSPA_AGE_THRESHOLD_YEARS,
};
