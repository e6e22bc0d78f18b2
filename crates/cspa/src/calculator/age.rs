//! Calendar-aware year/month/day breakdown between two dates.
//!
//! Years and months are stepped with chrono's month arithmetic, which clamps
//! to the last day of a shorter month (Jan 31 + 1 month = Feb 28/29). Whatever
//! is left after the last whole month is counted in days, so leap days and
//! uneven month lengths fall out naturally.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Duration expressed in calendar units rather than total days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Age {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl Age {
    pub fn new(years: i32, months: i32, days: i32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    /// Breakdown of `start..end`. When `end` precedes `start`, every
    /// component of the reversed interval is negated.
    ///
    /// Returns `None` only if stepping by months leaves chrono's date range.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if end < start {
            return Self::between(end, start).map(Age::negated);
        }

        let mut years = end.year() - start.year();
        if shift_months(start, years * 12)? > end {
            years -= 1;
        }

        let cursor = shift_months(start, years * 12)?;
        let mut months =
            (end.year() - cursor.year()) * 12 + end.month() as i32 - cursor.month() as i32;
        if shift_months(start, years * 12 + months)? > end {
            months -= 1;
        }

        let cursor = shift_months(start, years * 12 + months)?;
        let days = i32::try_from(end.signed_duration_since(cursor).num_days()).ok()?;

        Some(Self::new(years, months, days))
    }

    fn negated(self) -> Self {
        Self::new(-self.years, -self.months, -self.days)
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

fn plural(n: i32) -> &'static str {
    if n.abs() == 1 {
        ""
    } else {
        "s"
    }
}

fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn counts_whole_years_months_and_days() {
        let age = Age::between(date(2004, 1, 1), date(2023, 3, 15)).expect("in range");
        assert_eq!(age, Age::new(19, 2, 14));
    }

    #[test]
    fn day_before_birthday_is_still_previous_year() {
        let age = Age::between(date(2002, 3, 22), date(2023, 3, 21)).expect("in range");
        assert_eq!(age, Age::new(20, 11, 27));

        let age = Age::between(date(2002, 3, 22), date(2023, 3, 22)).expect("in range");
        assert_eq!(age, Age::new(21, 0, 0));
    }

    #[test]
    fn leap_day_birthday_clamps_to_end_of_february() {
        let age = Age::between(date(2004, 2, 29), date(2005, 2, 28)).expect("in range");
        assert_eq!(age, Age::new(1, 0, 0));

        let age = Age::between(date(2004, 2, 29), date(2005, 3, 1)).expect("in range");
        assert_eq!(age, Age::new(1, 0, 1));
    }

    #[test]
    fn end_of_month_start_borrows_from_short_month() {
        let age = Age::between(date(2023, 1, 31), date(2023, 3, 1)).expect("in range");
        assert_eq!(age, Age::new(0, 1, 1));
    }

    #[test]
    fn reversed_interval_is_negated() {
        let age = Age::between(date(2023, 3, 15), date(2004, 1, 1)).expect("in range");
        assert_eq!(age, Age::new(-19, -2, -14));
    }

    #[test]
    fn same_day_is_zero() {
        let today = date(2020, 6, 3);
        assert_eq!(Age::between(today, today), Some(Age::default()));
    }

    #[test]
    fn display_pluralizes_units() {
        assert_eq!(Age::new(1, 2, 1).to_string(), "1 year, 2 months, 1 day");
        assert_eq!(Age::new(16, 0, 13).to_string(), "16 years, 0 months, 13 days");
    }
}
