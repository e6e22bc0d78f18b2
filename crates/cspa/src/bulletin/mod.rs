//! Visa bulletin cutoff dates keyed by preference category and country.

pub mod source;

pub use source::{read_rows, read_rows_from_path, BulletinSourceError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Text format used by bulletin cells, e.g. `03/22/2007`.
pub const BULLETIN_DATE_FORMAT: &str = "%m/%d/%Y";

/// Family-sponsored preference category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    F1,
    F2A,
    F2B,
    F3,
    F4,
}

impl Category {
    pub const COUNT: usize = 5;
    pub const ALL: [Category; Category::COUNT] = [
        Category::F1,
        Category::F2A,
        Category::F2B,
        Category::F3,
        Category::F4,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::F1 => "F1",
            Category::F2A => "F2A",
            Category::F2B => "F2B",
            Category::F3 => "F3",
            Category::F4 => "F4",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownKey::Category(trimmed.to_string()))
    }
}

/// Chargeability area a bulletin column applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Other,
    China,
    India,
    Mexico,
    Philippines,
}

impl Country {
    pub const COUNT: usize = 5;
    pub const ALL: [Country; Country::COUNT] = [
        Country::Other,
        Country::China,
        Country::India,
        Country::Mexico,
        Country::Philippines,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Country::Other => "other",
            Country::China => "china",
            Country::India => "india",
            Country::Mexico => "mexico",
            Country::Philippines => "philippines",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Country {
    type Err = UnknownKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Country::ALL
            .into_iter()
            .find(|country| country.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownKey::Country(trimmed.to_string()))
    }
}

/// Raised when a category or country name is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnknownKey {
    #[error("unknown preference category '{0}' (expected one of F1, F2A, F2B, F3, F4)")]
    Category(String),
    #[error("unknown country '{0}' (expected one of other, china, india, mexico, philippines)")]
    Country(String),
}

/// One bulletin line: a category and the raw cutoff text for each country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletinRow {
    #[serde(rename = "preference")]
    pub category: Category,
    pub other: String,
    pub china: String,
    pub india: String,
    pub mexico: String,
    pub philippines: String,
}

impl BulletinRow {
    pub fn date_text(&self, country: Country) -> &str {
        match country {
            Country::Other => &self.other,
            Country::China => &self.china,
            Country::India => &self.india,
            Country::Mexico => &self.mexico,
            Country::Philippines => &self.philippines,
        }
    }
}

/// State of a single (category, country) cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BulletinCell {
    /// No row for the category was supplied.
    #[default]
    Missing,
    /// The row was supplied but the cell did not hold a `MM/dd/yyyy` date.
    Invalid { raw: String },
    Date(NaiveDate),
}

impl BulletinCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            BulletinCell::Date(date) => Some(*date),
            BulletinCell::Missing | BulletinCell::Invalid { .. } => None,
        }
    }
}

/// Immutable cutoff-date table built once from bulletin rows.
///
/// The empty table is a valid value: every lookup reports "not found" until
/// a populated table replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulletinTable {
    cells: [[BulletinCell; Country::COUNT]; Category::COUNT],
    present: [bool; Category::COUNT],
}

impl BulletinTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Index `rows`; a repeated category overwrites the earlier row.
    pub fn new<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = BulletinRow>,
    {
        let mut table = Self::empty();
        let mut row_count = 0usize;

        for row in rows {
            row_count += 1;
            let category = row.category;
            if table.present[category.index()] {
                warn!(%category, "bulletin category repeated; later row wins");
            }

            for country in Country::ALL {
                let raw = row.date_text(country);
                let cell = match parse_bulletin_date(raw) {
                    Some(date) => BulletinCell::Date(date),
                    None => {
                        warn!(%category, %country, raw, "unparseable bulletin cutoff date");
                        BulletinCell::Invalid {
                            raw: raw.to_string(),
                        }
                    }
                };
                table.cells[category.index()][country.index()] = cell;
            }
            table.present[category.index()] = true;
        }

        debug!(
            rows = row_count,
            categories = table.categories().len(),
            "bulletin table indexed"
        );
        table
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BulletinSourceError> {
        Ok(Self::new(read_rows(reader)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BulletinSourceError> {
        Ok(Self::new(read_rows_from_path(path)?))
    }

    /// Cutoff date for the pair, or `None` when absent or unparseable.
    pub fn lookup(&self, category: Category, country: Country) -> Option<NaiveDate> {
        self.cell(category, country).date()
    }

    pub fn cell(&self, category: Category, country: Country) -> &BulletinCell {
        &self.cells[category.index()][country.index()]
    }

    /// Categories that had a row in the source data, in bulletin order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| self.present[category.index()])
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        !self.present.iter().any(|present| *present)
    }
}

/// Parse a bulletin cell in `MM/dd/yyyy` form. Markers like `C` yield `None`.
///
/// chrono's `%Y` takes any number of digits, so the year width is checked
/// first: `03/22/07` is not a bulletin date.
pub fn parse_bulletin_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let mut parts = trimmed.split('/');
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some()
        || !is_digits(month, 1..=2)
        || !is_digits(day, 1..=2)
        || !is_digits(year, 4..=4)
    {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, BULLETIN_DATE_FORMAT).ok()
}

fn is_digits(part: &str, width: std::ops::RangeInclusive<usize>) -> bool {
    width.contains(&part.len()) && part.bytes().all(|byte| byte.is_ascii_digit())
}
