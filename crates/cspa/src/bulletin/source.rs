//! CSV ingestion for bulletin tables.
//!
//! Expects the header `preference,other,china,india,mexico,philippines`,
//! which is how the family-sponsored final action tables are exported.

use super::{BulletinRow, Category};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum BulletinSourceError {
    #[error("failed to read bulletin data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid bulletin CSV data: {0}")]
    Csv(#[from] csv::Error),
}

pub fn read_rows<R: Read>(reader: R) -> Result<Vec<BulletinRow>, BulletinSourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<RawBulletinRow>() {
        let raw = record?;
        match raw.preference.parse::<Category>() {
            Ok(category) => rows.push(raw.into_row(category)),
            Err(err) => warn!(%err, "skipping bulletin row"),
        }
    }

    Ok(rows)
}

pub fn read_rows_from_path(path: impl AsRef<Path>) -> Result<Vec<BulletinRow>, BulletinSourceError> {
    let file = File::open(path.as_ref())?;
    read_rows(file)
}

#[derive(Debug, Deserialize)]
struct RawBulletinRow {
    preference: String,
    #[serde(default, deserialize_with = "none_as_empty")]
    other: String,
    #[serde(default, deserialize_with = "none_as_empty")]
    china: String,
    #[serde(default, deserialize_with = "none_as_empty")]
    india: String,
    #[serde(default, deserialize_with = "none_as_empty")]
    mexico: String,
    #[serde(default, deserialize_with = "none_as_empty")]
    philippines: String,
}

impl RawBulletinRow {
    fn into_row(self, category: Category) -> BulletinRow {
        BulletinRow {
            category,
            other: self.other,
            china: self.china,
            india: self.india,
            mexico: self.mexico,
            philippines: self.philippines,
        }
    }
}

fn none_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
