use chrono::NaiveDate;
use cspa::config::{AppConfig, BulletinConfig};
use cspa::{BulletinTable, CspaCalculator};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) calculator: Arc<CspaCalculator>,
}

/// Build the session calculator. A bulletin that cannot be loaded leaves the
/// calculator on the empty table so requests still get `cutoff_not_found`.
pub(crate) fn load_calculator(config: &AppConfig) -> CspaCalculator {
    let table = load_bulletin_or_empty(&config.bulletin);
    CspaCalculator::new(table).with_policy(config.calculator.policy())
}

fn load_bulletin_or_empty(config: &BulletinConfig) -> BulletinTable {
    match BulletinTable::from_path(&config.path) {
        Ok(table) => {
            info!(
                path = %config.path.display(),
                categories = table.categories().len(),
                "visa bulletin loaded"
            );
            table
        }
        Err(err) => {
            warn!(path = %config.path.display(), %err, "visa bulletin unavailable; serving empty table");
            BulletinTable::empty()
        }
    }
}

const INPUT_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parse an applicant-supplied date as `YYYY-MM-DD` or `MM/DD/YYYY`.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    INPUT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| format!("failed to parse '{raw}' as YYYY-MM-DD or MM/DD/YYYY"))
}

/// Lenient variant for request bodies: blank or unparseable text is a
/// missing date, which the calculator reports as invalid input.
pub(crate) fn parse_optional_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.filter(|value| !value.trim().is_empty())
        .and_then(|value| parse_date(value).ok())
}
