use crate::infra::parse_date;
use chrono::NaiveDate;
use clap::Args;
use cspa::config::AppConfig;
use cspa::error::AppError;
use cspa::{BulletinCell, BulletinTable, CalculationResult, Category, Country, CspaCalculator};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Applicant date of birth (YYYY-MM-DD or MM/DD/YYYY)
    #[arg(long, value_parser = parse_date)]
    pub(crate) birth_date: NaiveDate,
    /// Petition priority date (YYYY-MM-DD or MM/DD/YYYY)
    #[arg(long, value_parser = parse_date)]
    pub(crate) priority_date: NaiveDate,
    /// Petition approval date (YYYY-MM-DD or MM/DD/YYYY)
    #[arg(long, value_parser = parse_date)]
    pub(crate) approval_date: NaiveDate,
    /// Family-sponsored preference category (F1, F2A, F2B, F3, F4)
    #[arg(long, default_value = "F1")]
    pub(crate) category: Category,
    /// Chargeability country (other, china, india, mexico, philippines)
    #[arg(long, default_value = "other")]
    pub(crate) country: Country,
    /// Bulletin CSV to use instead of the configured one
    #[arg(long)]
    pub(crate) bulletin: Option<PathBuf>,
    /// Print the raw calculation result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct BulletinArgs {
    /// Bulletin CSV to use instead of the configured one
    #[arg(long)]
    pub(crate) bulletin: Option<PathBuf>,
}

pub(crate) fn run_calculate(config: &AppConfig, args: CalculateArgs) -> Result<(), AppError> {
    let CalculateArgs {
        birth_date,
        priority_date,
        approval_date,
        category,
        country,
        bulletin,
        json,
    } = args;

    let path = bulletin.unwrap_or_else(|| config.bulletin.path.clone());
    let table = BulletinTable::from_path(&path)?;
    let calculator = CspaCalculator::new(table).with_policy(config.calculator.policy());

    let result = calculator.calculate(
        Some(birth_date),
        Some(priority_date),
        Some(approval_date),
        category,
        country,
    );

    if json {
        let rendered = serde_json::to_string_pretty(&result).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        println!("{}", render_calculation(&result, category, country));
    }

    Ok(())
}

pub(crate) fn run_bulletin_show(config: &AppConfig, args: BulletinArgs) -> Result<(), AppError> {
    let path = args.bulletin.unwrap_or_else(|| config.bulletin.path.clone());
    let table = BulletinTable::from_path(&path)?;

    println!("Visa bulletin ({})", path.display());
    print!("{}", render_bulletin(&table));
    Ok(())
}

fn render_calculation(result: &CalculationResult, category: Category, country: Country) -> String {
    let mut out = format!("CSPA age calculation ({category}, {country})\n");

    if let Some(error) = result.error {
        out.push_str(&format!("Calculation failed: {error}"));
        return out;
    }

    if let Some(days) = result.pending_days {
        out.push_str(&format!("Petition pending: {days} days\n"));
    }
    if let (Some(age), Some(days)) = (result.actual_age, result.total_days) {
        out.push_str(&format!("Age on bulletin date: {age} ({days} days)\n"));
    }
    if let Some(age) = result.cspa_age {
        out.push_str(&format!("CSPA age: {age}\n"));
    }
    if let Some(verdict) = &result.verdict {
        out.push_str(&format!("Bulletin date: {}\n", verdict.bulletin_date));
        let label = if verdict.is_available() {
            "available"
        } else {
            "unavailable"
        };
        out.push_str(&format!("Result: {label}\n{}", verdict.message));
    }

    out
}

fn render_bulletin(table: &BulletinTable) -> String {
    if table.is_empty() {
        return "No bulletin rows loaded\n".to_string();
    }

    let mut out = format!("{:<6}", "");
    for country in Country::ALL {
        out.push_str(&format!("{:<14}", country.as_str()));
    }
    out.push('\n');

    for category in table.categories() {
        out.push_str(&format!("{:<6}", category.as_str()));
        for country in Country::ALL {
            let cell = match table.cell(category, country) {
                BulletinCell::Date(date) => date.format("%m/%d/%Y").to_string(),
                BulletinCell::Invalid { raw } => format!("[{raw}]"),
                BulletinCell::Missing => "-".to_string(),
            };
            out.push_str(&format!("{cell:<14}"));
        }
        out.push('\n');
    }

    out
}
