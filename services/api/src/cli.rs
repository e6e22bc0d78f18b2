use crate::commands::{run_bulletin_show, run_calculate, BulletinArgs, CalculateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use cspa::config::AppConfig;
use cspa::error::AppError;
use cspa::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "CSPA Calculator",
    about = "Compute Child Status Protection Act ages against the family-sponsored visa bulletin",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Calculate an applicant's CSPA age and visa availability
    Calculate(CalculateArgs),
    /// Inspect the loaded visa bulletin
    Bulletin {
        #[command(subcommand)]
        command: BulletinCommand,
    },
}

#[derive(Subcommand, Debug)]
enum BulletinCommand {
    /// Print the cutoff date for every category and country
    Show(BulletinArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Calculate(args) => run_calculate(&config, args),
        Command::Bulletin {
            command: BulletinCommand::Show(args),
        } => run_bulletin_show(&config, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cspa::{Category, Country};

    #[test]
    fn calculate_defaults_to_first_preference_and_other_country() {
        let cli = Cli::try_parse_from([
            "cspa",
            "calculate",
            "--birth-date",
            "2004-01-01",
            "--priority-date",
            "01/01/2020",
            "--approval-date",
            "2023-01-01",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Calculate(args)) => {
                assert_eq!(args.category, Category::F1);
                assert_eq!(args.country, Country::Other);
                assert!(!args.json);
            }
            other => panic!("expected calculate command, got {other:?}"),
        }
    }

    #[test]
    fn calculate_rejects_unknown_country() {
        let parsed = Cli::try_parse_from([
            "cspa",
            "calculate",
            "--birth-date",
            "2004-01-01",
            "--priority-date",
            "2020-01-01",
            "--approval-date",
            "2023-01-01",
            "--country",
            "canada",
        ]);
        assert!(parsed.is_err());
    }
}
