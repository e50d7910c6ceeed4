//! Database administration for the folio API.
//!
//! Usage:
//!   folio-admin migrate
//!   folio-admin reset --yes
//!   folio-admin seed data/seed.json
//!
//! Connection settings come from the same `FOLIO_DB_*` variables the server
//! reads.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use folio_api::telemetry::{init_tracing, LogFormat, TelemetryConfig};
use folio_api::{ApiError, ApiResult, DbClient, DbConfig};
use folio_core::SeedData;

#[derive(Parser)]
#[command(
    name = "folio-admin",
    version,
    about = "Manage the folio database schema and seed content"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the tables if they do not exist.
    Migrate,

    /// Drop every folio table.
    Reset {
        /// Confirm the destructive reset.
        #[arg(long)]
        yes: bool,
    },

    /// Insert a JSON seed document (profile, skills, projects).
    Seed {
        /// Path to the seed document.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Apply the schema before inserting.
        #[arg(long)]
        migrate: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let telemetry = TelemetryConfig {
        log_format: LogFormat::Text,
        service_name: "folio-admin".to_string(),
        ..TelemetryConfig::from_env()
    };
    if let Err(error) = init_tracing(&telemetry) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    if let Err(error) = run(cli.command).await {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

async fn run(command: Command) -> ApiResult<()> {
    let db = DbClient::from_config(&DbConfig::from_env())?;
    match command {
        Command::Migrate => db.migrate().await,
        Command::Reset { yes } => {
            if !yes {
                return Err(ApiError::invalid_input(
                    "Refusing to drop tables without --yes",
                ));
            }
            db.reset().await
        }
        Command::Seed { file, migrate } => {
            let seed = read_seed(&file)?;
            if migrate {
                db.migrate().await?;
            }
            let summary = db.seed(&seed).await?;
            println!(
                "Seeded profile, {} skills, {} projects",
                summary.skills, summary.projects
            );
            Ok(())
        }
    }
}

fn read_seed(path: &Path) -> ApiResult<SeedData> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ApiError::invalid_input(format!("Cannot read seed file {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&raw)?)
}
