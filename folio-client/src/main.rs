//! `folio` command-line client.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use folio_client::{open_selection, render, ClientConfig, ClientResult, ProfileStore, RestClient};
use folio_storage::AttributeSink;

#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Browse the folio portfolio and manage the local theme selection"
)]
struct Cli {
    /// Path to the client TOML config (defaults to $FOLIO_CLIENT_CONFIG).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the profile.
    Profile {
        /// Bypass the cached value and fetch again.
        #[arg(long)]
        refresh: bool,
    },

    /// List active skills by category.
    Skills,

    /// List active projects.
    Projects,

    /// Show one project by code.
    Project {
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Inspect or change the theme selection.
    #[command(subcommand)]
    Theme(ThemeCommand),
}

#[derive(Subcommand)]
enum ThemeCommand {
    /// Show the current selection and its tokens.
    Show,

    /// List available themes.
    List,

    /// Select a theme; mode is "light" or "dark" (default dark).
    Set {
        name: String,
        mode: Option<String>,
    },

    /// Flip between light and dark.
    Toggle,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_max_level(cli.verbosity.tracing_level_filter())
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("error: failed to start runtime: {error}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the command ran but was rejected.
async fn run(cli: Cli) -> ClientResult<bool> {
    let config = ClientConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Profile { refresh } => {
            let store = ProfileStore::new(RestClient::new(&config)?);
            let profile = store.profile(refresh).await?;
            print!("{}", render::profile(&profile));
        }
        Command::Skills => {
            let skills = RestClient::new(&config)?.list_skills().await?;
            print!("{}", render::skills(&skills));
        }
        Command::Projects => {
            let projects = RestClient::new(&config)?.list_projects().await?;
            print!("{}", render::projects(&projects));
        }
        Command::Project { code } => {
            let project = RestClient::new(&config)?.get_project(&code).await?;
            print!("{}", render::project(&project));
        }
        Command::Theme(command) => return run_theme(&config, command),
    }
    Ok(true)
}

fn run_theme(config: &ClientConfig, command: ThemeCommand) -> ClientResult<bool> {
    let table = config.theme_table()?;
    let sink = Arc::new(AttributeSink::new());
    let mut selection = open_selection(&config.state_path, table, sink);

    match command {
        ThemeCommand::Show => print!("{}", render::selection(&selection)),
        ThemeCommand::List => {
            let metadata: Vec<_> = selection
                .list_available_names()
                .iter()
                .filter_map(|name| selection.metadata_for(name))
                .collect();
            print!("{}", render::themes(&metadata, &selection.current().name));
        }
        ThemeCommand::Set { name, mode } => {
            if !selection.select(&name, mode.as_deref()) {
                eprintln!(
                    "unknown theme '{}'; available: {}",
                    name,
                    selection.list_available_names().join(", ")
                );
                return Ok(false);
            }
            println!("{}", selection.composite_key());
        }
        ThemeCommand::Toggle => {
            selection.toggle_mode();
            println!("{}", selection.composite_key());
        }
    }
    Ok(true)
}
