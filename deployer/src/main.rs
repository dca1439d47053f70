//! avdeploy - Entry Point
//!
//! Deploys a build version to every environment of a saved environment group
//! and waits until all deployments have finished.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use avdeploy::app::new_deploy::DeployRequest;
use avdeploy::app::options::AppOptions;
use avdeploy::app::prompt::TerminalPrompt;
use avdeploy::app::run::{run, Action};
use avdeploy::filesys::dir::Dir;
use avdeploy::filesys::file::File;
use avdeploy::logs::{init_logging, LogLevel, LogOptions};
use avdeploy::storage::layout::StorageLayout;
use avdeploy::storage::settings::Settings;
use avdeploy::utils::version_info;

#[derive(Parser, Debug)]
#[command(name = "avdeploy")]
#[command(version, about = "Deploy a build to a group of AppVeyor environments", long_about = None)]
struct Cli {
    /// AppVeyor API key; asked for when missing
    #[arg(env = "APPVEYOR_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Path to the settings file (default: ./avdeploy.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override log level
    #[arg(short, long)]
    log_level: Option<LogLevel>,

    /// Directory holding the *.group.json records
    #[arg(long)]
    groups_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create and save a new environment group
    CreateGroup,

    /// Deploy a build version to an environment group
    Deploy {
        /// Group name
        #[arg(short, long)]
        group: Option<String>,

        /// Build version to deploy
        #[arg(short, long)]
        build_version: Option<String>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List the saved environment groups
    ListGroups,
}

fn to_action(command: Option<Commands>) -> Action {
    match command {
        None => Action::Menu,
        Some(Commands::CreateGroup) => Action::CreateGroup,
        Some(Commands::Deploy {
            group,
            build_version,
            yes,
        }) => Action::Deploy(DeployRequest {
            group,
            build_version,
            assume_yes: yes,
        }),
        Some(Commands::ListGroups) => Action::ListGroups,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Retrieve the settings file
    let layout = StorageLayout::default();
    let settings_file = cli
        .config
        .clone()
        .map(File::new)
        .unwrap_or_else(|| layout.settings_file());
    let settings = match Settings::load_or_default(&settings_file).await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Unable to read settings file: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let log_options = LogOptions {
        log_level: cli.log_level.unwrap_or(settings.log_level),
        json_format: settings.log_json,
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let version = version_info();
    info!(
        "avdeploy {} ({}, built {})",
        version.version, version.git_hash, version.build_time
    );

    let mut options = AppOptions::from_settings(&settings, &layout);
    if let Some(dir) = cli.groups_dir {
        options.groups_dir = Dir::new(dir);
    }

    match run(options, cli.api_key, to_action(cli.command), &TerminalPrompt).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("avdeploy failed: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
