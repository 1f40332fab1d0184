use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use trello_backup::config::ConfigManager;
use trello_backup::handlers;
use trello_backup::logger;
use trello_backup::settings::{Overrides, Settings};

#[derive(Parser)]
#[command(name = "trello-backup")]
#[command(about = "Export Trello boards, lists, cards and attachments to a local directory", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetches all the information of every board and saves it locally
    #[command(
        long_about = "Use it to perform full backups: every board, list, card and attachment of the \
                      authenticated Trello member is downloaded and saved under the destination directory. \
                      Existing files from a previous run are overwritten."
    )]
    FullBackup(FullBackupArgs),
}

#[derive(Args, Debug)]
struct FullBackupArgs {
    /// Shows additional information that might be useful for debugging the application
    #[arg(short, long)]
    debug: bool,

    /// Directory in which the backup files will be saved to [default: <cwd>/trello-backup]
    #[arg(short = 'b', long)]
    save_to: Option<PathBuf>,

    /// API key that will be used in order to communicate with Trello REST API
    #[arg(short = 'k', long, env = "TRELLO_API_KEY", hide_env_values = true)]
    trello_api_key: Option<String>,

    /// API token that will be used in order to communicate with Trello REST API
    #[arg(short = 't', long, env = "TRELLO_API_TOKEN", hide_env_values = true)]
    trello_api_token: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::FullBackup(args) => {
            logger::init_logger(args.debug);
            run_full_backup(args)
        }
    };

    if let Err(e) = result {
        log::error!("{e:#}");
        process::exit(1);
    }
}

fn run_full_backup(args: FullBackupArgs) -> Result<()> {
    if let Err(e) = logger::rotate_log_if_needed() {
        log::debug!("Failed to rotate log file: {e:#}");
    }

    let config = Settings::load()?.resolve(
        Overrides {
            api_key: args.trello_api_key,
            api_token: args.trello_api_token,
            save_to: args.save_to,
        },
        ConfigManager::default_backup_dir()?,
    )?;

    handlers::handle_full_backup(&config)?;
    Ok(())
}
