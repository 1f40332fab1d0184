//! Full backup command handler
//!
//! Builds the Trello client and runs the backup against the local filesystem,
//! then prints what was written.

use anyhow::Result;
use colored::Colorize;

use crate::backup::{BackupRunner, BackupSummary};
use crate::fs::LocalFs;
use crate::logger;
use crate::reporter::LogReporter;
use crate::settings::BackupConfig;
use crate::trello::TrelloClient;

/// Handle the full-backup command
pub fn handle_full_backup(config: &BackupConfig) -> Result<BackupSummary> {
    println!("{}", "Backing up Trello boards...".cyan().bold());
    println!("  {} {}", "Destination:".bold(), config.save_to.display());

    if let Err(e) = logger::log_to_file(&format!("full-backup started: {}", config.save_to.display())) {
        log::debug!("Failed to write log file: {e:#}");
    }

    let client = TrelloClient::with_base_url(&config.api_base_url, &config.api_key, &config.api_token)?;
    let summary = BackupRunner::new(&client, &LocalFs, &LogReporter).backup_all_boards(&config.save_to)?;

    print_summary(&summary);

    if let Err(e) = logger::log_to_file(&format!(
        "full-backup finished: {} boards, {} lists, {} cards, {} attachments",
        summary.boards, summary.lists, summary.cards, summary.attachments
    )) {
        log::debug!("Failed to write log file: {e:#}");
    }

    Ok(summary)
}

fn print_summary(summary: &BackupSummary) {
    println!();
    println!("{}", "=== Backup Complete ===".green().bold());
    println!("  {} {}", "Boards:".bold(), summary.boards);
    println!("  {} {}", "Lists:".bold(), summary.lists);
    println!("  {} {}", "Cards:".bold(), summary.cards);
    println!("  {} {}", "Attachments:".bold(), summary.attachments);
    println!(
        "  {} Saved to {}",
        "✓".green(),
        summary.destination.display()
    );
}
