//! Full backup of a Trello account to a local directory tree.
//!
//! The walk is strictly depth-first and sequential:
//! board -> list -> card -> attachment. Every board, list and card gets its
//! own directory, attachments are downloaded into their card's directory and
//! each level's whole collection is snapshotted to a JSON file once all of
//! its children are done.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::fs::{ensure_dir, save_file, Filesystem};
use crate::reporter::Reporter;
use crate::sanitize::{resource_dir_name, sanitize};
use crate::trello::{Attachment, Board, List, TrelloApi};

/// Snapshot of every board, written at the backup root
pub const BOARDS_FILE: &str = "boards.json";
/// Snapshot of every list of a board, written in the board directory
pub const LISTS_FILE: &str = "lists.json";
/// Snapshot of every card of a list, written in the list directory
pub const CARDS_FILE: &str = "cards.json";

/// What a completed backup wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupSummary {
    pub destination: PathBuf,
    pub boards: usize,
    pub lists: usize,
    pub cards: usize,
    pub attachments: usize,
}

/// Walks a Trello account and mirrors it on a filesystem
pub struct BackupRunner<'a> {
    api: &'a dyn TrelloApi,
    fs: &'a dyn Filesystem,
    reporter: &'a dyn Reporter,
}

impl<'a> BackupRunner<'a> {
    pub fn new(api: &'a dyn TrelloApi, fs: &'a dyn Filesystem, reporter: &'a dyn Reporter) -> Self {
        Self { api, fs, reporter }
    }

    /// Backup every board of the authenticated member into `backup_to`
    ///
    /// Stops at the first error. Whatever was written up to that point is
    /// left on disk as is.
    pub fn backup_all_boards(&self, backup_to: &Path) -> Result<BackupSummary> {
        let member = self.api.get_member()?;
        self.reporter.debug("fetched member", &[("member_id", &member.id)]);

        let boards = self.api.get_member_boards(&member)?;
        self.reporter.info("fetched boards", &[("count", &boards.len())]);

        ensure_dir(self.fs, backup_to)?;

        let mut summary = BackupSummary {
            destination: backup_to.to_path_buf(),
            ..Default::default()
        };

        for board in &boards {
            self.backup_board(backup_to, board, &mut summary)?;
            summary.boards += 1;
        }

        self.save_json(backup_to, BOARDS_FILE, &boards)
            .context("failed to save boards")?;

        Ok(summary)
    }

    fn backup_board(&self, backup_to: &Path, board: &Board, summary: &mut BackupSummary) -> Result<()> {
        let board_dir = self.resolve_dir(backup_to, &board.name, board.closed)?;
        self.reporter.info(
            "backing up board",
            &[("board", &board.name), ("board_dir", &board_dir.display())],
        );

        for list in &board.lists {
            self.backup_list(&board_dir, list, summary)?;
            summary.lists += 1;
        }

        self.save_json(&board_dir, LISTS_FILE, &board.lists)
            .with_context(|| format!("failed to save lists of board '{}'", board.name))
    }

    fn backup_list(&self, board_dir: &Path, list: &List, summary: &mut BackupSummary) -> Result<()> {
        let list_dir = self.resolve_dir(board_dir, &list.name, list.closed)?;
        self.reporter.debug(
            "fetching list cards",
            &[("list", &list.name), ("list_id", &list.id)],
        );

        let cards = self.api.get_list_cards(list)?;

        for card in &cards {
            let card_dir = self.resolve_dir(&list_dir, &card.name, card.closed)?;
            summary.attachments += self.download_card_attachments(&card_dir, &card.attachments)?;
            summary.cards += 1;
        }

        self.save_json(&list_dir, CARDS_FILE, &cards)
            .with_context(|| format!("failed to save cards of list '{}'", list.name))
    }

    fn download_card_attachments(&self, card_dir: &Path, attachments: &[Attachment]) -> Result<usize> {
        for attachment in attachments {
            self.reporter.debug(
                "downloading attachment",
                &[("card_dir", &card_dir.display()), ("attachment_url", &attachment.url)],
            );

            let filename = card_dir.join(sanitize(&attachment.name));
            let mut download = self.api.download_attachment(attachment)?;
            if !download.is_success() {
                self.reporter.warn(
                    "attachment request returned a non-success status, saving the response body",
                    &[
                        ("card_dir", &card_dir.display()),
                        ("attachment_url", &attachment.url),
                        ("status", &download.status),
                    ],
                );
            }

            let mut out = self.fs.create(&filename).with_context(|| {
                format!(
                    "unable to create file on the destination path: {}",
                    filename.display()
                )
            })?;

            io::copy(&mut download.body, &mut out).with_context(|| {
                format!(
                    "unable to copy the content of {} to the local file {}",
                    attachment.url,
                    filename.display()
                )
            })?;

            // Flush failures are reported, never fatal
            if let Err(e) = out.flush() {
                self.reporter.warn(
                    "unable to close the file",
                    &[
                        ("filename", &filename.display()),
                        ("attachment_url", &attachment.url),
                        ("error", &e),
                    ],
                );
            }
        }

        Ok(attachments.len())
    }

    /// Directory of a board, list or card under `parent`, created if missing
    fn resolve_dir(&self, parent: &Path, name: &str, closed: bool) -> Result<PathBuf> {
        let dir = parent.join(resource_dir_name(name, closed));
        ensure_dir(self.fs, &dir)?;
        Ok(dir)
    }

    fn save_json<T: Serialize>(&self, dir: &Path, file_name: &str, items: &[T]) -> Result<()> {
        let content = serde_json::to_vec_pretty(items)
            .with_context(|| format!("failed to marshal {file_name}"))?;
        let path = dir.join(file_name);
        save_file(self.fs, &path, &content)?;
        self.reporter.debug("saved snapshot", &[("path", &path.display())]);
        Ok(())
    }
}
