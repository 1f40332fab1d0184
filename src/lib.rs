//! # trello-backup
//!
//! A command-line tool that exports a whole Trello account to a local directory tree.
//!
//! ## Overview
//!
//! Every board, list and card becomes a directory, nested the same way they are
//! nested in Trello. Card attachments are downloaded into their card's directory
//! and each level gets a JSON snapshot of its full collection:
//!
//! ```text
//! <save-to>/
//!   boards.json
//!   <board>/            ("[closed] <board>/" when archived)
//!     lists.json
//!     <list>/
//!       cards.json
//!       <card>/
//!         <attachment>
//! ```
//!
//! The run is sequential and stops at the first error.
//!
//! ## Architecture
//!
//! - Trello access ([`trello`])
//! - Backup traversal ([`backup`]) on top of [`fs`] and [`sanitize`]
//! - Reporting and logging ([`reporter`], [`logger`])
//! - Configuration ([`config`], [`settings`]) and command handlers ([`handlers`])

/// Full backup traversal.
///
/// Walks boards, lists, cards and attachments depth-first, creating one
/// directory per resource and writing `boards.json`, `lists.json` and
/// `cards.json` snapshots.
pub mod backup;

/// Platform-agnostic configuration directory management.
pub mod config;

/// Filesystem capability used by the backup, with a local implementation.
pub mod fs;

/// Command handlers invoked by the binary.
pub mod handlers;

/// Console and file logging setup.
pub mod logger;

/// Structured reporting injected into the backup core.
pub mod reporter;

/// Turning remote names into safe directory and file names.
pub mod sanitize;

/// Settings file and resolution of command line values.
pub mod settings;

/// Trello data model and blocking REST client.
pub mod trello;
