//! Trello data model and API access.
//!
//! The backup only ever talks to Trello through the [`TrelloApi`] trait.
//! [`TrelloClient`] is the HTTP implementation.

mod client;
mod models;

use anyhow::Result;
use std::io::Read;

pub use client::{TrelloClient, DEFAULT_API_BASE_URL};
pub use models::{Attachment, Board, Card, List, Member};

/// Read operations the backup needs from Trello
pub trait TrelloApi {
    /// Fetch the profile of the authenticated member.
    fn get_member(&self) -> Result<Member>;

    /// Fetch every board of `member`, closed ones included, with their lists.
    fn get_member_boards(&self, member: &Member) -> Result<Vec<Board>>;

    /// Fetch every card of `list`, closed ones included, with attachments
    /// and all other card metadata expanded.
    fn get_list_cards(&self, list: &List) -> Result<Vec<Card>>;

    /// Open the content of an attachment for reading.
    ///
    /// Only a request that cannot be built or sent is an error. Whatever the
    /// server answers, its body is handed back together with the status.
    fn download_attachment(&self, attachment: &Attachment) -> Result<AttachmentDownload>;
}

/// Response body of an attachment request
pub struct AttachmentDownload {
    pub status: u16,
    pub body: Box<dyn Read>,
}

impl AttachmentDownload {
    pub fn new(status: u16, body: Box<dyn Read>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
