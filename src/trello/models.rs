use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The authenticated Trello user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    // Catch-all for every other field the API returns
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A board together with all of its lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub closed: bool,

    #[serde(default)]
    pub lists: Vec<List>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A column of cards inside a board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub closed: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A card and its metadata
///
/// Checklists, members, stickers, custom field items and plugin data stay in
/// `extra` untouched, they are only written back out to `cards.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub closed: bool,

    #[serde(default)]
    pub attachments: Vec<Attachment>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A file linked to a card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub url: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
