use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;

use super::{Attachment, AttachmentDownload, Board, Card, List, Member, TrelloApi};

/// Trello REST API root
pub const DEFAULT_API_BASE_URL: &str = "https://api.trello.com/1";

/// Query used when fetching boards: everything, closed boards and lists included
const BOARD_ARGS: &[(&str, &str)] = &[
    ("filter", "all"),
    ("fields", "all"),
    ("lists", "all"),
    ("organization", "true"),
    ("organization_fields", "all"),
];

/// Query used when fetching the cards of a list
const CARD_ARGS: &[(&str, &str)] = &[
    ("attachments", "true"),
    ("attachment_fields", "all"),
    ("customFieldItems", "true"),
    ("stickers", "true"),
    ("members", "true"),
    ("member_fields", "all"),
    ("checkItemStates", "true"),
    ("checklists", "all"),
    ("limit", "1000"),
    ("sort", "-id"),
    ("filter", "all"),
    ("fields", "all"),
    ("pluginData", "true"),
];

/// Blocking HTTP client for the Trello REST API
///
/// Every request carries the API key and token as query parameters.
/// No timeout is set, a stalled transfer blocks until the server gives up.
pub struct TrelloClient {
    http: Client,
    base_url: String,
    key: String,
    token: String,
}

impl TrelloClient {
    pub fn new(key: &str, token: &str) -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE_URL, key, token)
    }

    pub fn with_base_url(base_url: &str, key: &str, token: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(None)
            .user_agent(concat!("trello-backup/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            token: token.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn credentials(&self) -> [(&str, &str); 2] {
        [("key", self.key.as_str()), ("token", self.token.as_str())]
    }

    /// Header some attachment hosts expect instead of query credentials
    fn authorization_header(&self) -> String {
        format!(
            "OAuth oauth_consumer_key=\"{}\", oauth_token=\"{}\"",
            self.key, self.token
        )
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, args: &[(&str, &str)]) -> Result<T> {
        // Strip URLs from errors, they contain the credentials
        let response = self
            .http
            .get(self.endpoint(path))
            .query(&self.credentials())
            .query(args)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("GET {path} failed"))?;

        response
            .json()
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to decode response of GET {path}"))
    }
}

impl TrelloApi for TrelloClient {
    fn get_member(&self) -> Result<Member> {
        self.get_json("members/me", &[])
            .context("failed to get member (member=me)")
    }

    fn get_member_boards(&self, member: &Member) -> Result<Vec<Board>> {
        self.get_json(&format!("members/{}/boards", member.id), BOARD_ARGS)
            .with_context(|| format!("failed to get user boards (member_id={})", member.id))
    }

    fn get_list_cards(&self, list: &List) -> Result<Vec<Card>> {
        self.get_json(&format!("lists/{}/cards", list.id), CARD_ARGS)
            .with_context(|| format!("failed to get list cards (list_id={})", list.id))
    }

    fn download_attachment(&self, attachment: &Attachment) -> Result<AttachmentDownload> {
        let url = reqwest::Url::parse(&attachment.url)
            .with_context(|| format!("unable to create request (attachment_url={})", attachment.url))?;

        let response = self
            .http
            .get(url)
            .query(&self.credentials())
            .header(AUTHORIZATION, self.authorization_header())
            .send()
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("unable to download resource (attachment_url={})", attachment.url))?;

        // Link attachments may answer with an error page, which is saved like any other body
        Ok(AttachmentDownload::new(response.status().as_u16(), Box::new(response)))
    }
}
