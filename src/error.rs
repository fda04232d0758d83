// src/error.rs
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything a fetch can fail with. Nothing here is retried except the
/// 202 "processing" status, which never surfaces as an error unless the
/// caller bounded the wait.
#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("collection for '{username}' still processing after {attempts} attempts")]
    StillProcessing { username: String, attempts: u32 },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("API error: {0}")]
    Api(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Item-level data errors. `item` is the external id when known.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("item {item}: missing <{path}>")]
    MissingElement { item: String, path: &'static str },

    #[error("item {item}: <{element}> has no '{attr}' attribute")]
    MissingAttribute {
        item: String,
        element: &'static str,
        attr: &'static str,
    },

    #[error("item {item}: {field} = '{value}' is not a number")]
    InvalidNumber {
        item: String,
        field: &'static str,
        value: String,
    },

    #[error("item {item}: poll '{poll}' result group '{group}' has no '{label}' votes")]
    MissingVoteLabel {
        item: String,
        poll: &'static str,
        group: String,
        label: &'static str,
    },

    #[error("item {item}: expansion without an inbound boardgameexpansion link")]
    MissingExpandsLink { item: String },

    #[error("item {item}: '{value}' is not a player count")]
    InvalidPlayerCount { item: String, value: String },
}
