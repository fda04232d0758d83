// src/specs/mod.rs
//! # Endpoint modules
//!
//! One module per XML API endpoint. Each module knows **where the data lives in
//! the document** for its endpoint and turns it into typed values; nothing
//! else in the crate looks at element or attribute names.
//!
//! ## What lives here
//! - URL construction for the endpoint (`collection_url`, `thing_url`).
//! - Document parsing over the owned tree from `core::xml`.
//! - Validation of required fields, once, at parse time. A parser either
//!   returns a complete record or an error naming the item and the field.
//!
//! ## What does **not** live here
//! - **Networking and retries** (`collection::Collection::fetch`).
//! - **Cross-item logic** such as nesting expansions under base games.
//! - **Presentation** (`report`).
//!
//! ## Current endpoints
//! - `collection` – owned item ids for a user.
//! - `thing` – full game/expansion records with statistics and polls.
use url::Url;

use crate::core::{sanitize::normalize_ws, xml::Element};
use crate::error::{Error, Result};

pub mod collection;
pub mod thing;

/// Join an endpoint onto the API root, tolerating a missing trailing slash.
pub(crate) fn endpoint(base: &str, name: &str) -> Result<Url> {
    let mut base = Url::parse(base)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(name)?)
}

/// The API reports bad requests as a 200 with an `<errors>` (or bare
/// `<error>`) document instead of the expected root.
pub(crate) fn check_api_error(root: &Element) -> Result<()> {
    let messages: Vec<String> = match root.name.as_str() {
        "errors" => root
            .children_named("error")
            .map(|e| e.child("message").map_or(e.text.as_str(), |m| m.text.as_str()))
            .map(normalize_ws)
            .collect(),
        "error" => vec![normalize_ws(root.attr("message").unwrap_or(&root.text))],
        _ => return Ok(()),
    };
    let joined = messages.join("; ");
    log::error!("API error document: {joined}");
    Err(Error::Api(if joined.is_empty() { "unspecified error".into() } else { joined }))
}
