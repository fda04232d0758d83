// src/specs/collection.rs
//! `collection` endpoint: which items a user owns.
//!
//! Only the `objectid` of each `<item>` is used; the full record comes from
//! the `thing` endpoint in one batched request.

use url::Url;

use super::{check_api_error, endpoint};
use crate::core::xml;
use crate::error::{ParseError, Result};

pub fn collection_url(base: &str, username: &str) -> Result<Url> {
    let mut url = endpoint(base, "collection")?;
    url.query_pairs_mut()
        .append_pair("username", username)
        .append_pair("own", "1");
    Ok(url)
}

/// Object ids in document order.
pub fn parse_collection(doc: &str) -> Result<Vec<String>> {
    let root = xml::parse(doc)?;
    check_api_error(&root)?;

    let mut ids = Vec::new();
    for item in root.children_named("item") {
        let id = item.attr("objectid").ok_or_else(|| ParseError::MissingAttribute {
            item: item.attr("collid").unwrap_or("?").to_string(),
            element: "item",
            attr: "objectid",
        })?;
        ids.push(id.to_string());
    }
    Ok(ids)
}
