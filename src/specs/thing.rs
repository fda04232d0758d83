// src/specs/thing.rs
//! `thing` endpoint: full records for games and expansions.
//!
//! Shape of one item, trimmed to what we read:
//!
//! ```text
//! <item type="boardgame|boardgameexpansion" id="…">
//!   <thumbnail>…</thumbnail> <image>…</image>
//!   <name type="primary" value="…"/>          (plus alternates)
//!   <description>…</description>              (entity-encoded twice)
//!   <yearpublished value/> <minplayers value/> <maxplayers value/>
//!   <minplaytime value/> <maxplaytime value/> <minage value/>
//!   <poll name="suggested_numplayers">
//!     <results numplayers="3"><result value="Best" numvotes="…"/>…</results>
//!   </poll>
//!   <poll name="suggested_playerage"><results><result value="10" numvotes/>…
//!   <poll name="language_dependence"><results><result value="…" numvotes/>…
//!   <link type="boardgamemechanic" value="…" [inbound="true"]/>
//!   <statistics><ratings><average value/><averageweight value/></ratings></statistics>
//! </item>
//! ```

use std::str::FromStr;

use url::Url;

use super::{check_api_error, endpoint};
use crate::core::{sanitize::decode_entities, xml::{self, Element}};
use crate::error::{Error, ParseError, Result};
use crate::game::{GameRecord, ItemKind, PlayerCount};
use crate::polls::{self, NumPlayersTally, VoteTally};

pub const EXPANSION_TYPE: &str = "boardgameexpansion";

const NUMPLAYERS_POLL: &str = "suggested_numplayers";
const PLAYERAGE_POLL: &str = "suggested_playerage";
const LANGUAGE_POLL: &str = "language_dependence";

const BEST: &str = "Best";
const RECOMMENDED: &str = "Recommended";
const NOT_RECOMMENDED: &str = "Not Recommended";

pub fn thing_url(base: &str, ids: &[String]) -> Result<Url> {
    let mut url = endpoint(base, "thing")?;
    url.query_pairs_mut()
        .append_pair("id", &ids.join(","))
        .append_pair("stats", "1");
    Ok(url)
}

/// Every `<item>` of a `thing` response, in document order.
pub fn parse_things(doc: &str, threshold: f64) -> Result<Vec<GameRecord>> {
    let root = xml::parse(doc)?;
    check_api_error(&root)?;
    root.children_named("item")
        .map(|item| parse_item(item, threshold).map_err(Error::from))
        .collect()
}

/// Build one record. Required fields are checked here and nowhere else.
pub fn parse_item(item: &Element, threshold: f64) -> Result<GameRecord, ParseError> {
    let id = item.attr("id").ok_or_else(|| ParseError::MissingAttribute {
        item: "?".into(),
        element: "item",
        attr: "id",
    })?;
    let f = Fields { item, id };

    let item_type = item.attr("type").ok_or_else(|| f.missing_attr("item", "type"))?;
    let name = primary_name(item).ok_or_else(|| f.missing_attr("name", "value"))?;

    let kind = if item_type == EXPANSION_TYPE {
        let expands = item
            .children_named("link")
            .find(|l| l.attr("type") == Some(EXPANSION_TYPE) && l.attr("inbound") == Some("true"))
            .and_then(|l| l.attr("value"))
            .ok_or_else(|| ParseError::MissingExpandsLink { item: id.to_string() })?;
        ItemKind::Expansion { expands: expands.to_string() }
    } else {
        ItemKind::BaseGame
    };

    let numplayers = f.numplayers(threshold)?;
    let (community_min_players, community_max_players, community_best_players) = match numplayers {
        Some(rec) => (
            Some(f.player_count(&rec.min)?),
            Some(f.player_count(&rec.max)?),
            rec.best.as_deref().map(|b| f.player_count(b)).transpose()?,
        ),
        None => (None, None, None),
    };

    Ok(GameRecord {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        description: decode_entities(&f.element("description")?.text),
        year: f.number("yearpublished")?,
        players: (f.number("minplayers")?, f.number("maxplayers")?),
        playtime: (f.number("minplaytime")?, f.number("maxplaytime")?),
        min_age: f.number("minage")?,
        image_url: f.element("image")?.text.clone(),
        thumbnail_url: f.element("thumbnail")?.text.clone(),
        rating: f.number("statistics/ratings/average")?,
        complexity: f.number("statistics/ratings/averageweight")?,
        community_min_players,
        community_max_players,
        community_best_players,
        community_min_age: f.threshold_poll(PLAYERAGE_POLL, threshold)?,
        community_language_dependence: f.threshold_poll(LANGUAGE_POLL, threshold)?,
        categories: links(item, "boardgamecategory"),
        mechanics: links(item, "boardgamemechanic"),
        artists: links(item, "boardgameartist"),
        publishers: links(item, "boardgamepublisher"),
        designers: links(item, "boardgamedesigner"),
        compilations: links(item, "boardgamecompilation"),
        families: links(item, "boardgamefamily"),
        expansions: Vec::new(),
    })
}

fn primary_name(item: &Element) -> Option<&str> {
    item.children_named("name")
        .find(|n| n.attr("type") == Some("primary"))
        .or_else(|| item.child("name"))
        .and_then(|n| n.attr("value"))
}

fn links(item: &Element, link_type: &str) -> Vec<String> {
    item.children_named("link")
        .filter(|l| l.attr("type") == Some(link_type))
        .filter_map(|l| l.attr("value"))
        .map(str::to_string)
        .collect()
}

/* ---------------- field access ---------------- */

/// Required-field lookups that report the item id on failure.
struct Fields<'a> {
    item: &'a Element,
    id: &'a str,
}

impl<'a> Fields<'a> {
    fn missing_attr(&self, element: &'static str, attr: &'static str) -> ParseError {
        ParseError::MissingAttribute { item: self.id.to_string(), element, attr }
    }

    fn element(&self, path: &'static str) -> Result<&'a Element, ParseError> {
        self.item
            .path(path)
            .ok_or_else(|| ParseError::MissingElement { item: self.id.to_string(), path })
    }

    /// `<path value="…"/>` parsed as a number.
    fn number<T: FromStr>(&self, path: &'static str) -> Result<T, ParseError> {
        let value = self
            .element(path)?
            .attr("value")
            .ok_or_else(|| self.missing_attr(path, "value"))?;
        self.parse_num(path, value)
    }

    fn parse_num<T: FromStr>(&self, field: &'static str, value: &str) -> Result<T, ParseError> {
        value.trim().parse().map_err(|_| ParseError::InvalidNumber {
            item: self.id.to_string(),
            field,
            value: value.to_string(),
        })
    }

    fn player_count(&self, label: &str) -> Result<PlayerCount, ParseError> {
        label.parse().map_err(|_| ParseError::InvalidPlayerCount {
            item: self.id.to_string(),
            value: label.to_string(),
        })
    }

    /// First poll with this name that has at least one `results` group.
    fn poll(&self, name: &str) -> Option<&'a Element> {
        self.item
            .children_named("poll")
            .find(|p| p.attr("name") == Some(name) && p.child("results").is_some())
    }

    /// `(value, numvotes)` pairs of one `results` group.
    fn votes(
        &self,
        results: &'a Element,
        poll: &'static str,
    ) -> Result<Vec<(&'a str, u64)>, ParseError> {
        results
            .children_named("result")
            .map(|r| -> Result<(&'a str, u64), ParseError> {
                let value = r.attr("value").ok_or_else(|| self.missing_attr(poll, "value"))?;
                let votes = r.attr("numvotes").ok_or_else(|| self.missing_attr(poll, "numvotes"))?;
                Ok((value, self.parse_num(poll, votes)?))
            })
            .collect()
    }

    fn numplayers(
        &self,
        threshold: f64,
    ) -> Result<Option<polls::PlayerRecommendation>, ParseError> {
        let Some(poll) = self.poll(NUMPLAYERS_POLL) else {
            return Ok(None);
        };

        let mut tallies = Vec::new();
        for results in poll.children_named("results") {
            let group = results
                .attr("numplayers")
                .ok_or_else(|| self.missing_attr(NUMPLAYERS_POLL, "numplayers"))?;
            let votes = self.votes(results, NUMPLAYERS_POLL)?;
            if votes.is_empty() {
                continue;
            }
            // later duplicates of a label win, as a map would have it
            let count = |label: &'static str| {
                votes
                    .iter()
                    .rev()
                    .find(|(v, _)| *v == label)
                    .map(|(_, n)| *n)
                    .ok_or_else(|| ParseError::MissingVoteLabel {
                        item: self.id.to_string(),
                        poll: NUMPLAYERS_POLL,
                        group: group.to_string(),
                        label,
                    })
            };
            tallies.push(NumPlayersTally::new(
                group,
                count(BEST)?,
                count(RECOMMENDED)?,
                count(NOT_RECOMMENDED)?,
            ));
        }
        Ok(polls::recommend_players(&tallies, threshold))
    }

    /// Only the first `results` group of a single-choice poll counts.
    fn threshold_poll(
        &self,
        name: &'static str,
        threshold: f64,
    ) -> Result<Option<String>, ParseError> {
        let Some(results) = self.poll(name).and_then(|p| p.child("results")) else {
            return Ok(None);
        };
        let tallies: Vec<VoteTally> = self
            .votes(results, name)?
            .into_iter()
            .map(|(value, votes)| VoteTally::new(value, votes))
            .collect();
        Ok(polls::cumulative_threshold(&tallies, threshold))
    }
}
