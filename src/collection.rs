// src/collection.rs
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::thread;

use crate::{
    config::options::FetchOptions,
    core::net::Transport,
    error::{Error, Result},
    game::GameRecord,
    progress::{NullProgress, Progress},
    specs::{collection, thing},
};

/// A user's owned games, expansions nested under their base game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    games: BTreeMap<String, GameRecord>,
    all: Vec<GameRecord>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct and fetch in one step.
    pub fn for_user<T: Transport + ?Sized>(
        transport: &T,
        username: &str,
        options: &FetchOptions,
    ) -> Result<Self> {
        let mut c = Self::new();
        c.fetch(transport, username, options, None)?;
        Ok(c)
    }

    /// Replace the contents with `username`'s owned items.
    ///
    /// Blocks while the collection endpoint reports 202 "processing", sleeping
    /// `options.retry_wait` between requests, with no limit unless
    /// `options.max_attempts` is set. On error the previous contents are kept.
    pub fn fetch<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        username: &str,
        options: &FetchOptions,
        progress: Option<&mut dyn Progress>,
    ) -> Result<()> {
        let mut null = NullProgress;
        let progress: &mut dyn Progress = match progress {
            Some(p) => p,
            None => &mut null,
        };

        let ids = fetch_owned_ids(transport, username, options, progress)?;
        progress.begin(ids.len());

        let records = if ids.is_empty() {
            log::info!("Collection: '{username}' owns nothing, skipping thing request");
            Vec::new()
        } else {
            let url = thing::thing_url(&options.base_url, &ids)?;
            progress.log(&format!("Fetching {} items…", ids.len()));
            let resp = transport.get(url.as_str())?;
            log::info!("Things: GET {url} -> {}", resp.status);
            // only the collection endpoint queues; a 202 here would parse as empty
            if resp.status == 202 || !resp.is_success() {
                return Err(status_error(url.as_str(), resp.status));
            }
            thing::parse_things(&resp.body, options.threshold)?
        };

        let (games, all) = assemble(records);
        let nested = games.values().map(count_nested).sum::<usize>();
        log::info!(
            "Collection: {} records, {} top-level, {} nested, {} orphaned",
            all.len(),
            games.len(),
            nested,
            all.len() - games.len() - nested,
        );
        progress.finish(games.len(), nested);

        self.games = games;
        self.all = all;
        Ok(())
    }

    /// Base games only; expansions hang off their base.
    pub fn games(&self) -> impl Iterator<Item = &GameRecord> {
        self.games.values()
    }

    pub fn games_by_name(&self) -> &BTreeMap<String, GameRecord> {
        &self.games
    }

    /// Every record from the last fetch as parsed, orphans included.
    pub fn all_records(&self) -> &[GameRecord] {
        &self.all
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn mechanics(&self) -> BTreeSet<&str> {
        self.taxonomy(|g| &g.mechanics)
    }

    pub fn categories(&self) -> BTreeSet<&str> {
        self.taxonomy(|g| &g.categories)
    }

    pub fn designers(&self) -> BTreeSet<&str> {
        self.taxonomy(|g| &g.designers)
    }

    pub fn artists(&self) -> BTreeSet<&str> {
        self.taxonomy(|g| &g.artists)
    }

    pub fn publishers(&self) -> BTreeSet<&str> {
        self.taxonomy(|g| &g.publishers)
    }

    pub fn families(&self) -> BTreeSet<&str> {
        self.taxonomy(|g| &g.families)
    }

    pub fn compilations(&self) -> BTreeSet<&str> {
        self.taxonomy(|g| &g.compilations)
    }

    fn taxonomy<'a>(
        &'a self,
        field: impl Fn(&'a GameRecord) -> &'a Vec<String>,
    ) -> BTreeSet<&'a str> {
        self.all
            .iter()
            .flat_map(|g| field(g).iter().map(String::as_str))
            .collect()
    }
}

fn status_error(url: &str, status: u16) -> Error {
    log::error!("HTTP {status} from {url}");
    Error::Status { url: url.to_string(), status }
}

/// Poll the collection endpoint until it stops answering 202.
fn fetch_owned_ids<T: Transport + ?Sized>(
    transport: &T,
    username: &str,
    options: &FetchOptions,
    progress: &mut dyn Progress,
) -> Result<Vec<String>> {
    let url = collection::collection_url(&options.base_url, username)?;
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let resp = transport.get(url.as_str())?;
        log::info!("Collection: GET {url} -> {} (attempt {attempts})", resp.status);

        match resp.status {
            202 => {
                if options.max_attempts.is_some_and(|max| attempts >= max) {
                    log::error!("Collection: still processing after {attempts} attempts");
                    return Err(Error::StillProcessing { username: username.to_string(), attempts });
                }
                progress.waiting(attempts);
                thread::sleep(options.retry_wait);
            }
            _ if resp.is_success() => return collection::parse_collection(&resp.body),
            status => return Err(status_error(url.as_str(), status)),
        }
    }
}

fn count_nested(game: &GameRecord) -> usize {
    game.expansions.iter().map(|e| 1 + count_nested(e)).sum()
}

/// Nest expansions under their base games.
///
/// Records are keyed by name; a later record with a seen name replaces the
/// earlier one in place. An expansion whose base name is present nests under
/// it (recursively, so an expansion of an expansion nests under the
/// intermediate one). Base games become the top level. Expansions whose base
/// is absent, and anything caught in an expansion cycle, only appear in the
/// returned flat list.
pub(crate) fn assemble(
    records: Vec<GameRecord>,
) -> (BTreeMap<String, GameRecord>, Vec<GameRecord>) {
    let mut by_name: Vec<GameRecord> = Vec::with_capacity(records.len());
    let mut index: HashMap<String, usize> = HashMap::new();
    for record in records {
        match index.get(&record.name) {
            Some(&i) => by_name[i] = record,
            None => {
                index.insert(record.name.clone(), by_name.len());
                by_name.push(record);
            }
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); by_name.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (i, record) in by_name.iter().enumerate() {
        let parent = record
            .expands_name()
            .and_then(|base| index.get(base).copied())
            .filter(|&p| p != i);
        match parent {
            Some(p) => children[p].push(i),
            None if !record.is_expansion() => roots.push(i),
            None => log::debug!("Collection: orphan expansion '{}'", record.name),
        }
    }

    let all = by_name.clone();
    let mut slots: Vec<Option<GameRecord>> = by_name.into_iter().map(Some).collect();

    let mut games = BTreeMap::new();
    for root in roots {
        if let Some(game) = nest(root, &mut slots, &children) {
            games.insert(game.name.clone(), game);
        }
    }
    (games, all)
}

// Parent links form a forest plus possible cycles; cycles hang off no root,
// so walking down from roots terminates.
fn nest(i: usize, slots: &mut [Option<GameRecord>], children: &[Vec<usize>]) -> Option<GameRecord> {
    let mut record = slots[i].take()?;
    record.expansions = children[i]
        .iter()
        .filter_map(|&c| nest(c, slots, children))
        .collect();
    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ItemKind;
    use crate::game::tests::record;

    fn expansion(name: &str, base: &str) -> GameRecord {
        let mut r = record(name);
        r.kind = ItemKind::Expansion { expands: base.into() };
        r
    }

    #[test]
    fn expansion_nests_regardless_of_order() {
        let (games, all) = assemble(vec![expansion("Leaf", "Root"), record("Root")]);
        assert_eq!(all.len(), 2);
        assert_eq!(games.len(), 1);
        let root = &games["Root"];
        assert_eq!(root.expansions.len(), 1);
        assert_eq!(root.expansions[0].name, "Leaf");
        assert!(!games.contains_key("Leaf"));
    }

    #[test]
    fn expansion_of_expansion_nests_under_intermediate() {
        let (games, _) = assemble(vec![
            record("Root"),
            expansion("Mid", "Root"),
            expansion("Tip", "Mid"),
        ]);
        let mid = &games["Root"].expansions[0];
        assert_eq!(mid.name, "Mid");
        assert_eq!(mid.expansions[0].name, "Tip");
        assert_eq!(count_nested(&games["Root"]), 2);
    }

    #[test]
    fn orphans_and_cycles_stay_flat() {
        let (games, all) = assemble(vec![
            record("Root"),
            expansion("Orphan", "Elsewhere"),
            expansion("A", "B"),
            expansion("B", "A"),
            expansion("Me", "Me"),
        ]);
        assert_eq!(games.keys().collect::<Vec<_>>(), ["Root"]);
        assert!(games["Root"].expansions.is_empty());
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn duplicate_names_keep_first_slot_last_value() {
        let mut first = record("Twin");
        first.id = "1".into();
        let mut second = record("Twin");
        second.id = "2".into();
        let (games, all) = assemble(vec![first, record("Other"), second]);
        assert_eq!(all.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(), ["Twin", "Other"]);
        assert_eq!(games["Twin"].id, "2");
    }
}
