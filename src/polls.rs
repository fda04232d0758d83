// src/polls.rs
//! Community poll aggregation.
//!
//! Pure functions over vote tallies; nothing here knows about XML. The record
//! parser (`specs::thing`) picks the right poll out of an item and hands the
//! tallies over in document order.

/// One option of a single-choice poll (`suggested_playerage`,
/// `language_dependence`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTally {
    pub value: String,
    pub votes: u64,
}

impl VoteTally {
    pub fn new(value: impl Into<String>, votes: u64) -> Self {
        Self { value: value.into(), votes }
    }
}

/// One `results` group of the `suggested_numplayers` poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumPlayersTally {
    pub num_players: String,
    pub best: u64,
    pub recommended: u64,
    pub not_recommended: u64,
}

impl NumPlayersTally {
    pub fn new(
        num_players: impl Into<String>,
        best: u64,
        recommended: u64,
        not_recommended: u64,
    ) -> Self {
        Self { num_players: num_players.into(), best, recommended, not_recommended }
    }

    /// Widened so any three `u64` counts add without overflow.
    pub fn total(&self) -> u128 {
        u128::from(self.best) + u128::from(self.recommended) + u128::from(self.not_recommended)
    }

    fn yes(&self) -> u128 {
        u128::from(self.best) + u128::from(self.recommended)
    }
}

/// Community player range: first and last recommended counts, plus the count
/// with the strongest "Best" share. `best` can be absent even when a range
/// exists (nobody voted "Best" anywhere).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecommendation {
    pub min: String,
    pub max: String,
    pub best: Option<String>,
}

/// Share of "Best" votes, `None` when nobody voted.
pub fn best_ratio(tally: &NumPlayersTally) -> Option<f64> {
    let total = tally.total();
    if total == 0 {
        return None;
    }
    Some(tally.best as f64 / total as f64)
}

/// Derive the recommended range and best count from a numplayers poll.
///
/// A count is recommended when `(Best + Recommended) / total > threshold`.
/// The best count must strictly beat every earlier ratio, so the first one
/// wins ties and a zero ratio never qualifies.
pub fn recommend_players(
    tallies: &[NumPlayersTally],
    threshold: f64,
) -> Option<PlayerRecommendation> {
    let mut best_split = 0.0_f64;
    let mut best_value: Option<&str> = None;
    let mut recommended: Vec<&str> = Vec::new();

    for tally in tallies {
        let Some(ratio) = best_ratio(tally) else {
            continue;
        };
        if ratio > best_split {
            best_split = ratio;
            best_value = Some(&tally.num_players);
        }

        if tally.yes() as f64 / tally.total() as f64 > threshold {
            recommended.push(&tally.num_players);
        }
    }

    let (first, last) = (recommended.first()?, recommended.last()?);
    Some(PlayerRecommendation {
        min: first.to_string(),
        max: last.to_string(),
        best: best_value.map(str::to_string),
    })
}

/// Walk the options in order and return the first one at which the running
/// vote count reaches `threshold` of the total.
pub fn cumulative_threshold(tallies: &[VoteTally], threshold: f64) -> Option<String> {
    let total: u128 = tallies.iter().map(|t| u128::from(t.votes)).sum();
    if total == 0 {
        return None;
    }
    let target = total as f64 * threshold;

    let mut cumulative = 0u128;
    for tally in tallies {
        cumulative += u128::from(tally.votes);
        if cumulative as f64 >= target {
            return Some(tally.value.clone());
        }
    }
    None
}
