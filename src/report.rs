// src/report.rs
use std::fmt::{Display, Write};

use crate::{collection::Collection, config::options::ReportOptions, game::GameRecord};

/// Base games by rating, best first, optionally limited to a player count.
pub fn ranked(collection: &Collection, players: Option<u32>) -> Vec<&GameRecord> {
    let mut games: Vec<&GameRecord> = collection
        .games()
        .filter(|g| players.is_none_or(|n| g.good_for_players(n)))
        .collect();
    games.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    games
}

fn or_dash<T: Display>(v: Option<T>) -> String {
    v.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn game_line(g: &GameRecord) -> String {
    format!(
        "{} - rating={:.2}, players : min={}, max={}, best={}",
        g.name,
        g.rating,
        or_dash(g.community_min_players),
        or_dash(g.community_max_players),
        or_dash(g.community_best_players),
    )
}

fn write_expansions(out: &mut String, g: &GameRecord, depth: usize) {
    for expansion in &g.expansions {
        let _ = writeln!(out, "{:indent$}* {}", "", expansion.name, indent = depth * 2);
        write_expansions(out, expansion, depth + 1);
    }
}

/// The text report printed by the CLI.
pub fn render(collection: &Collection, opts: &ReportOptions) -> String {
    let mut out = String::new();

    for g in ranked(collection, opts.players) {
        let _ = writeln!(out, "{}", game_line(g));
        write_expansions(&mut out, g, 1);
    }

    if opts.show_taxonomy {
        let sections = [
            ("Mechanics", collection.mechanics()),
            ("Categories", collection.categories()),
        ];
        for (title, set) in sections {
            let _ = writeln!(out, "\n{title} ({}):", set.len());
            for item in set {
                let _ = writeln!(out, "  {item}");
            }
        }
    }
    out
}
