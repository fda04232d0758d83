// src/lib.rs

#[cfg(feature = "cli")]
pub mod cli;
pub mod collection;
pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod logger;
pub mod polls;
pub mod progress;
pub mod report;
pub mod specs;

pub use collection::Collection;
pub use error::{Error, ParseError, Result};
pub use game::{GameRecord, ItemKind, PlayerCount};
