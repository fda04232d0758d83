// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://boardgamegeek.com/xmlapi2/";
pub const USER_AGENT: &str = concat!("bgg_shelf/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 30;

// Collection endpoint answers 202 while it builds the export
pub const RETRY_WAIT_MS: u64 = 1_000;

// Polls
pub const DEFAULT_THRESHOLD: f64 = 0.5;

// Report
pub const DEFAULT_PLAYERS: u32 = 2;

// Logging
pub const LOG_FILE: &str = ".store/debug.log";
