// src/config/options.rs
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq)]
pub struct AppOptions {
    pub username: String,
    pub fetch: FetchOptions,
    pub report: ReportOptions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FetchOptions {
    /// API root, with or without a trailing slash.
    pub base_url: String,
    /// Vote share used by every poll derivation.
    pub threshold: f64,
    /// Pause between polls of a collection that is still processing.
    pub retry_wait: Duration,
    /// Give up after this many collection requests. `None` waits forever.
    pub max_attempts: Option<u32>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            threshold: DEFAULT_THRESHOLD,
            retry_wait: Duration::from_millis(RETRY_WAIT_MS),
            max_attempts: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    /// Only list games suited to this many players. `None` lists everything.
    pub players: Option<u32>,
    pub show_taxonomy: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            players: Some(DEFAULT_PLAYERS),
            show_taxonomy: false,
        }
    }
}
