// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use crate::{
    collection::Collection,
    config::{AppOptions, FetchOptions, ReportOptions, consts::*},
    core::net::HttpTransport,
    error::Result,
    logger,
    progress::Progress,
    report,
};

/// Rank the board games a BoardGameGeek user owns.
#[derive(Debug, Parser)]
#[command(name = "bgg_shelf", version, about)]
pub struct Args {
    /// BoardGameGeek username whose owned collection is listed
    #[arg(short, long, env = "BGG_USERNAME")]
    pub user: String,

    /// Only list games suited to this many players (0 lists everything)
    #[arg(short, long, default_value_t = DEFAULT_PLAYERS)]
    pub players: u32,

    /// Vote share a poll option needs to count as the community's answer
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// XML API v2 root
    #[arg(long, default_value = BASE_URL)]
    pub base_url: String,

    /// Give up after this many "still processing" answers (default: wait forever)
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Pause between collection requests while BoardGameGeek is processing
    #[arg(long, default_value_t = RETRY_WAIT_MS)]
    pub retry_wait_ms: u64,

    /// Also list every mechanic and category across the collection
    #[arg(long)]
    pub taxonomy: bool,

    #[arg(long, default_value = LOG_FILE)]
    pub log_file: PathBuf,

    /// off, error, warn, info, debug, trace
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Args {
    pub fn options(&self) -> AppOptions {
        AppOptions {
            username: self.user.clone(),
            fetch: FetchOptions {
                base_url: self.base_url.clone(),
                threshold: self.threshold,
                retry_wait: Duration::from_millis(self.retry_wait_ms),
                max_attempts: self.max_attempts,
            },
            report: ReportOptions {
                players: (self.players > 0).then_some(self.players),
                show_taxonomy: self.taxonomy,
            },
        }
    }
}

/// Status lines on stderr so the report on stdout stays clean.
struct StderrProgress;

impl Progress for StderrProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn waiting(&mut self, attempt: u32) {
        eprintln!("Collection is being prepared by BoardGameGeek, retrying… (attempt {attempt})");
    }
    fn finish(&mut self, games: usize, expansions: usize) {
        eprintln!("Fetched {games} games and {expansions} expansions");
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    if let Err(e) = logger::init(&args.log_file, args.log_level) {
        eprintln!("Warning: logging disabled ({}): {e}", args.log_file.display());
    }
    let opts = args.options();
    log::info!(
        "Run: user='{}' players={:?} threshold={}",
        opts.username,
        opts.report.players,
        opts.fetch.threshold
    );

    let transport = HttpTransport::new()?;
    let mut collection = Collection::new();
    collection.fetch(&transport, &opts.username, &opts.fetch, Some(&mut StderrProgress))?;

    print!("{}", report::render(&collection, &opts.report));
    Ok(())
}
