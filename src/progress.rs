// src/progress.rs
/// Lightweight status reporting for a collection fetch.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// The collection endpoint answered "still processing"; `attempt` is the
    /// number of requests made so far.
    fn waiting(&mut self, _attempt: u32) {}

    /// Called once the owned ids are known, before the batched detail request.
    fn begin(&mut self, _total: usize) {}

    /// Called at the end of a successful fetch.
    fn finish(&mut self, _games: usize, _expansions: usize) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
