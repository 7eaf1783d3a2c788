//! Persisted best score
//!
//! Read once at startup, written when a finished run beats it. Storage
//! failures are logged and otherwise ignored.

use crate::persistence::{KeyValueStore, load_json, save_json};

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "star_strike_high_score";

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Load from storage, 0 if absent or unreadable
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_json::<u64>(store, Self::STORAGE_KEY) {
            Ok(Some(best)) => {
                log::info!("Loaded high score {best}");
                Self { best }
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score: {e}");
                Self::default()
            }
        }
    }

    /// Check if a score beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true on a new best, which is also
    /// written to `store` (a failed write keeps the in-memory best).
    pub fn submit(&mut self, score: u64, store: &mut dyn KeyValueStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        match save_json(store, Self::STORAGE_KEY, &score) {
            Ok(()) => log::info!("New high score saved: {score}"),
            Err(e) => log::warn!("Could not save high score {score}: {e}"),
        }
        true
    }
}
