//! High score tracking
//!
//! A single best distance, read once at startup and written back only when a
//! run beats it. Storage problems never reach gameplay: a failed load counts
//! as no prior score and a failed save is logged and dropped.

use serde::{Deserialize, Serialize};

use crate::persistence::{PersistError, ScoreStore};

/// Best distance score seen so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a distance would beat the current best
    pub fn qualifies(&self, distance: u64) -> bool {
        distance > self.best
    }

    /// Take `distance` as the new best if it beats the old one.
    /// Returns true when the best changed.
    pub fn record(&mut self, distance: u64) -> bool {
        if !self.qualifies(distance) {
            return false;
        }
        self.best = distance;
        true
    }

    /// Load the best score from a store, defaulting to zero
    pub fn load(store: &dyn ScoreStore) -> Self {
        match store.load() {
            Ok(best) => {
                log::info!("Loaded high score {best}");
                Self::new(best)
            }
            Err(PersistError::Missing) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score: {e}");
                Self::default()
            }
        }
    }

    /// Write the best score to a store. Failures are logged and skipped.
    pub fn persist(&self, store: &mut dyn ScoreStore) -> bool {
        match store.save(self.best) {
            Ok(()) => {
                log::info!("High score {} saved", self.best);
                true
            }
            Err(e) => {
                log::warn!("Could not save high score {}: {e}", self.best);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{FileScoreStore, MemoryScoreStore};

    #[test]
    fn test_record_only_improvements() {
        let mut high = HighScore::new(100);
        assert!(!high.record(100));
        assert!(!high.record(50));
        assert_eq!(high.best(), 100);
        assert!(high.record(101));
        assert_eq!(high.best(), 101);
    }

    #[test]
    fn test_load_defaults_to_zero() {
        let store = MemoryScoreStore::default();
        assert_eq!(HighScore::load(&store).best(), 0);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        std::fs::write(&path, "garbage").unwrap();
        assert_eq!(HighScore::load(&FileScoreStore::new(&path)).best(), 0);
    }

    #[test]
    fn test_persist_and_reload() {
        let mut store = MemoryScoreStore::default();
        assert!(HighScore::new(321).persist(&mut store));
        assert_eq!(HighScore::load(&store).best(), 321);
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_persist_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileScoreStore::new(dir.path().join("no").join("such").join("dir"));
        assert!(!HighScore::new(9).persist(&mut store));
    }
}
