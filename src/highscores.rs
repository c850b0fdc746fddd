//! High score leaderboards, one per game
//!
//! Each table keeps the top 10 values in descending order. Tables are kept
//! in memory or persisted as a single JSON file.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::persistence::{self, StoreError};

/// Maximum number of high scores to keep per game
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Points or distance, depending on the game
    pub value: u32,
    /// Unix timestamp (s) when achieved
    pub timestamp: u64,
}

/// Leaderboard for one game
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<ScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a value qualifies for the leaderboard
    pub fn qualifies(&self, value: u32) -> bool {
        if value == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Has to beat the lowest entry
        self.entries.last().map(|e| value > e.value).unwrap_or(true)
    }

    /// Insert a value if it qualifies.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add_score(&mut self, value: u32, timestamp: u64) -> Option<usize> {
        if !self.qualifies(value) {
            return None;
        }

        let entry = ScoreEntry { value, timestamp };

        // Sorted descending, ties keep the older entry first
        let pos = self.entries.iter().position(|e| value > e.value);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every game's leaderboard, keyed by game name
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoreBook {
    tables: BTreeMap<String, HighScores>,
}

impl ScoreBook {
    pub fn table(&self, game: &str) -> Option<&HighScores> {
        self.tables.get(game)
    }

    pub fn add_score(&mut self, game: &str, value: u32) -> Option<usize> {
        self.tables
            .entry(game.to_string())
            .or_default()
            .add_score(value, now_secs())
    }

    pub fn top_scores(&self, game: &str) -> Vec<ScoreEntry> {
        self.table(game).map(|t| t.entries.clone()).unwrap_or_default()
    }
}

/// Score persistence used by the save prompt and the leaderboard screen
pub trait ScoreStore {
    /// Record a finished run. Returns the rank reached, if any.
    fn save_score(&mut self, game: &str, value: u32) -> Result<Option<usize>, StoreError>;

    /// Best entries for a game, highest first
    fn top_scores(&self, game: &str) -> Vec<ScoreEntry>;
}

/// Leaderboards that live only as long as the process
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    book: ScoreBook,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn save_score(&mut self, game: &str, value: u32) -> Result<Option<usize>, StoreError> {
        Ok(self.book.add_score(game, value))
    }

    fn top_scores(&self, game: &str) -> Vec<ScoreEntry> {
        self.book.top_scores(game)
    }
}

/// Leaderboards persisted to a JSON file
#[derive(Debug)]
pub struct JsonScoreStore {
    path: PathBuf,
    book: ScoreBook,
}

impl JsonScoreStore {
    /// Open the store at `path`. A missing or unreadable file starts fresh.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let book = match persistence::read_json::<ScoreBook>(&path) {
            Ok(Some(book)) => {
                log::info!("Loaded high scores for {} games", book.tables.len());
                book
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                ScoreBook::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high scores at {}: {}", path.display(), e);
                ScoreBook::default()
            }
        };
        Self { path, book }
    }
}

impl ScoreStore for JsonScoreStore {
    fn save_score(&mut self, game: &str, value: u32) -> Result<Option<usize>, StoreError> {
        let rank = self.book.add_score(game, value);
        if rank.is_some() {
            persistence::write_json_atomic(&self.path, &self.book)?;
            log::info!("High score saved for {} ({})", game, value);
        }
        Ok(rank)
    }

    fn top_scores(&self, game: &str) -> Vec<ScoreEntry> {
        self.book.top_scores(game)
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn values(entries: &[ScoreEntry]) -> Vec<u32> {
        entries.iter().map(|e| e.value).collect()
    }

    #[test]
    fn test_table_sorted_and_trimmed() {
        let mut scores = HighScores::new();
        for v in 1..=12 {
            scores.add_score(v * 10, 0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.first().map(|e| e.value), Some(120));
        assert_eq!(scores.entries.last().map(|e| e.value), Some(30));
        assert!(!scores.qualifies(30));
        assert_eq!(scores.add_score(55, 0), Some(8));
        assert_eq!(scores.entries.last().map(|e| e.value), Some(40));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, 0), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_memory_store_keeps_games_apart() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(store.save_score("Block Breaker", 300).unwrap(), Some(1));
        assert_eq!(store.save_score("Block Breaker", 500).unwrap(), Some(1));
        assert_eq!(store.save_score("Mario", 42).unwrap(), Some(1));

        assert_eq!(values(&store.top_scores("Block Breaker")), vec![500, 300]);
        assert_eq!(values(&store.top_scores("Mario")), vec![42]);
        assert!(store.top_scores("Pong").is_empty());
    }

    #[test]
    fn test_json_store_survives_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");

        let mut store = JsonScoreStore::load(&path);
        store.save_score("Mario", 640).unwrap();
        store.save_score("Mario", 128).unwrap();

        let reloaded = JsonScoreStore::load(&path);
        assert_eq!(values(&reloaded.top_scores("Mario")), vec![640, 128]);
    }

    #[test]
    fn test_json_store_starts_fresh_on_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "[[[").unwrap();

        let mut store = JsonScoreStore::load(&path);
        assert!(store.top_scores("Mario").is_empty());
        store.save_score("Mario", 10).unwrap();
        assert_eq!(values(&JsonScoreStore::load(&path).top_scores("Mario")), vec![10]);
    }

    #[test]
    fn test_json_store_reports_write_failure() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail
        let path = dir.path().join("scores.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let mut store = JsonScoreStore::load(&path);
        assert!(store.save_score("Mario", 10).is_err());
        assert_eq!(values(&store.top_scores("Mario")), vec![10]);
    }
}
