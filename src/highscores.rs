//! Local leaderboard
//!
//! Persisted to LocalStorage, tracks the top 5 scores with nicknames.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_NAME_LEN;

/// Maximum number of entries to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
}

/// Top scores, sorted descending; equal scores keep insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<HighScoreEntry>,
}

/// Truncate to the nickname limit on a character boundary
pub fn clip_name(name: &str) -> String {
    name.chars().take(MAX_NAME_LEN).collect()
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient load: anything that is not an array of `{name, score}` objects
    /// is skipped, names are clipped and scores floored at zero
    pub fn from_json(json: &str) -> Self {
        let values = match serde_json::from_str::<serde_json::Value>(json) {
            Ok(serde_json::Value::Array(values)) => values,
            _ => {
                log::warn!("Leaderboard data is not a list, starting fresh");
                return Self::new();
            }
        };

        let mut board = Self::new();
        for value in values {
            let name = value.get("name").and_then(|n| n.as_str());
            let score = value.get("score").and_then(|s| s.as_f64());
            if let (Some(name), Some(score)) = (name, score) {
                board.entries.push(HighScoreEntry {
                    name: clip_name(name),
                    score: score.max(0.0).floor() as u64,
                });
            }
        }
        // Stable sort keeps stored order among ties
        board.entries.sort_by(|a, b| b.score.cmp(&a.score));
        board.entries.truncate(MAX_HIGH_SCORES);
        board
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must beat the lowest entry; ties lose to the older entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a score. Returns the rank achieved (1-indexed) or None if it
    /// didn't make the board.
    pub fn submit(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: clip_name(name),
            score,
        };

        // Insert after every entry with an equal or higher score
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(pos + 1)
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// One line per entry, as shown on the menu
    pub fn lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec!["No scores yet.".to_string()];
        }
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.name, e.score))
            .collect()
    }
}
