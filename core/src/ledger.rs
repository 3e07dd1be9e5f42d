//! Best completion times per difficulty, persisted through a key-value [`ScoreStore`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::*;

/// Maximum number of entries kept per difficulty
pub const MAX_SCORES: usize = 5;

/// Two times closer than this (in seconds) count as the same result.
pub const DUPLICATE_EPSILON: f64 = 0.1;

const KEY_PREFIX: &str = "sweeper:scores:";

/// Rounds a completion time to the tenth of a second that gets stored and displayed.
pub fn round_time(secs: f64) -> f64 {
    (secs * 10.0).round() / 10.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    /// Completion time in seconds, one decimal
    pub time: f64,
    pub difficulty_label: String,
    pub date: String,
}

/// Result of offering a completion time to the ledger.
#[derive(Clone, Debug, PartialEq)]
pub struct Recorded {
    /// The table as it now stands, fastest first
    pub scores: Vec<ScoreEntry>,
    /// 1-based position of the new entry, `None` when it was a duplicate or missed the cut
    pub rank: Option<usize>,
}

/// Minimal key-value persistence used by the ledger.
pub trait ScoreStore {
    fn get(&self, key: &str) -> core::result::Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> core::result::Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> core::result::Result<(), StoreError>;
}

/// In-process store, nothing survives the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> core::result::Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> core::result::Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> core::result::Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

pub struct ScoreLedger<S> {
    store: S,
}

impl<S: ScoreStore> ScoreLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn storage_key(difficulty: Difficulty) -> String {
        format!("{}{}", KEY_PREFIX, difficulty.key())
    }

    /// Stored scores for `difficulty`, fastest first. Missing or unreadable data reads as empty.
    pub fn list(&self, difficulty: Difficulty) -> Vec<ScoreEntry> {
        let key = Self::storage_key(difficulty);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("Could not read scores for {}: {}", difficulty.key(), err);
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            log::warn!("Discarding corrupt scores under {}: {}", key, err);
            Vec::new()
        })
    }

    pub fn best(&self, difficulty: Difficulty) -> Option<ScoreEntry> {
        self.list(difficulty).into_iter().next()
    }

    /// Records a completion time dated today, see [`Self::record_on`].
    pub fn record(&mut self, difficulty: Difficulty, time: f64) -> Recorded {
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        self.record_on(difficulty, time, date)
    }

    /// Inserts `time` unless an entry within [`DUPLICATE_EPSILON`] already exists, keeping the
    /// fastest [`MAX_SCORES`].
    pub fn record_on(
        &mut self,
        difficulty: Difficulty,
        time: f64,
        date: impl Into<String>,
    ) -> Recorded {
        let label = difficulty.label();
        let mut scores = self.list(difficulty);

        let duplicate = scores.iter().any(|entry| {
            (entry.time - time).abs() < DUPLICATE_EPSILON && entry.difficulty_label == label
        });
        if duplicate {
            log::debug!("Ignoring duplicate {} time {:.1}", difficulty.key(), time);
            return Recorded { scores, rank: None };
        }

        let time = round_time(time);
        let index = scores.partition_point(|entry| entry.time <= time);
        if index >= MAX_SCORES {
            log::debug!("{} time {:.1} misses the table", difficulty.key(), time);
            return Recorded { scores, rank: None };
        }

        scores.insert(
            index,
            ScoreEntry {
                time,
                difficulty_label: label.to_owned(),
                date: date.into(),
            },
        );
        scores.truncate(MAX_SCORES);

        self.save(difficulty, &scores);
        Recorded {
            scores,
            rank: Some(index + 1),
        }
    }

    pub fn clear(&mut self, difficulty: Difficulty) {
        if let Err(err) = self.store.remove(&Self::storage_key(difficulty)) {
            log::error!("Could not clear {} scores: {}", difficulty.key(), err);
        } else {
            log::info!("Cleared {} scores", difficulty.key());
        }
    }

    fn save(&mut self, difficulty: Difficulty, scores: &[ScoreEntry]) {
        let key = Self::storage_key(difficulty);
        let result = serde_json::to_string(scores)
            .map_err(StoreError::from)
            .and_then(|raw| self.store.set(&key, raw));
        if let Err(err) = result {
            log::error!("Could not save scores to {}: {}", key, err);
        }
    }
}
