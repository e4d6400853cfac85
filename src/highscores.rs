//! High-score persistence.
//!
//! A store keeps the top-N records for one game mode inside a JSON file
//! shared by all modes. A missing or unreadable file is an empty
//! leaderboard, never an error.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_TOP_SCORES;

/// One finished game worth remembering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: u32,
    pub name: String,
    /// The final board, serialized as rows of `(kind code, value)` pairs.
    pub grid: Vec<Vec<(u32, u32)>>,
}

/// Top-N score table for a single game mode, backed by a JSON file.
#[derive(Debug)]
pub struct HighScoreStore {
    path: PathBuf,
    mode: String,
    top_scores: usize,
    records: Vec<HighScoreRecord>,
}

impl HighScoreStore {
    /// Open the table for `mode`, keeping the default number of records.
    pub fn open(path: impl Into<PathBuf>, mode: &str) -> Result<Self> {
        Self::with_capacity(path, mode, DEFAULT_TOP_SCORES)
    }

    /// Open the table for `mode`, keeping at most `top_scores` records.
    pub fn with_capacity(path: impl Into<PathBuf>, mode: &str, top_scores: usize) -> Result<Self> {
        let path = path.into();
        let mut table = load_table(&path);
        let records = table.remove(mode).unwrap_or_default();
        Ok(Self {
            path,
            mode: mode.to_string(),
            top_scores,
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[HighScoreRecord] {
        &self.records
    }

    /// Records sorted by descending score.
    pub fn sorted(&self) -> Vec<&HighScoreRecord> {
        let mut sorted: Vec<&HighScoreRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
    }

    pub fn scores(&self) -> Vec<u32> {
        self.records.iter().map(|record| record.score).collect()
    }

    /// Record a finished game and save. Below capacity the record is
    /// appended; at capacity it replaces the lowest-scoring record iff it
    /// beats it.
    pub fn record(
        &mut self,
        score: u32,
        grid: Vec<Vec<(u32, u32)>>,
        name: impl Into<String>,
    ) -> Result<()> {
        let record = HighScoreRecord {
            score,
            name: name.into(),
            grid,
        };

        if self.records.len() < self.top_scores {
            self.records.push(record);
        } else {
            let lowest = self
                .records
                .iter()
                .enumerate()
                .min_by_key(|(_, record)| record.score)
                .map(|(index, record)| (index, record.score));
            if let Some((index, lowest_score)) = lowest {
                if score > lowest_score {
                    self.records[index] = record;
                }
            }
        }

        self.save()
    }

    /// Write this mode's records back, preserving other modes' tables.
    pub fn save(&self) -> Result<()> {
        let mut table = load_table(&self.path);
        table.insert(self.mode.clone(), self.records.clone());
        let body = serde_json::to_string_pretty(&table)?;
        fs::write(&self.path, body)
            .with_context(|| format!("writing high scores to {}", self.path.display()))
    }
}

fn load_table(path: &Path) -> BTreeMap<String, Vec<HighScoreRecord>> {
    let Ok(body) = fs::read_to_string(path) else {
        return BTreeMap::new();
    };
    serde_json::from_str(&body).unwrap_or_default()
}
