use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::types::LEADERBOARD_CAPACITY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    /// Unix seconds.
    #[serde(default)]
    pub recorded_at: u64,
}

/// Top scores, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a score now. See [`Leaderboard::add_at`].
    pub fn add(&mut self, name: &str, score: u32) -> Option<usize> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.add_at(name, score, now)
    }

    /// Insert, keep the best [`LEADERBOARD_CAPACITY`] and return the 1-based
    /// rank of the first entry with this name and score, or `None` if it did
    /// not make the board.
    ///
    /// Ties keep their insertion order, so an older equal score ranks higher.
    pub fn add_at(&mut self, name: &str, score: u32, recorded_at: u64) -> Option<usize> {
        self.entries.push(ScoreEntry {
            name: name.to_string(),
            score,
            recorded_at,
        });
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_CAPACITY);

        self.entries
            .iter()
            .position(|e| e.name == name && e.score == score)
            .map(|i| i + 1)
    }

    /// Would `score` make the board right now?
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < LEADERBOARD_CAPACITY
            || self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Re-establish ordering and capacity after loading untrusted data.
    fn normalized(mut self) -> Self {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_CAPACITY);
        self
    }
}

/// JSON score file on disk.
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
}

impl LeaderboardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("APPLES_LEADERBOARD_PATH") {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".local");
                    p.push("share");
                    p
                })
            });

        match base {
            Some(mut path) => {
                path.push("tui-apples");
                path.push("scores.json");
                Self { path }
            }
            None => Self::new("scores.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the board; unreadable or malformed files give an empty board.
    pub fn load(&self) -> Leaderboard {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Leaderboard::default(),
        };
        match serde_json::from_slice::<Leaderboard>(&bytes) {
            Ok(board) => board.normalized(),
            Err(e) => {
                warn!("ignoring unreadable score file {}: {}", self.path.display(), e);
                Leaderboard::default()
            }
        }
    }

    pub fn save(&self, board: &Leaderboard) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let text = serde_json::to_string_pretty(board)?;
        fs::write(&self.path, text)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}
