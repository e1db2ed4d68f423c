//! Where finished (or abandoned) runs are recorded.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::GameSummary;
use crate::utils::persistence;

pub const RESULTS_FILE: &str = "results.json";

/// One recorded run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub summary: GameSummary,
}

impl ResultRecord {
    pub fn new(summary: GameSummary) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            summary,
        }
    }
}

pub trait ResultSink {
    fn record(&mut self, summary: GameSummary) -> io::Result<()>;
}

/// Appends records to a JSON array on disk.
pub struct JsonResultLog {
    path: PathBuf,
}

impl JsonResultLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The log at ~/.ballotbird/results.json.
    pub fn default_location() -> io::Result<Self> {
        Ok(Self::new(persistence::save_path(RESULTS_FILE)?))
    }

    /// All records so far; empty if the file does not exist yet. A file
    /// that does not parse is an `InvalidData` error.
    pub fn history(&self) -> io::Result<Vec<ResultRecord>> {
        Ok(persistence::read_json_at(&self.path)?.unwrap_or_default())
    }

    /// Where an unreadable log is moved before a fresh one is started.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }
}

impl ResultSink for JsonResultLog {
    fn record(&mut self, summary: GameSummary) -> io::Result<()> {
        let mut history = match self.history() {
            Ok(history) => history,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                let backup = self.backup_path();
                warn!(
                    error = %e,
                    backup = %backup.display(),
                    "Result log is unreadable, moving it aside"
                );
                fs::rename(&self.path, &backup)?;
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        let record = ResultRecord::new(summary);
        info!(
            id = %record.id,
            total_correct = record.summary.score.total_correct,
            total_questions = record.summary.score.total_questions,
            completed = record.summary.completed,
            "Recording result"
        );
        history.push(record);
        persistence::save_json_at(&self.path, &history)
    }
}

/// Keeps summaries in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub summaries: Vec<GameSummary>,
}

impl ResultSink for MemorySink {
    fn record(&mut self, summary: GameSummary) -> io::Result<()> {
        self.summaries.push(summary);
        Ok(())
    }
}
