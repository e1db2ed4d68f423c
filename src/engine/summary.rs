//! The score summary handed to result consumers.

use serde::{Deserialize, Serialize};

use super::types::{GameState, Score};
use crate::content::ContentOrigin;

/// Which content a chapter was played with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSource {
    pub id: String,
    pub title: String,
    pub origin: ContentOrigin,
}

/// Final (or current) result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub score: Score,
    pub display_score: u32,
    pub chapters: Vec<ChapterSource>,
    /// False when the summary was taken before the last chapter finished.
    pub completed: bool,
}

impl GameSummary {
    /// Whether any chapter fell back to the sample content.
    pub fn used_fallback(&self) -> bool {
        self.chapters
            .iter()
            .any(|c| c.origin == ContentOrigin::Fallback)
    }
}

/// Summarize the run as it stands.
pub fn summarize(state: &GameState, completed: bool) -> GameSummary {
    GameSummary {
        score: state.score.clone(),
        display_score: state.display_score,
        chapters: state
            .chapters
            .iter()
            .map(|c| ChapterSource {
                id: c.id.clone(),
                title: c.title.clone(),
                origin: c.origin,
            })
            .collect(),
        completed,
    }
}
