//! Chapter and question records plus the player profile sent to suppliers.

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, EngineError};

/// Where a chapter's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentOrigin {
    /// Produced by the remote content service for this player.
    #[default]
    Generated,
    /// Read from a local JSON file.
    File,
    /// The built-in sample set, used when nothing else was available.
    Fallback,
}

impl ContentOrigin {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::File => "file",
            Self::Fallback => "sample",
        }
    }
}

/// A single true/false statement. `correct_answer == true` means YES.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub statement: String,
    pub correct_answer: bool,
    pub feedback_correct: String,
    pub feedback_wrong: String,
}

impl Question {
    /// Feedback text for an answer that was (or was not) correct.
    pub fn feedback(&self, correct: bool) -> &str {
        if correct {
            &self.feedback_correct
        } else {
            &self.feedback_wrong
        }
    }
}

/// A themed group of questions with its intro/complete presentation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub number: u32,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub origin: ContentOrigin,
}

/// Wire shape returned by content services and stored in content files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterSet {
    pub chapters: Vec<Chapter>,
}

/// Self-reported political knowledge, used to pitch question difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeLevel {
    Beginner,
    #[default]
    Intermediate,
    Expert,
}

impl KnowledgeLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" | "new" => Some(Self::Beginner),
            "intermediate" | "some" => Some(Self::Intermediate),
            "expert" | "advanced" => Some(Self::Expert),
            _ => None,
        }
    }
}

/// How the player usually takes part in elections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoterType {
    FirstTime,
    #[default]
    Occasional,
    Regular,
}

impl VoterType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "first_time" | "first" => Some(Self::FirstTime),
            "occasional" => Some(Self::Occasional),
            "regular" | "always" => Some(Self::Regular),
            _ => None,
        }
    }
}

/// Context collected during setup and handed to the content supplier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerProfile {
    pub location: String,
    pub topics: Vec<String>,
    pub knowledge: KnowledgeLevel,
    pub voter_type: VoterType,
}

/// Check the invariants the engine relies on: at least one chapter, and no
/// chapter without questions.
pub fn validate_chapters(chapters: &[Chapter]) -> Result<(), EngineError> {
    if chapters.is_empty() {
        return Err(EngineError::NoChapters);
    }
    for (index, chapter) in chapters.iter().enumerate() {
        if chapter.questions.is_empty() {
            return Err(EngineError::EmptyChapter {
                index,
                title: chapter.title.clone(),
            });
        }
    }
    Ok(())
}

/// Parse a chapter set from JSON, tag every chapter with `origin` and
/// validate it.
pub fn parse_chapter_set(json: &str, origin: ContentOrigin) -> Result<Vec<Chapter>, ContentError> {
    let set: ChapterSet = serde_json::from_str(json)?;
    tag_and_validate(set.chapters, origin)
}

pub(crate) fn tag_and_validate(
    mut chapters: Vec<Chapter>,
    origin: ContentOrigin,
) -> Result<Vec<Chapter>, ContentError> {
    for chapter in &mut chapters {
        chapter.origin = origin;
    }
    validate_chapters(&chapters).map_err(|e| ContentError::Invalid(e.to_string()))?;
    Ok(chapters)
}
