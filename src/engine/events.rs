//! Events produced by input and ticks.
//!
//! The presentation layer maps these to sounds, log lines and result
//! emission. The engine itself never touches audio or IO.

use super::summary::GameSummary;
use super::types::Phase;
use crate::audio::Cue;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: Phase, to: Phase },

    /// A jump was accepted.
    Flapped,

    /// A plain obstacle was passed and credited.
    ObstaclePassed { display_score: u32 },

    /// A question obstacle entered the field.
    QuestionSpawned { question_index: usize },

    /// The bird entered an answer slot.
    Answered {
        question_index: usize,
        chose_yes: bool,
        correct: bool,
        display_score: u32,
    },

    /// A question obstacle was passed (or cleared after a crash) and the
    /// run moved past that question.
    QuestionResolved { question_index: usize, answered: bool },

    /// Hit an obstacle or left the band.
    Crashed,

    ChapterCompleted {
        chapter_index: usize,
        correct: u32,
        total: u32,
    },

    /// Emitted once on entering `GameComplete`.
    GameCompleted(GameSummary),
}

impl GameEvent {
    /// Sound cue for this event, if it has one.
    pub fn cue(&self) -> Option<Cue> {
        match self {
            Self::Flapped => Some(Cue::Flap),
            Self::Answered { correct: true, .. } => Some(Cue::Correct),
            Self::Answered { correct: false, .. } => Some(Cue::Wrong),
            Self::Crashed => Some(Cue::Crash),
            Self::ChapterCompleted { .. } => Some(Cue::ChapterDone),
            _ => None,
        }
    }
}
