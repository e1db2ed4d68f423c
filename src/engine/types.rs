//! Game state aggregate: phase, bird, obstacles, progress and score.

use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::config::EngineConfig;
use super::obstacle::Obstacle;
use crate::content::{validate_chapters, Chapter, Question};
use crate::error::EngineError;

/// Top-level phase of a run. Timed phases carry the timestamp they were
/// entered at; durations are measured from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for content and assets.
    Loading,
    /// Chapter title card.
    ChapterIntro { since_ms: u64 },
    /// Bird bobs in place until the first input.
    ReadyToPlay { since_ms: u64 },
    /// Scripted flight while the first question is previewed.
    AutoFly { since_ms: u64 },
    /// Player in control.
    Playing,
    /// Countdown before a question obstacle appears. Plain obstacles keep
    /// moving.
    QuestionPreview { since_ms: u64 },
    /// Hit something. The next input retries from the same spot.
    Crashed { since_ms: u64 },
    /// All questions of the chapter resolved.
    ChapterComplete,
    /// All chapters done.
    GameComplete,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::ChapterIntro { .. } => "chapter_intro",
            Self::ReadyToPlay { .. } => "ready_to_play",
            Self::AutoFly { .. } => "auto_fly",
            Self::Playing => "playing",
            Self::QuestionPreview { .. } => "question_preview",
            Self::Crashed { .. } => "crashed",
            Self::ChapterComplete => "chapter_complete",
            Self::GameComplete => "game_complete",
        }
    }

    /// Entry timestamp for phases whose behaviour depends on elapsed time.
    pub fn since_ms(&self) -> Option<u64> {
        match self {
            Self::ChapterIntro { since_ms }
            | Self::ReadyToPlay { since_ms }
            | Self::AutoFly { since_ms }
            | Self::QuestionPreview { since_ms }
            | Self::Crashed { since_ms } => Some(*since_ms),
            _ => None,
        }
    }

    /// Whether jump input steers the bird.
    pub fn allows_flight(&self) -> bool {
        matches!(self, Self::Playing | Self::QuestionPreview { .. })
    }
}

/// Correct answers out of total questions for one chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChapterScore {
    pub correct: u32,
    pub total: u32,
}

/// Correctness score across the whole run. Counters only ever increase.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub chapters: Vec<ChapterScore>,
    pub total_correct: u32,
    pub total_questions: u32,
}

impl Score {
    /// A fresh, all-zero score sized from the chapter list.
    pub fn new(chapters: &[Chapter]) -> Self {
        let per_chapter: Vec<ChapterScore> = chapters
            .iter()
            .map(|c| ChapterScore {
                correct: 0,
                total: c.questions.len() as u32,
            })
            .collect();
        let total_questions = per_chapter.iter().map(|c| c.total).sum();
        Self {
            chapters: per_chapter,
            total_correct: 0,
            total_questions,
        }
    }

    pub fn record_correct(&mut self, chapter_index: usize) {
        if let Some(chapter) = self.chapters.get_mut(chapter_index) {
            chapter.correct += 1;
            self.total_correct += 1;
        }
    }

    pub fn chapter(&self, chapter_index: usize) -> ChapterScore {
        self.chapters.get(chapter_index).copied().unwrap_or_default()
    }
}

/// Feedback for the most recent answer, shown for a short while.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub text: String,
    pub since_ms: u64,
}

/// The aggregate root. Owned by a single driver; renderers only read it.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    pub bird: Bird,
    /// Live obstacles, oldest (leftmost) first.
    pub obstacles: Vec<Obstacle>,
    pub chapter_index: usize,
    /// Index of the current question within the chapter.
    pub question_index: usize,
    pub score: Score,
    /// Arcade score shown to the player.
    pub display_score: u32,
    /// Plain obstacles passed since the last question obstacle was passed.
    pub obstacles_since_question: u32,
    /// A question obstacle is on the field and not yet passed.
    pub question_active: bool,
    pub frame_count: u64,
    pub last_tick_ms: Option<u64>,
    pub last_feedback: Option<AnswerFeedback>,

    // Immutable inputs
    pub chapters: Vec<Chapter>,
    pub config: EngineConfig,
}

impl GameState {
    /// Create a game in the `Loading` phase.
    ///
    /// Rejects an empty chapter list, chapters without questions and
    /// tunings that break the obstacle geometry.
    pub fn new(chapters: Vec<Chapter>, config: EngineConfig) -> Result<Self, EngineError> {
        validate_chapters(&chapters)?;
        config.validate().map_err(EngineError::InvalidConfig)?;
        Ok(Self {
            phase: Phase::Loading,
            bird: Bird::new(),
            obstacles: Vec::new(),
            chapter_index: 0,
            question_index: 0,
            score: Score::new(&chapters),
            display_score: 0,
            obstacles_since_question: 0,
            question_active: false,
            frame_count: 0,
            last_tick_ms: None,
            last_feedback: None,
            chapters,
            config,
        })
    }

    pub fn current_chapter(&self) -> &Chapter {
        &self.chapters[self.chapter_index]
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_chapter().questions.get(self.question_index)
    }

    /// Question at `index` in the current chapter.
    pub fn question_at(&self, index: usize) -> Option<&Question> {
        self.current_chapter().questions.get(index)
    }

    pub fn has_more_chapters(&self) -> bool {
        self.chapter_index + 1 < self.chapters.len()
    }

    /// Unanswered question obstacles currently on the field.
    pub fn unanswered_questions_on_field(&self) -> usize {
        self.obstacles
            .iter()
            .filter(|o| o.is_unanswered_question())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample_chapters;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(sample_chapters(), EngineConfig::default()).unwrap();
        assert_eq!(state.phase, Phase::Loading);
        assert_eq!(state.chapter_index, 0);
        assert_eq!(state.question_index, 0);
        assert_eq!(state.display_score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score.total_questions, 8);
        assert_eq!(state.score.chapters[1], ChapterScore { correct: 0, total: 2 });
    }

    #[test]
    fn test_new_state_rejects_empty_content() {
        assert_eq!(
            GameState::new(Vec::new(), EngineConfig::default()).unwrap_err(),
            EngineError::NoChapters
        );
        let mut chapters = sample_chapters();
        chapters[2].questions.clear();
        assert!(matches!(
            GameState::new(chapters, EngineConfig::default()),
            Err(EngineError::EmptyChapter { index: 2, .. })
        ));
    }

    #[test]
    fn test_new_state_rejects_bad_config() {
        let config = EngineConfig {
            questions_every: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            GameState::new(sample_chapters(), config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_score_record_correct() {
        let mut score = Score::new(&sample_chapters());
        score.record_correct(1);
        score.record_correct(1);
        score.record_correct(9);
        assert_eq!(score.chapter(1).correct, 2);
        assert_eq!(score.total_correct, 2);
        assert_eq!(score.chapter(9), ChapterScore::default());
    }

    #[test]
    fn test_phase_helpers() {
        assert!(Phase::Playing.allows_flight());
        assert!(Phase::QuestionPreview { since_ms: 0 }.allows_flight());
        assert!(!Phase::AutoFly { since_ms: 0 }.allows_flight());
        assert_eq!(Phase::Crashed { since_ms: 42 }.since_ms(), Some(42));
        assert_eq!(Phase::GameComplete.since_ms(), None);
        assert_eq!(Phase::QuestionPreview { since_ms: 0 }.name(), "question_preview");
    }
}
