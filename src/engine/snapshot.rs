//! Read-only view of the game for renderers.

use super::obstacle::Obstacle;
use super::types::{AnswerFeedback, GameState, Phase, Score};
use crate::content::{Chapter, Question};

/// Everything a frame needs to draw, borrowed from the state.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub bird_y: f64,
    pub bird_tilt: f64,
    pub wing_frame: u8,
    pub obstacles: &'a [Obstacle],
    pub chapter_index: usize,
    pub chapter_count: usize,
    pub chapter: &'a Chapter,
    /// Question currently being asked or previewed.
    pub question: Option<&'a Question>,
    pub question_index: usize,
    pub feedback: Option<&'a AnswerFeedback>,
    pub display_score: u32,
    pub score: &'a Score,
    /// Seconds left on a timed phase's countdown, rounded up.
    pub countdown_secs: Option<u64>,
    /// How far through a timed phase we are, 0..=1.
    pub phase_progress: Option<f64>,
}

impl<'a> Snapshot<'a> {
    pub fn capture(state: &'a GameState, now_ms: u64) -> Self {
        Self {
            phase: state.phase,
            bird_y: state.bird.y,
            bird_tilt: state.bird.tilt_degrees(),
            wing_frame: state.bird.animation_frame,
            obstacles: &state.obstacles,
            chapter_index: state.chapter_index,
            chapter_count: state.chapters.len(),
            chapter: state.current_chapter(),
            question: state.current_question(),
            question_index: state.question_index,
            feedback: state.last_feedback.as_ref(),
            display_score: state.display_score,
            score: &state.score,
            countdown_secs: timed_phase(state, now_ms).map(|(_, left)| left.div_ceil(1000)),
            phase_progress: timed_phase(state, now_ms)
                .map(|(duration, left)| 1.0 - left as f64 / duration.max(1) as f64),
        }
    }

    /// Fraction of the chapter's questions already behind the bird.
    pub fn chapter_progress(&self) -> f64 {
        let total = self.chapter.questions.len();
        if total == 0 {
            return 1.0;
        }
        self.question_index.min(total) as f64 / total as f64
    }
}

/// Duration and milliseconds left for phases that end on a timer.
fn timed_phase(state: &GameState, now_ms: u64) -> Option<(u64, u64)> {
    let duration = match state.phase {
        Phase::ChapterIntro { .. } => state.config.chapter_intro_ms,
        Phase::AutoFly { .. } => state.config.auto_fly_ms,
        Phase::QuestionPreview { .. } => state.config.question_preview_ms,
        _ => return None,
    };
    let since = state.phase.since_ms()?;
    Some((duration, duration.saturating_sub(now_ms.saturating_sub(since))))
}
