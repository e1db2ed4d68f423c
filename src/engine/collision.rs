//! Collision tests, answer detection and pass-through scoring.
//!
//! Answering and passing are separate reward channels: an answer earns the
//! bonus (or costs the penalty), a plain pass earns a point, and passing a
//! question obstacle only moves the run on to the next question.

use tracing::{debug, info};

use super::bird::Bird;
use super::constants::{BIRD_WIDTH, BIRD_X};
use super::events::GameEvent;
use super::obstacle::{Obstacle, ObstacleKind, QuestionGate};
use super::types::{AnswerFeedback, GameState};

/// A question obstacle that was passed this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassedQuestion {
    pub question_index: usize,
    pub answered: bool,
}

/// Bird box and obstacle column overlap on the x axis.
pub fn overlaps_horizontally(obstacle: &Obstacle) -> bool {
    BIRD_X + BIRD_WIDTH > obstacle.x && BIRD_X < obstacle.right()
}

/// Bird box overlaps any solid part of the obstacle.
pub fn hits_solid(bird: &Bird, obstacle: &Obstacle) -> bool {
    overlaps_horizontally(obstacle)
        && obstacle
            .solid_spans()
            .iter()
            .any(|&(top, bottom)| bird.y < bottom && bird.bottom() > top)
}

/// Which slot the bird sits entirely inside, `Some(true)` for YES.
pub fn chosen_slot(bird: &Bird, gate: &QuestionGate) -> Option<bool> {
    let inside = |(top, bottom): (f64, f64)| bird.y >= top && bird.bottom() <= bottom;
    if inside(gate.yes_slot()) {
        Some(true)
    } else if inside(gate.no_slot()) {
        Some(false)
    } else {
        None
    }
}

/// True if the bird touches any obstacle's solid region.
pub fn check_collisions(state: &GameState) -> bool {
    state
        .obstacles
        .iter()
        .any(|obstacle| hits_solid(&state.bird, obstacle))
}

/// Lock in the answer for an unanswered question obstacle the bird has
/// flown into, and score it.
pub fn detect_answers(state: &mut GameState, now_ms: u64, events: &mut Vec<GameEvent>) {
    let entered = state.obstacles.iter().enumerate().find_map(|(i, obstacle)| {
        match &obstacle.kind {
            ObstacleKind::Question(gate) if !gate.answered() && overlaps_horizontally(obstacle) => {
                chosen_slot(&state.bird, gate).map(|choice| (i, gate.question_index, choice))
            }
            _ => None,
        }
    });
    let Some((obstacle_index, question_index, chose_yes)) = entered else {
        return;
    };

    if let ObstacleKind::Question(gate) = &mut state.obstacles[obstacle_index].kind {
        gate.answer = Some(chose_yes);
    }

    let Some(question) = state.question_at(question_index) else {
        return;
    };
    let correct = chose_yes == question.correct_answer;
    let feedback = question.feedback(correct).to_string();

    if correct {
        state.score.record_correct(state.chapter_index);
        state.display_score += state.config.correct_bonus;
    } else {
        state.display_score = state.display_score.saturating_sub(state.config.wrong_penalty);
    }
    state.last_feedback = Some(AnswerFeedback {
        correct,
        text: feedback,
        since_ms: now_ms,
    });

    info!(
        chapter = state.chapter_index,
        question = question_index,
        chose_yes,
        correct,
        display_score = state.display_score,
        "Question answered"
    );
    events.push(GameEvent::Answered {
        question_index,
        chose_yes,
        correct,
        display_score: state.display_score,
    });
}

/// Credit obstacles whose right edge is now behind the bird. Each obstacle
/// is credited at most once. Returns the question obstacle passed this tick,
/// if any; resolving it is up to the phase machine.
pub fn score_passes(state: &mut GameState, events: &mut Vec<GameEvent>) -> Option<PassedQuestion> {
    let mut passed_question = None;
    for obstacle in &mut state.obstacles {
        if obstacle.scored || obstacle.right() >= BIRD_X {
            continue;
        }
        obstacle.passed = true;
        obstacle.scored = true;
        match &obstacle.kind {
            ObstacleKind::Plain { .. } => {
                state.display_score += state.config.pass_points;
                state.obstacles_since_question += 1;
                debug!(
                    display_score = state.display_score,
                    since_question = state.obstacles_since_question,
                    "Obstacle passed"
                );
                events.push(GameEvent::ObstaclePassed {
                    display_score: state.display_score,
                });
            }
            ObstacleKind::Question(gate) => {
                passed_question = Some(PassedQuestion {
                    question_index: gate.question_index,
                    answered: gate.answered(),
                });
            }
        }
    }
    passed_question
}

/// Drop obstacles that have scrolled fully off the left edge.
pub fn discard_off_screen(state: &mut GameState) {
    state.obstacles.retain(|o| !o.off_screen());
}
