//! Game logic: the phase state machine that drives physics, obstacle
//! spawning and scoring.
//!
//! Two entry points, both called by the loop driver at a tick boundary:
//! [`process_input`] for the single primary action and [`process_tick`] for
//! time advancing. Both return the events that happened.

use rand::Rng;
use tracing::{debug, info, warn};

use super::bird::frame_factor;
use super::collision::{self, PassedQuestion};
use super::constants::BIRD_X;
use super::events::GameEvent;
use super::obstacle::{plain_obstacle, question_obstacle, spacing_clear, spawn_x, ObstacleKind};
use super::summary::summarize;
use super::types::{GameState, Phase, Score};

/// Leave `Loading` once content and assets are ready.
pub fn finish_loading(state: &mut GameState, now_ms: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == Phase::Loading {
        start_chapter(state, now_ms, &mut events);
    }
    events
}

/// Apply one primary action (tap, click, space).
pub fn process_input(state: &mut GameState, now_ms: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    match state.phase {
        Phase::Loading | Phase::ChapterIntro { .. } | Phase::AutoFly { .. } => {}
        Phase::ReadyToPlay { .. } => {
            enter_phase(state, Phase::AutoFly { since_ms: now_ms }, &mut events);
        }
        Phase::Playing | Phase::QuestionPreview { .. } => {
            if state.bird.try_jump(&state.config, now_ms) {
                events.push(GameEvent::Flapped);
            }
        }
        Phase::Crashed { .. } => retry_after_crash(state, &mut events),
        Phase::ChapterComplete => {
            if state.has_more_chapters() {
                state.chapter_index += 1;
                start_chapter(state, now_ms, &mut events);
            } else {
                enter_phase(state, Phase::GameComplete, &mut events);
            }
        }
        Phase::GameComplete => restart_game(state, now_ms, &mut events),
    }
    events
}

/// Advance the game to `now_ms`.
pub fn process_tick<R: Rng>(state: &mut GameState, now_ms: u64, rng: &mut R) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let dt = frame_factor(state.last_tick_ms, now_ms, state.config.max_dt_factor);
    state.last_tick_ms = Some(now_ms);
    state.frame_count += 1;

    let feedback_expired = state
        .last_feedback
        .as_ref()
        .is_some_and(|f| now_ms.saturating_sub(f.since_ms) >= state.config.feedback_ms);
    if feedback_expired {
        state.last_feedback = None;
    }

    match state.phase {
        Phase::Loading | Phase::Crashed { .. } | Phase::ChapterComplete | Phase::GameComplete => {}
        Phase::ChapterIntro { since_ms } => {
            if now_ms.saturating_sub(since_ms) >= state.config.chapter_intro_ms {
                enter_phase(state, Phase::ReadyToPlay { since_ms: now_ms }, &mut events);
            }
        }
        Phase::ReadyToPlay { since_ms } => {
            state.bird.hover(now_ms.saturating_sub(since_ms), &state.config);
            state.bird.flap_wings(state.frame_count);
        }
        Phase::AutoFly { since_ms } => {
            let elapsed = now_ms.saturating_sub(since_ms);
            if elapsed >= state.config.auto_fly_ms {
                state.bird.velocity = 0.0;
                enter_phase(state, Phase::Playing, &mut events);
                spawn_question(state, &mut events);
            } else {
                state.bird.auto_fly(elapsed, &state.config);
                state.bird.flap_wings(state.frame_count);
            }
        }
        Phase::Playing => {
            step_world(state, dt, now_ms, &mut events);
            if state.phase == Phase::Playing {
                apply_spawn_policy(state, now_ms, rng, &mut events);
            }
        }
        Phase::QuestionPreview { since_ms } => {
            step_world(state, dt, now_ms, &mut events);
            let still_previewing = matches!(state.phase, Phase::QuestionPreview { .. });
            if still_previewing && now_ms.saturating_sub(since_ms) >= state.config.question_preview_ms {
                enter_phase(state, Phase::Playing, &mut events);
                spawn_question(state, &mut events);
            }
        }
    }
    events
}

/// Physics, scrolling, collision and scoring for one tick of flight.
fn step_world(state: &mut GameState, dt: f64, now_ms: u64, events: &mut Vec<GameEvent>) {
    state.bird.integrate(state.config.gravity, dt);
    state.bird.flap_wings(state.frame_count);

    let scroll = state.config.scroll_speed * dt;
    for obstacle in &mut state.obstacles {
        obstacle.x -= scroll;
    }

    if !state.bird.within_band() || collision::check_collisions(state) {
        crash(state, now_ms, events);
        return;
    }

    collision::detect_answers(state, now_ms, events);
    if let Some(passed) = collision::score_passes(state, events) {
        resolve_question(state, passed, events);
    }
    collision::discard_off_screen(state);
}

/// Spawn the next obstacle, or start a question preview once enough plain
/// obstacles have been passed.
fn apply_spawn_policy<R: Rng>(state: &mut GameState, now_ms: u64, rng: &mut R, events: &mut Vec<GameEvent>) {
    let question_due = state.obstacles_since_question >= state.config.questions_every
        && !state.question_active
        && state.current_question().is_some();
    if question_due {
        enter_phase(state, Phase::QuestionPreview { since_ms: now_ms }, events);
        return;
    }

    if state.unanswered_questions_on_field() > 0 {
        return;
    }
    if spacing_clear(&state.obstacles, &state.config) {
        let obstacle = plain_obstacle(spawn_x(), &state.config, rng);
        state.obstacles.push(obstacle);
    }
}

fn spawn_question(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.question_active || state.current_question().is_none() {
        warn!(
            question = state.question_index,
            active = state.question_active,
            "Question spawn skipped"
        );
        return;
    }
    let obstacle = question_obstacle(spawn_x(), state.question_index, &state.config);
    state.obstacles.push(obstacle);
    state.question_active = true;
    debug!(chapter = state.chapter_index, question = state.question_index, "Question spawned");
    events.push(GameEvent::QuestionSpawned {
        question_index: state.question_index,
    });
}

/// Move past a question whose obstacle is behind the bird: reset the plain
/// counter and go to the next question, or finish the chapter.
fn resolve_question(state: &mut GameState, passed: PassedQuestion, events: &mut Vec<GameEvent>) {
    state.obstacles_since_question = 0;
    state.question_active = false;
    events.push(GameEvent::QuestionResolved {
        question_index: passed.question_index,
        answered: passed.answered,
    });
    if !passed.answered {
        info!(question = passed.question_index, "Question passed without an answer");
    }

    let question_count = state.current_chapter().questions.len();
    if passed.question_index + 1 < question_count {
        state.question_index = passed.question_index + 1;
        return;
    }

    state.question_index = question_count;
    let chapter_score = state.score.chapter(state.chapter_index);
    enter_phase(state, Phase::ChapterComplete, events);
    events.push(GameEvent::ChapterCompleted {
        chapter_index: state.chapter_index,
        correct: chapter_score.correct,
        total: chapter_score.total,
    });
}

fn crash(state: &mut GameState, now_ms: u64, events: &mut Vec<GameEvent>) {
    info!(
        y = state.bird.y,
        velocity = state.bird.velocity,
        display_score = state.display_score,
        "Bird crashed"
    );
    enter_phase(state, Phase::Crashed { since_ms: now_ms }, events);
    events.push(GameEvent::Crashed);
}

/// Penalty-free retry: recentre the bird and clear the obstacles around it.
/// Chapter progress and score are kept.
fn retry_after_crash(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.bird.reset();

    let clear_limit = BIRD_X + state.config.clear_buffer;
    let mut requeue_question = false;
    let mut answered_cleared = None;
    state.obstacles.retain(|obstacle| {
        if obstacle.x >= clear_limit {
            return true;
        }
        if let ObstacleKind::Question(gate) = &obstacle.kind {
            if !obstacle.scored && gate.answered() {
                answered_cleared = Some(PassedQuestion {
                    question_index: gate.question_index,
                    answered: true,
                });
            } else if !obstacle.scored {
                requeue_question = true;
            }
        }
        false
    });

    if requeue_question {
        // Offer the same question again through a fresh preview.
        state.question_active = false;
        state.obstacles_since_question = state.config.questions_every;
    }

    enter_phase(state, Phase::Playing, events);
    if let Some(passed) = answered_cleared {
        resolve_question(state, passed, events);
    }
}

/// Reset per-chapter progress and show the chapter intro.
fn start_chapter(state: &mut GameState, now_ms: u64, events: &mut Vec<GameEvent>) {
    state.question_index = 0;
    state.obstacles.clear();
    state.obstacles_since_question = 0;
    state.question_active = false;
    state.last_feedback = None;
    state.bird.reset();
    info!(
        chapter = state.chapter_index,
        title = %state.current_chapter().title,
        "Starting chapter"
    );
    enter_phase(state, Phase::ChapterIntro { since_ms: now_ms }, events);
}

/// Full restart from the first chapter with a fresh score.
fn restart_game(state: &mut GameState, now_ms: u64, events: &mut Vec<GameEvent>) {
    state.chapter_index = 0;
    state.score = Score::new(&state.chapters);
    state.display_score = 0;
    start_chapter(state, now_ms, events);
}

fn enter_phase(state: &mut GameState, next: Phase, events: &mut Vec<GameEvent>) {
    let from = state.phase;
    state.phase = next;
    debug!(from = from.name(), to = next.name(), "Phase transition");
    events.push(GameEvent::PhaseChanged { from, to: next });

    if next == Phase::GameComplete {
        let summary = summarize(state, true);
        info!(
            total_correct = summary.score.total_correct,
            total_questions = summary.score.total_questions,
            display_score = summary.display_score,
            "Game complete"
        );
        events.push(GameEvent::GameCompleted(summary));
    }
}
