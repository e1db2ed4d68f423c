//! Integration test: full quiz runs
//!
//! Drives the engine tick by tick with a perfect pilot that teleports the
//! bird into the gap (or chosen slot) of the next obstacle, and checks
//! scoring, phase flow and the one-open-question rule across whole games.

use ballotbird::content::{sample_chapters, Chapter, ContentOrigin, Question};
use ballotbird::engine::constants::{BIRD_HEIGHT, BIRD_START_Y};
use ballotbird::engine::logic::{finish_loading, process_input, process_tick};
use ballotbird::engine::obstacle::ObstacleKind;
use ballotbird::engine::types::ChapterScore;
use ballotbird::engine::{EngineConfig, GameEvent, GameState, Phase};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const TICK_MS: u64 = 16;

fn single_question_chapter() -> Chapter {
    Chapter {
        id: "measures".to_string(),
        number: 1,
        title: "Measures".to_string(),
        subtitle: String::new(),
        description: String::new(),
        questions: vec![Question {
            id: "measures-1".to_string(),
            statement: "Voters can approve a state bond measure directly.".to_string(),
            correct_answer: true,
            feedback_correct: "Right.".to_string(),
            feedback_wrong: "Bonds often go to the ballot.".to_string(),
        }],
        origin: ContentOrigin::File,
    }
}

/// How the pilot answers questions.
#[derive(Clone, Copy)]
enum Answering {
    Correctly,
    AlwaysNo,
}

/// Put the bird at rest in the middle of whatever it has to fly through
/// next.
fn steer(state: &mut GameState, answering: Answering) {
    let next = state.obstacles.iter().find(|o| !o.scored);
    let centre = match next.map(|o| &o.kind) {
        Some(ObstacleKind::Plain {
            gap_top,
            gap_bottom,
        }) => (gap_top + gap_bottom) / 2.0,
        Some(ObstacleKind::Question(gate)) => {
            let yes = match answering {
                Answering::Correctly => state
                    .question_at(gate.question_index)
                    .map_or(true, |q| q.correct_answer),
                Answering::AlwaysNo => false,
            };
            let (top, bottom) = if yes { gate.yes_slot() } else { gate.no_slot() };
            (top + bottom) / 2.0
        }
        None => BIRD_START_Y + BIRD_HEIGHT / 2.0,
    };
    state.bird.y = centre - BIRD_HEIGHT / 2.0;
    state.bird.velocity = 0.0;
}

/// Advance one tick with the pilot flying; returns the tick's events.
fn simulate_tick(
    state: &mut GameState,
    now: &mut u64,
    rng: &mut ChaCha8Rng,
    answering: Answering,
) -> Vec<GameEvent> {
    *now += TICK_MS;
    if state.phase.allows_flight() {
        steer(state, answering);
    }
    process_tick(state, *now, rng)
}

fn summaries(events: &[GameEvent]) -> Vec<&ballotbird::engine::GameSummary> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::GameCompleted(summary) => Some(summary),
            _ => None,
        })
        .collect()
}

// =============================================================================
// End-to-end scenario
// =============================================================================

#[test]
fn test_single_question_chapter_end_to_end() {
    // One obstacle on the field at a time, so no plain is in flight when the
    // preview starts.
    let config = EngineConfig {
        obstacle_spacing: ballotbird::engine::constants::WORLD_WIDTH,
        ..EngineConfig::default()
    };
    let mut state = GameState::new(vec![single_question_chapter()], config).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut now = 0;
    finish_loading(&mut state, now);
    state.phase = Phase::Playing;

    let mut score_at_preview = None;
    let mut events = Vec::new();
    for _ in 0..20_000 {
        let tick_events = simulate_tick(&mut state, &mut now, &mut rng, Answering::Correctly);
        if score_at_preview.is_none() && matches!(state.phase, Phase::QuestionPreview { .. }) {
            score_at_preview = Some(state.display_score);
            assert_eq!(state.obstacles_since_question, 5);
            assert!(state.obstacles.iter().all(|o| o.scored));
        }
        events.extend(tick_events);
        if state.phase == Phase::ChapterComplete {
            break;
        }
        assert!(state.phase.allows_flight(), "pilot crashed: {:?}", state.phase);
    }

    assert_eq!(score_at_preview, Some(5));
    assert!(events.contains(&GameEvent::QuestionSpawned { question_index: 0 }));
    assert!(events.contains(&GameEvent::Answered {
        question_index: 0,
        chose_yes: true,
        correct: true,
        display_score: 10,
    }));
    assert_eq!(state.phase, Phase::ChapterComplete);
    assert_eq!(state.display_score, 10);
    assert_eq!(state.score.chapter(0), ChapterScore { correct: 1, total: 1 });

    let final_events = process_input(&mut state, now + 100);
    assert_eq!(state.phase, Phase::GameComplete);
    let done = summaries(&final_events);
    assert_eq!(done.len(), 1);
    assert!(done[0].completed);
    assert_eq!(done[0].score.total_correct, 1);
    assert_eq!(done[0].score.total_questions, 1);
    assert_eq!(done[0].display_score, 10);
}

#[test]
fn test_restart_from_game_complete() {
    let mut state = GameState::new(sample_chapters(), EngineConfig::default()).unwrap();
    finish_loading(&mut state, 0);
    state.phase = Phase::GameComplete;
    state.chapter_index = 2;
    state.question_index = 3;
    state.display_score = 42;
    state.score.record_correct(0);
    state.score.record_correct(2);
    state.bird.y = 12.0;
    state.bird.velocity = 6.0;

    process_input(&mut state, 1_000);

    assert_eq!(state.phase, Phase::ChapterIntro { since_ms: 1_000 });
    assert_eq!(state.chapter_index, 0);
    assert_eq!(state.question_index, 0);
    assert_eq!(state.display_score, 0);
    assert_eq!(state.score.total_correct, 0);
    assert!(state.score.chapters.iter().all(|c| c.correct == 0));
    assert_eq!(state.score.total_questions, 8);
    assert_eq!(state.bird.y, BIRD_START_Y);
    assert_eq!(state.bird.velocity, 0.0);
}

// =============================================================================
// Whole-game runs over the sample chapters
// =============================================================================

/// Play every chapter from `Loading` to `GameComplete`, pressing the
/// primary action whenever the game waits for it.
fn play_full_game(seed: u64, answering: Answering) -> (GameState, Vec<GameEvent>) {
    let mut state = GameState::new(sample_chapters(), EngineConfig::default()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut now = 0;
    let mut events = finish_loading(&mut state, now);

    for _ in 0..100_000 {
        if matches!(state.phase, Phase::ReadyToPlay { .. } | Phase::ChapterComplete) {
            events.extend(process_input(&mut state, now));
        }
        if state.phase == Phase::GameComplete {
            return (state, events);
        }
        events.extend(simulate_tick(&mut state, &mut now, &mut rng, answering));

        assert!(
            state.unanswered_questions_on_field() <= 1,
            "two open questions at {} ms",
            now
        );
        assert!(
            !matches!(state.phase, Phase::Crashed { .. }),
            "pilot crashed at {} ms",
            now
        );
    }
    panic!("game did not finish; stuck in {:?}", state.phase);
}

#[test]
fn test_full_game_answering_correctly() {
    let (state, events) = play_full_game(42, Answering::Correctly);

    assert_eq!(state.score.total_correct, 8);
    assert_eq!(state.score.total_questions, 8);
    for (i, chapter) in state.chapters.iter().enumerate() {
        assert_eq!(
            state.score.chapter(i),
            ChapterScore {
                correct: chapter.questions.len() as u32,
                total: chapter.questions.len() as u32,
            }
        );
    }

    let answered = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Answered { correct: true, .. }))
        .count();
    assert_eq!(answered, 8);
    let chapters_done = events
        .iter()
        .filter(|e| matches!(e, GameEvent::ChapterCompleted { .. }))
        .count();
    assert_eq!(chapters_done, 3);
    assert_eq!(summaries(&events).len(), 1);
}

#[test]
fn test_full_game_answering_no_scores_only_false_statements() {
    let (state, _) = play_full_game(9, Answering::AlwaysNo);

    let false_statements: u32 = state
        .chapters
        .iter()
        .flat_map(|c| &c.questions)
        .filter(|q| !q.correct_answer)
        .count() as u32;
    assert_eq!(state.score.total_correct, false_statements);
}

#[test]
fn test_each_plain_obstacle_scores_once() {
    let (_, events) = play_full_game(3, Answering::Correctly);

    // displayScore only ever rises by one per pass.
    let mut last = 0;
    for event in &events {
        if let GameEvent::ObstaclePassed { display_score } = event {
            assert_eq!(*display_score, last + 1);
            last = *display_score;
        }
        if let GameEvent::Answered { display_score, .. } = event {
            last = *display_score;
        }
    }
}
