//! Loop driver: owns the state, a clock and an RNG, and applies queued
//! input at tick boundaries.
//!
//! Input handlers never touch the state directly. They call
//! [`GameLoop::queue_input`], and the next [`GameLoop::step`] applies every
//! queued action before advancing time, so one tick sees a consistent world.

use rand::Rng;
use tracing::{debug, warn};

use super::clock::Clock;
use super::events::GameEvent;
use super::logic;
use super::snapshot::Snapshot;
use super::summary::{summarize, GameSummary};
use super::types::{GameState, Phase};

/// Ticks that arrive later than this are logged as a stall.
const STALL_WARN_MS: u64 = 250;

pub struct GameLoop<C: Clock, R: Rng> {
    state: GameState,
    clock: C,
    rng: R,
    pending_inputs: u32,
    running: bool,
}

impl<C: Clock, R: Rng> GameLoop<C, R> {
    pub fn new(state: GameState, clock: C, rng: R) -> Self {
        Self {
            state,
            clock,
            rng,
            pending_inputs: 0,
            running: true,
        }
    }

    /// Record one primary action for the next tick.
    pub fn queue_input(&mut self) {
        if self.running {
            self.pending_inputs += 1;
        }
    }

    /// Apply queued input, then advance the game to the clock's current
    /// time. Does nothing once stopped.
    pub fn step(&mut self) -> Vec<GameEvent> {
        if !self.running {
            return Vec::new();
        }
        let now = self.clock.now_ms();
        if let Some(last) = self.state.last_tick_ms {
            let gap = now.saturating_sub(last);
            if gap > STALL_WARN_MS && self.state.phase.allows_flight() {
                warn!(gap_ms = gap, "Game loop behind schedule, clamping step");
            }
        }

        let mut events = Vec::new();
        let inputs = std::mem::take(&mut self.pending_inputs);
        for _ in 0..inputs {
            events.extend(logic::process_input(&mut self.state, now));
        }
        events.extend(logic::process_tick(&mut self.state, now, &mut self.rng));
        events
    }

    /// Leave `Loading`. Call once content is in place.
    pub fn finish_loading(&mut self) -> Vec<GameEvent> {
        let now = self.clock.now_ms();
        logic::finish_loading(&mut self.state, now)
    }

    /// Stop ticking. Further input and steps are ignored.
    pub fn stop(&mut self) {
        if self.running {
            debug!(phase = self.state.phase.name(), "Game loop stopped");
        }
        self.running = false;
        self.pending_inputs = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::capture(&self.state, self.clock.now_ms())
    }

    /// Summary of the run so far.
    pub fn summary(&self) -> GameSummary {
        summarize(&self.state, self.state.phase == Phase::GameComplete)
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample_chapters;
    use crate::engine::clock::ManualClock;
    use crate::engine::config::EngineConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn game_loop() -> GameLoop<ManualClock, ChaCha8Rng> {
        let state = GameState::new(sample_chapters(), EngineConfig::default()).unwrap();
        GameLoop::new(state, ManualClock::new(0), ChaCha8Rng::seed_from_u64(1))
    }

    #[test]
    fn test_input_applies_on_next_step() {
        let mut game = game_loop();
        game.finish_loading();
        game.clock_mut().set(3000);
        game.step();
        assert!(matches!(game.state().phase, Phase::ReadyToPlay { .. }));

        game.queue_input();
        assert!(matches!(game.state().phase, Phase::ReadyToPlay { .. }));
        game.clock_mut().advance(16);
        game.step();
        assert!(matches!(game.state().phase, Phase::AutoFly { .. }));
    }

    #[test]
    fn test_stop_halts_everything() {
        let mut game = game_loop();
        game.finish_loading();
        game.stop();
        assert!(!game.is_running());
        game.queue_input();
        game.clock_mut().advance(10_000);
        assert!(game.step().is_empty());
        assert!(matches!(game.state().phase, Phase::ChapterIntro { .. }));
    }

    #[test]
    fn test_summary_not_completed_mid_run() {
        let mut game = game_loop();
        game.finish_loading();
        let summary = game.summary();
        assert!(!summary.completed);
        assert_eq!(summary.score.total_questions, 8);
    }
}
