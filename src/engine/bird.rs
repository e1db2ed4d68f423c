//! Bird state and physics: gravity integration, jump impulses with a
//! cooldown, idle hovering and the scripted auto-flight path.

use std::f64::consts::TAU;

use super::config::EngineConfig;
use super::constants::{
    BAND_BOTTOM, BAND_TOP, BIRD_HEIGHT, BIRD_START_Y, FRAME_MS, WING_FRAMES, WING_FRAME_TICKS,
};

/// The player's bird. `y` is the top edge of its bounding box; positive
/// velocity is downward.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub y: f64,
    pub velocity: f64,
    /// Wing animation frame in `0..WING_FRAMES`.
    pub animation_frame: u8,
    /// Timestamp of the last accepted jump.
    pub last_jump_ms: Option<u64>,
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

impl Bird {
    /// A bird at rest in the middle of the band.
    pub fn new() -> Self {
        Self {
            y: BIRD_START_Y,
            velocity: 0.0,
            animation_frame: 0,
            last_jump_ms: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn bottom(&self) -> f64 {
        self.y + BIRD_HEIGHT
    }

    /// True while the whole bird box is inside the legal band.
    pub fn within_band(&self) -> bool {
        self.y >= BAND_TOP && self.bottom() <= BAND_BOTTOM
    }

    /// Nose angle in degrees for drawing: up to 25° up while climbing, up to
    /// 90° down in a dive.
    pub fn tilt_degrees(&self) -> f64 {
        (self.velocity * 4.0).clamp(-25.0, 90.0)
    }

    /// Advance one step of semi-implicit Euler: velocity first, then
    /// position with the new velocity.
    pub fn integrate(&mut self, gravity: f64, dt: f64) {
        self.velocity += gravity * dt;
        self.y += self.velocity * dt;
    }

    /// Apply a jump impulse unless the cooldown since the previous jump is
    /// still running. Returns whether the jump happened.
    pub fn try_jump(&mut self, config: &EngineConfig, now_ms: u64) -> bool {
        if let Some(last) = self.last_jump_ms {
            if now_ms.saturating_sub(last) < config.jump_cooldown_ms {
                return false;
            }
        }
        self.velocity = -config.jump_strength;
        self.last_jump_ms = Some(now_ms);
        true
    }

    /// Idle bobbing around the centre while waiting for the first input.
    pub fn hover(&mut self, elapsed_ms: u64, config: &EngineConfig) {
        let phase = wave_phase(elapsed_ms, config.hover_period_ms);
        self.y = BIRD_START_Y + phase.sin() * config.hover_amplitude;
        self.velocity = 0.0;
    }

    /// Scripted flight used while the first question is previewed. The path
    /// stays well inside the band, so it can never crash.
    pub fn auto_fly(&mut self, elapsed_ms: u64, config: &EngineConfig) {
        let phase = wave_phase(elapsed_ms, config.auto_fly_period_ms);
        let previous = self.y;
        self.y = BIRD_START_Y + phase.sin() * config.auto_fly_amplitude;
        self.velocity = self.y - previous;
    }

    pub fn flap_wings(&mut self, frame_count: u64) {
        self.animation_frame = ((frame_count / WING_FRAME_TICKS) % WING_FRAMES as u64) as u8;
    }
}

fn wave_phase(elapsed_ms: u64, period_ms: u64) -> f64 {
    if period_ms == 0 {
        return 0.0;
    }
    (elapsed_ms % period_ms) as f64 / period_ms as f64 * TAU
}

/// Elapsed-time factor for a tick: milliseconds since the previous tick in
/// units of one 60 Hz frame, capped at `max`. The first tick counts as one
/// frame.
pub fn frame_factor(last_tick_ms: Option<u64>, now_ms: u64, max: f64) -> f64 {
    match last_tick_ms {
        None => 1.0,
        Some(previous) => (now_ms.saturating_sub(previous) as f64 / FRAME_MS).min(max),
    }
}
