//! Engine tuning: physics, obstacle geometry, phase timing and scoring.

use serde::{Deserialize, Serialize};

use super::constants::{BAND_BOTTOM, BAND_TOP};

/// Tunable engine parameters.
///
/// Every field has a default, so a config file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Physics
    /// Downward acceleration per frame².
    pub gravity: f64,
    /// Upward velocity a jump sets (applied as `-jump_strength`).
    pub jump_strength: f64,
    /// Upper bound on the per-tick elapsed-time factor. Keeps a stalled
    /// frame from moving the bird or obstacles through each other.
    pub max_dt_factor: f64,
    /// Minimum interval between two accepted jumps.
    pub jump_cooldown_ms: u64,

    // Obstacles
    /// Horizontal scroll speed per frame.
    pub scroll_speed: f64,
    /// Height of a plain obstacle's corridor.
    pub pipe_gap: f64,
    /// Minimum distance between a plain gap and either band edge.
    pub gap_margin: f64,
    /// Distance the newest obstacle must travel from the right edge before
    /// another plain obstacle spawns.
    pub obstacle_spacing: f64,
    /// Distance between a question obstacle's slots and the band edges.
    pub question_margin: f64,
    /// Height of the solid divider between the YES and NO slots.
    pub question_divider: f64,
    /// Plain obstacles passed before the next question is previewed.
    pub questions_every: u32,

    // Phase timing
    pub chapter_intro_ms: u64,
    pub auto_fly_ms: u64,
    pub question_preview_ms: u64,
    /// How long answer feedback stays on screen.
    pub feedback_ms: u64,

    // Idle and scripted flight
    pub hover_amplitude: f64,
    pub hover_period_ms: u64,
    pub auto_fly_amplitude: f64,
    pub auto_fly_period_ms: u64,

    // Crash recovery
    /// Obstacles whose left edge is closer than this to the bird are removed
    /// when the player retries after a crash.
    pub clear_buffer: f64,

    // Scoring
    pub pass_points: u32,
    pub correct_bonus: u32,
    pub wrong_penalty: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: 0.45,
            jump_strength: 7.5,
            max_dt_factor: 3.0,
            jump_cooldown_ms: 150,

            scroll_speed: 2.5,
            pipe_gap: 150.0,
            gap_margin: 50.0,
            obstacle_spacing: 220.0,
            question_margin: 40.0,
            question_divider: 60.0,
            questions_every: 5,

            chapter_intro_ms: 3000,
            auto_fly_ms: 4000,
            question_preview_ms: 3000,
            feedback_ms: 2000,

            hover_amplitude: 8.0,
            hover_period_ms: 1200,
            auto_fly_amplitude: 40.0,
            auto_fly_period_ms: 2000,

            clear_buffer: 240.0,

            pass_points: 1,
            correct_bonus: 5,
            wrong_penalty: 2,
        }
    }
}

impl EngineConfig {
    /// Height of each question slot: the band minus margins and divider,
    /// split evenly between YES and NO.
    pub fn slot_height(&self) -> f64 {
        (BAND_BOTTOM - BAND_TOP - 2.0 * self.question_margin - self.question_divider) / 2.0
    }

    /// Reject tunings that would break the geometry invariants (a plain gap
    /// that does not fit, question slots no larger than a plain gap).
    pub fn validate(&self) -> Result<(), String> {
        let band = BAND_BOTTOM - BAND_TOP;
        if self.pipe_gap <= 0.0 || self.pipe_gap + 2.0 * self.gap_margin > band {
            return Err(format!(
                "pipe_gap {} with margin {} does not fit the {} px band",
                self.pipe_gap, self.gap_margin, band
            ));
        }
        if self.slot_height() <= self.pipe_gap {
            return Err(format!(
                "question slots ({:.1} px) must be taller than pipe_gap ({})",
                self.slot_height(),
                self.pipe_gap
            ));
        }
        if self.max_dt_factor <= 0.0 || self.scroll_speed <= 0.0 {
            return Err("max_dt_factor and scroll_speed must be positive".to_string());
        }
        if self.questions_every == 0 {
            return Err("questions_every must be at least 1".to_string());
        }
        Ok(())
    }
}
