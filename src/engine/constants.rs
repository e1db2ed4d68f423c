//! Fixed world geometry.
//!
//! The world is a 480×640 portrait playfield in pixel units with the ground
//! strip along the bottom; renderers scale it to whatever surface they have.
//! Velocities and accelerations are expressed per 60 Hz frame.

/// World width.
pub const WORLD_WIDTH: f64 = 480.0;
/// World height, ground included.
pub const WORLD_HEIGHT: f64 = 640.0;
/// Height of the ground strip at the bottom of the world.
pub const GROUND_HEIGHT: f64 = 80.0;

/// Top of the legal vertical band.
pub const BAND_TOP: f64 = 0.0;
/// Bottom of the legal vertical band (top of the ground).
pub const BAND_BOTTOM: f64 = WORLD_HEIGHT - GROUND_HEIGHT;

/// Bird's fixed horizontal position (left edge).
pub const BIRD_X: f64 = 96.0;
pub const BIRD_WIDTH: f64 = 34.0;
pub const BIRD_HEIGHT: f64 = 24.0;

/// Width of every obstacle column.
pub const OBSTACLE_WIDTH: f64 = 64.0;

/// Duration of one reference frame; `dt == 1.0` means exactly this long.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Wing animation cycles through this many frames.
pub const WING_FRAMES: u8 = 3;
/// Ticks each wing frame is held.
pub const WING_FRAME_TICKS: u64 = 6;

/// Vertical position of the bird's top edge when centred in the band.
pub const BIRD_START_Y: f64 = (BAND_TOP + BAND_BOTTOM) / 2.0 - BIRD_HEIGHT / 2.0;
