//! Terminal presentation.

pub mod game_common;
pub mod quiz_scene;

pub use quiz_scene::render_quiz;
