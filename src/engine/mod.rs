//! The quiz flight engine.
//!
//! A bird flies through scrolling obstacles. Every few plain obstacles a
//! question obstacle appears with a YES slot on top and a NO slot below;
//! flying through a slot answers the current true/false question.
//!
//! The engine is pure state plus functions over it. It never draws, plays
//! sounds or reads the clock itself: the [`driver::GameLoop`] supplies time
//! and input, and callers react to the returned [`GameEvent`]s.

pub mod bird;
pub mod clock;
pub mod collision;
pub mod config;
pub mod constants;
pub mod driver;
pub mod events;
pub mod logic;
pub mod obstacle;
pub mod snapshot;
pub mod summary;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use driver::GameLoop;
pub use events::GameEvent;
pub use snapshot::Snapshot;
pub use summary::{summarize, GameSummary};
pub use types::{GameState, Phase, Score};
