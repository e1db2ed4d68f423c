//! Error types shared across the crate.
//!
//! Gameplay failures (crashing into an obstacle, a wrong answer) are not
//! errors: they are phase transitions and score changes inside the engine.
//! The types here cover the things that can genuinely go wrong around it.

use std::io;

/// Failure to obtain usable chapter content from a supplier.
///
/// These never reach the engine: `content::load_or_fallback` logs them and
/// substitutes the built-in sample chapters.
#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("content request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid content: {0}")]
    Invalid(String),
}

/// Configuration errors detected when a game is constructed.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("no chapters were supplied")]
    NoChapters,

    #[error("chapter {index} ({title:?}) has no questions")]
    EmptyChapter { index: usize, title: String },

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}
