//! Quiz content: chapter records, the built-in sample set and the suppliers
//! that produce chapters before a game starts.
//!
//! The engine only ever sees a validated, non-empty `Vec<Chapter>`.

pub mod sample;
pub mod supplier;
pub mod types;

pub use sample::sample_chapters;
pub use supplier::{load_or_fallback, ContentSupplier, FileSupplier, HttpSupplier, SampleSupplier};
pub use types::*;
