//! Utility modules.

pub mod persistence;
