//! Ballot Bird - a ballot-measure quiz played as a terminal flying game.
//!
//! This module exposes the game logic for testing and external use.

pub mod audio;
pub mod build_info;
pub mod cli;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod logging;
pub mod results;
pub mod ui;
pub mod utils;
