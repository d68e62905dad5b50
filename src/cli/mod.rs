//! CLI module
//!
//! Command-line interface for a harvest run.
//!
//! # Commands
//!
//! - `set` - All cards sorted by set
//! - `set-rarity` - All cards sorted by set, then rarity
//! - `ktk` - Red and blue Khans of Tarkir cards

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;

#[cfg(test)]
mod tests;
