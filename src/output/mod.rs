//! Output module
//!
//! Renders the harvested cards to a writer.
//!
//! # Formats
//!
//! - `pretty` - one `Name: .. - Colors: [..] - Rarity: .. - Set: ..` line per card
//! - `json` - one JSON object per line

mod writer;

pub use writer::{CardWriter, OutputFormat, NO_CARDS_MESSAGE};
