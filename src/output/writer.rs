//! Card writer
//!
//! Writes a finished list of cards in the selected format.

use crate::card::Card;
use crate::error::Result;
use std::io::Write;

/// Printed instead of cards when the list is empty
pub const NO_CARDS_MESSAGE: &str = "No cards for the given option";

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, one line per card
    #[default]
    Pretty,
    /// JSON output (one card per line)
    Json,
}

/// Writes cards to any `Write` destination
#[derive(Debug)]
pub struct CardWriter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> CardWriter<W> {
    /// Create a writer for the given format
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write all cards, returning how many were written
    ///
    /// An empty list produces the no-cards notice instead.
    pub fn write_cards(&mut self, cards: &[Card]) -> Result<usize> {
        if cards.is_empty() {
            writeln!(self.out, "{NO_CARDS_MESSAGE}")?;
            self.out.flush()?;
            return Ok(0);
        }

        for card in cards {
            match self.format {
                OutputFormat::Pretty => writeln!(self.out, "{card}")?,
                OutputFormat::Json => {
                    serde_json::to_writer(&mut self.out, card)?;
                    writeln!(self.out)?;
                }
            }
        }
        self.out.flush()?;

        Ok(cards.len())
    }

    /// Consume the writer, returning the destination
    pub fn into_inner(self) -> W {
        self.out
    }
}
