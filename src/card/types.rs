//! Card types and decoding

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single card as returned by the `/cards` endpoint
///
/// Only the fields needed by the transforms are kept; the rest of the
/// payload is ignored during decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card name
    pub name: String,
    /// Card colors, e.g. `["Red", "Blue"]`. Colorless cards have none.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Rarity, e.g. `"Uncommon"`
    #[serde(default)]
    pub rarity: String,
    /// Set code, e.g. `"KTK"`
    #[serde(default)]
    pub set: String,
}

impl Card {
    /// Create a card
    pub fn new(
        name: impl Into<String>,
        colors: &[&str],
        rarity: impl Into<String>,
        set: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            colors: colors.iter().map(ToString::to_string).collect(),
            rarity: rarity.into(),
            set: set.into(),
        }
    }

    /// Check if the card carries both colors (case insensitive)
    pub fn has_colors(&self, first: &str, second: &str) -> bool {
        let has = |wanted: &str| self.colors.iter().any(|c| c.eq_ignore_ascii_case(wanted));
        has(first) && has(second)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {} - Colors: [{}] - Rarity: {} - Set: {}",
            self.name,
            self.colors.join(" "),
            self.rarity,
            self.set
        )
    }
}

/// Page envelope: `{"cards": [...]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardList {
    /// Cards on the page
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// Decode a page body into its cards
///
/// A body without a `cards` key decodes to an empty list.
pub fn decode_cards(body: &str) -> Result<Vec<Card>> {
    let list: CardList = serde_json::from_str(body)
        .map_err(|e| Error::decode(format!("could not decode card page: {e}")))?;
    Ok(list.cards)
}
