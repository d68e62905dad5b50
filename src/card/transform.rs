//! Post-processing transforms over a finished harvest

use super::types::Card;

/// Set code used by the `ktk` mode
pub const KTK_SET: &str = "KTK";

/// Post-processing applied to the harvested cards before display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Ascending by set code
    SortBySet,
    /// Ascending by set code, then rarity
    SortBySetAndRarity,
    /// Keep cards of `set` that have both colors
    FilterBySetAndColors {
        /// Set code to keep
        set: String,
        /// First required color
        first: String,
        /// Second required color
        second: String,
    },
}

impl Transform {
    /// The Khans of Tarkir red and blue filter
    pub fn ktk_red_blue() -> Self {
        Self::FilterBySetAndColors {
            set: KTK_SET.to_string(),
            first: "red".to_string(),
            second: "blue".to_string(),
        }
    }

    /// Apply the transform, consuming the cards
    pub fn apply(&self, mut cards: Vec<Card>) -> Vec<Card> {
        match self {
            Self::SortBySet => {
                sort_by_set(&mut cards);
                cards
            }
            Self::SortBySetAndRarity => {
                sort_by_set_and_rarity(&mut cards);
                cards
            }
            Self::FilterBySetAndColors { set, first, second } => {
                filter_by_set_and_colors(cards, set, first, second)
            }
        }
    }
}

/// Sort cards by set code, ascending
pub fn sort_by_set(cards: &mut [Card]) {
    cards.sort_by(|a, b| a.set.cmp(&b.set));
}

/// Sort cards by set code, then by rarity, ascending
pub fn sort_by_set_and_rarity(cards: &mut [Card]) {
    cards.sort_by(|a, b| a.set.cmp(&b.set).then_with(|| a.rarity.cmp(&b.rarity)));
}

/// Keep the cards of `set` whose colors include both `first` and `second`
pub fn filter_by_set_and_colors(
    cards: Vec<Card>,
    set: &str,
    first: &str,
    second: &str,
) -> Vec<Card> {
    cards
        .into_iter()
        .filter(|c| c.set == set && c.has_colors(first, second))
        .collect()
}
