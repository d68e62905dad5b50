//! Card module
//!
//! The record type harvested from the card API, its JSON decoding, and the
//! post-processing transforms applied once a harvest completes.

mod transform;
mod types;

pub use transform::{
    filter_by_set_and_colors, sort_by_set, sort_by_set_and_rarity, Transform, KTK_SET,
};
pub use types::{decode_cards, Card, CardList};
