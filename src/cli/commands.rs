//! CLI commands and argument parsing

use crate::card::Transform;
use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Harvest every card from the Magic: The Gathering API
#[derive(Parser, Debug)]
#[command(name = "mtg-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API root, overrides the configuration file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Maximum pages fetched per tick
    #[arg(long, global = true)]
    pub max_burst: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long, global = true)]
    pub tick_ms: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// All cards sorted by set
    Set,

    /// All cards sorted by set, then rarity
    SetRarity,

    /// Khans of Tarkir cards that are both red and blue
    Ktk,
}

impl Commands {
    /// Post-processing for this mode
    pub fn transform(self) -> Transform {
        match self {
            Self::Set => Transform::SortBySet,
            Self::SetRarity => Transform::SortBySetAndRarity,
            Self::Ktk => Transform::ktk_red_blue(),
        }
    }
}
