//! CLI Module
//!
//! Command-line interface for replaying drink builder sessions.

pub mod commands;

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::cup::IngredientId;
use crate::error::CupError;

/// Drømmekopp - replay and inspect drink builder sessions
#[derive(Parser, Debug)]
#[command(name = "drommekopp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay builder steps against a catalog and print the cup
    #[command(name = "simulate")]
    Simulate {
        /// Ingredient catalog (JSON array as served by the backend)
        #[arg(long)]
        catalog: PathBuf,

        /// Print the final cup as JSON instead of a drawing
        #[arg(long)]
        json: bool,

        /// Steps: add:<id>, remove:<position> or clear
        steps: Vec<String>,
    },

    /// List catalog ingredients by category
    #[command(name = "catalog")]
    Catalog {
        /// Ingredient catalog (JSON array as served by the backend)
        #[arg(long)]
        catalog: PathBuf,
    },

    /// List the cup themes
    #[command(name = "themes")]
    Themes,

    /// Show how many slots a fill level occupies
    #[command(name = "slots")]
    Slots {
        /// Fill level in percent
        #[arg(long)]
        fill_level: f64,
    },
}

/// One step of a replayed session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Add the catalog ingredient with this id
    Add(IngredientId),
    /// Remove the list entry at this position
    Remove(usize),
    /// Clear every choice
    Clear,
}

impl FromStr for Step {
    type Err = CupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CupError::InvalidStep {
            input: s.to_string(),
        };

        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("clear") {
            return Ok(Step::Clear);
        }

        let (verb, argument) = trimmed.split_once(':').ok_or_else(invalid)?;
        match verb.to_ascii_lowercase().as_str() {
            "add" => argument
                .parse::<u32>()
                .map(|id| Step::Add(IngredientId(id)))
                .map_err(|_| invalid()),
            "remove" => argument
                .parse::<usize>()
                .map(Step::Remove)
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}
