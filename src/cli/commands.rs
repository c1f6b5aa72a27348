//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::io::{self, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::builder::{CupTheme, DrinkBuilder};
use crate::catalog::{IngredientCatalog, JsonCatalog};
use crate::cli::Step;
use crate::config::CupConfig;
use crate::cup::{slots_for_fill_level, CupEvent, Ingredient, IngredientId, LayerSlot};
use crate::error::Result;

/// Replay steps against a fresh session and print the cup.
///
/// Invalid steps abort the replay; a step that fails against the cup (an
/// unknown id, a bad position) is reported and skipped, the way the
/// builder page ignores a bad click.
pub fn simulate(
    config_path: Option<&Path>,
    catalog_path: &Path,
    steps: &[String],
    json: bool,
) -> Result<()> {
    let config = CupConfig::load(config_path)?;
    let catalog = JsonCatalog::from_path(catalog_path)?;
    let steps = steps
        .iter()
        .map(|raw| raw.parse::<Step>())
        .collect::<Result<Vec<_>>>()?;

    let mut builder = DrinkBuilder::new(config)?;
    let mut out = io::stdout().lock();

    for step in steps {
        let result = match step {
            Step::Add(id) => catalog.require(id).and_then(|i| builder.add(i)),
            Step::Remove(position) => builder.remove(position).map(|(_, event)| event),
            Step::Clear => Ok(builder.clear_all()),
        };

        match result {
            Ok(event) => {
                if !json {
                    writeln!(out, "{}", describe_event(&event))?;
                }
            }
            Err(e) => {
                warn!("Step {step:?} skipped: {e}");
                if !json {
                    writeln!(out, "skipped {step:?}: {e}")?;
                }
            }
        }
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(builder.snapshot())?)?;
        return Ok(());
    }

    writeln!(out)?;
    for line in draw_cup(builder.snapshot(), builder.selected()) {
        writeln!(out, "{line}")?;
    }
    writeln!(
        out,
        "{} of {} slots filled, nominal fill level {:.0}%, total {:.2} kr",
        builder.store().occupied(),
        builder.store().capacity(),
        builder.fill_level(),
        builder.total_price()
    )?;

    info!(session_id = %builder.session_id(), "Simulation finished");
    Ok(())
}

/// Print catalog ingredients grouped by category.
pub fn list_catalog(catalog_path: &Path) -> Result<()> {
    let catalog = JsonCatalog::from_path(catalog_path)?;
    let mut out = io::stdout().lock();

    for (category, ingredients) in catalog.by_category() {
        writeln!(out, "{category}")?;
        for ingredient in ingredients {
            let id = ingredient
                .id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());
            let level = ingredient
                .fill_level
                .map(|level| format!("{level}%"))
                .unwrap_or_else(|| "?".to_string());
            writeln!(
                out,
                "  [{id:>3}] {:<24} {:>5} {:>8.2} kr {}",
                ingredient.display_name(),
                level,
                ingredient.unit_price,
                ingredient.color.as_deref().unwrap_or("-"),
            )?;
        }
    }

    Ok(())
}

/// Print the preset cup themes.
pub fn list_themes() -> Result<()> {
    let mut out = io::stdout().lock();
    for theme in CupTheme::presets() {
        writeln!(
            out,
            "{:<14} lid {}  cup {}  straw {}",
            theme.name, theme.lid, theme.cup, theme.straw
        )?;
    }
    Ok(())
}

/// Print the slot count for a fill level.
pub fn show_slots(config_path: Option<&Path>, fill_level: f64) -> Result<()> {
    let config = CupConfig::load(config_path)?;
    let slots = slots_for_fill_level(fill_level, config.capacity);
    println!(
        "{fill_level}% fills {slots} of {} slots ({} claimable)",
        config.capacity,
        slots.min(config.capacity)
    );
    Ok(())
}

/// One-line summary of a store event.
pub fn describe_event(event: &CupEvent) -> String {
    match event {
        CupEvent::Filled(outcome) => format!(
            "filled {} slot(s) with ingredient {}: {:?}",
            outcome.filled.len(),
            outcome.ingredient,
            outcome.filled
        ),
        CupEvent::Drained(outcome) => format!(
            "drained {} slot(s) of ingredient {}, {} band(s) fell",
            outcome.cleared.len(),
            outcome.ingredient,
            outcome.moved.len()
        ),
        CupEvent::Reset(outcome) => format!("reset, {} slot(s) cleared", outcome.cleared.len()),
    }
}

/// Text drawing of the cup, rim first.
///
/// Each row is labelled with the drawing element number (`Fill-N`) and the
/// name of the ingredient occupying it.
pub fn draw_cup(slots: &[LayerSlot], ingredients: &[Ingredient]) -> Vec<String> {
    let capacity = slots.len();
    let name_of = |layer_id: IngredientId| {
        ingredients
            .iter()
            .find(|i| i.id == Some(layer_id))
            .map(Ingredient::display_name)
            .unwrap_or("?")
    };

    let mut lines: Vec<String> = slots
        .iter()
        .enumerate()
        .map(|(index, slot)| match slot {
            Some(layer) => format!(
                "{:>3} |{:#^12}| {} ({})",
                capacity - index,
                "",
                name_of(layer.ingredient),
                layer.color
            ),
            None => format!("{:>3} |{:^12}|", capacity - index, ""),
        })
        .collect();
    lines.push(format!("    +{:-^12}+", ""));
    lines
}
