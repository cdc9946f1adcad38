//! Tier table inspection commands.

use clap::Subcommand;
use serde::Serialize;

use gifter_core::progression::{diamond_thresholds, level_boundaries};
use gifter_core::{format_coin_amount, tier_coin_range, tier_level_range, TierDefinition};

use super::load_engine;

#[derive(Subcommand)]
pub enum TiersAction {
    /// List tiers
    List {
        /// Viewer's current tier key; hides tiers past the preview window
        #[arg(long)]
        current: Option<String>,
        /// Show every tier regardless of the current tier
        #[arg(long)]
        show_locked: bool,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Show level start thresholds for a tier
    Boundaries {
        /// Tier key (e.g. "starter", "diamond")
        key: String,
        /// Levels to list for the unbounded tier
        #[arg(long, default_value_t = 10)]
        levels: usize,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct LevelRow {
    level: usize,
    start_coins: u64,
}

pub fn run(action: TiersAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TiersAction::List {
            current,
            show_locked,
            json,
        } => list_tiers(current, show_locked, json),
        TiersAction::Boundaries { key, levels, json } => show_boundaries(&key, levels, json),
    }
}

fn list_tiers(
    current: Option<String>,
    show_locked: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, engine) = load_engine()?;
    let table = engine.table();

    let tiers: Vec<&TierDefinition> = match current {
        Some(key) => table.visible_tiers(&key, show_locked, config.display.preview_tiers_ahead),
        None => table.tiers().iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tiers)?);
        return Ok(());
    }

    for tier in tiers {
        println!(
            "{:>2}. {} {:<12} {:<16} levels {}",
            tier.order,
            tier.icon,
            tier.name,
            tier_coin_range(tier),
            tier_level_range(tier)
        );
    }
    Ok(())
}

fn show_boundaries(key: &str, levels: usize, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_, engine) = load_engine()?;
    let table = engine.table();
    let tier = table
        .by_key(key)
        .ok_or_else(|| format!("unknown tier: {key}"))?;

    let starts = match (tier.end, tier.level_count) {
        (Some(end), Some(count)) => {
            let mut boundaries = level_boundaries(tier.start, end, tier.growth_factor, count);
            // The last boundary is the next tier's start, not a level.
            boundaries.pop();
            boundaries
        }
        _ => diamond_thresholds(
            tier.start,
            table.diamond_base_cost(),
            tier.growth_factor,
            levels,
        ),
    };

    let rows: Vec<LevelRow> = starts
        .into_iter()
        .enumerate()
        .map(|(i, start_coins)| LevelRow {
            level: i + 1,
            start_coins,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{} {} ({})", tier.icon, tier.name, tier_coin_range(tier));
    for row in rows {
        println!(
            "  Level {:>3}: {:>14} ({})",
            row.level,
            row.start_coins,
            format_coin_amount(row.start_coins)
        );
    }
    Ok(())
}
