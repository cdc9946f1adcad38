//! Gifter status command.

use clap::Args;

use gifter_core::{format_coin_amount, GifterStatus, ViewerContext};

use super::load_engine;

#[derive(Args)]
pub struct StatusArgs {
    /// Lifetime coins gifted (any number; invalid values count as 0)
    #[arg(allow_hyphen_values = true)]
    coins: String,
    /// Compute as an admin viewer
    #[arg(long)]
    admin: bool,
    /// Print JSON instead of a summary
    #[arg(long)]
    json: bool,
}

/// Parse raw coins the way the engine treats them: anything unparsable is NaN
/// and normalizes to 0.
fn parse_coins(raw: &str) -> f64 {
    raw.trim().replace('_', "").parse::<f64>().unwrap_or_else(|_| {
        tracing::warn!(raw, "unparsable coin amount, treating as 0");
        f64::NAN
    })
}

pub fn run(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_, engine) = load_engine()?;
    let viewer = ViewerContext { is_admin: args.admin };
    let status = engine.compute(parse_coins(&args.coins), &viewer);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print_summary(&status, engine.table().tiers().len());
    }
    Ok(())
}

fn print_summary(status: &GifterStatus, tier_count: usize) {
    let level_max = match status.tier_level_max {
        Some(max) => max.to_string(),
        None => "∞".to_string(),
    };
    let next = status
        .next_level_coins
        .map(format_coin_amount)
        .unwrap_or_else(|| "-".to_string());

    println!(
        "Tier:      {} {} ({}/{})",
        status.tier_icon, status.tier_name, status.tier_order, tier_count
    );
    println!(
        "Level:     {}/{} (overall {})",
        status.level_in_tier, level_max, status.level
    );
    println!("Lifetime:  {} coins", status.lifetime_coins);
    println!(
        "Progress:  {} → {} ({:.0}%)",
        format_coin_amount(status.level_start_coins),
        next,
        status.progress_pct * 100.0
    );
    match &status.locked_reason {
        None => println!("Locked tiers: visible"),
        Some(reason) => println!("Locked tiers: hidden ({reason})"),
    }
}
