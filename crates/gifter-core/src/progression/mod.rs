//! Pure progression math: tier, level and progress for a coin total.
//!
//! Nothing here depends on who is looking. Viewer-dependent gating lives in
//! [`crate::gating`].

mod boundaries;
mod diamond;

pub use boundaries::{level_boundaries, locate_level};
pub use diamond::{diamond_level, diamond_thresholds, DiamondCosts, DiamondLevel};

use serde::{Deserialize, Serialize};

use crate::tiers::{TierDefinition, TierTable};

/// A level and the coin thresholds around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpan {
    pub level: u32,
    pub level_start: u64,
    pub next_level: Option<u64>,
}

/// Tier, level and progress for one lifetime coin total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    /// Position of the active tier in the table (0-based)
    pub tier_index: usize,
    pub tier_key: String,
    pub tier_name: String,
    pub tier_color: String,
    pub tier_icon: String,
    pub tier_order: u32,
    pub is_diamond: bool,
    /// Level count of a bounded tier, `None` for the unbounded tier
    pub tier_level_max: Option<u32>,
    /// Level reached within the tier (1-based)
    pub level_in_tier: u32,
    /// Level across all tiers
    pub level: u64,
    pub lifetime_coins: u64,
    pub tier_start_coins: u64,
    pub tier_end_coins: Option<u64>,
    pub level_start_coins: u64,
    pub next_level_coins: Option<u64>,
    /// Fraction of the way from `level_start_coins` to `next_level_coins`
    pub progress_pct: f64,
}

/// Normalize a raw spend value to whole, non-negative coins.
///
/// NaN, infinities and negatives become 0. Fractions are floored and values
/// past `u64::MAX` saturate.
pub fn normalize_coins(raw: f64) -> u64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    raw.floor() as u64
}

/// Level span of `coins` within a bounded tier.
pub fn bounded_level(tier: &TierDefinition, coins: u64) -> LevelSpan {
    let end = tier.end.unwrap_or(tier.start);
    let boundaries = level_boundaries(
        tier.start,
        end,
        tier.growth_factor,
        tier.level_count.unwrap_or(1),
    );
    let level = locate_level(coins, &boundaries);
    LevelSpan {
        level,
        level_start: boundaries[level as usize - 1],
        next_level: boundaries.get(level as usize).copied(),
    }
}

/// Fraction of progress from `level_start` to `next_level`, clamped to
/// `[0, 1]`. Zero when there is no next level or the span is empty.
pub fn progress_fraction(coins: u64, level_start: u64, next_level: Option<u64>) -> f64 {
    let Some(next) = next_level else {
        return 0.0;
    };
    if next <= level_start {
        return 0.0;
    }
    let denom = (next - level_start) as f64;
    let done = coins.saturating_sub(level_start) as f64;
    (done / denom).clamp(0.0, 1.0)
}

/// Compute the progression for an already normalized coin total.
pub fn compute_progression(table: &TierTable, lifetime_coins: u64) -> Progression {
    let (tier_index, tier) = table.select(lifetime_coins);

    let span = if tier.is_unbounded() {
        let d = diamond_level(
            lifetime_coins,
            tier.start,
            table.diamond_base_cost(),
            tier.growth_factor,
        );
        LevelSpan {
            level: d.level,
            level_start: d.level_start,
            next_level: d.next_level,
        }
    } else {
        bounded_level(tier, lifetime_coins)
    };

    let progress_pct = progress_fraction(lifetime_coins, span.level_start, span.next_level);
    let level = table
        .levels_before(tier_index)
        .saturating_add(u64::from(span.level));

    tracing::debug!(
        lifetime_coins,
        tier = %tier.key,
        level_in_tier = span.level,
        progress_pct,
        "computed gifter progression"
    );

    Progression {
        tier_index,
        tier_key: tier.key.clone(),
        tier_name: tier.name.clone(),
        tier_color: tier.color.clone(),
        tier_icon: tier.icon.clone(),
        tier_order: tier.order,
        is_diamond: tier.is_unbounded(),
        tier_level_max: tier.level_count,
        level_in_tier: span.level,
        level,
        lifetime_coins,
        tier_start_coins: tier.start,
        tier_end_coins: tier.end,
        level_start_coins: span.level_start,
        next_level_coins: span.next_level,
        progress_pct,
    }
}
