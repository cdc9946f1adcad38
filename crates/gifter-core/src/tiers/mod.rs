//! Tier table.
//!
//! The table is the single source of truth for tier names and coin
//! thresholds. Nothing else in the crate hardcodes a threshold.

mod definition;
mod table;

pub use definition::TierDefinition;
pub use table::{
    reference_tiers, TierTable, BOUNDED_GROWTH_FACTOR, DIAMOND_BASE_COST, DIAMOND_GROWTH_FACTOR,
    DIAMOND_UNLOCK_COINS, LEVELS_PER_TIER, MAX_LEVELS_PER_TIER,
};
