//! Gifter status orchestration.
//!
//! [`GifterEngine`] combines the pure progression with the viewer gating into
//! a single [`GifterStatus`]. Computation never fails: malformed spend values
//! degrade to the first tier at level 1.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::TierTableError;
use crate::gating::{compute_gating, Gating, RevealPolicy, ViewerContext};
use crate::progression::{compute_progression, normalize_coins, Progression};
use crate::tiers::TierTable;

/// Everything a client needs to render a gifter badge and progress bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GifterStatus {
    pub tier_key: String,
    pub tier_name: String,
    pub tier_color: String,
    pub tier_icon: String,
    pub tier_order: u32,
    pub is_diamond: bool,
    pub tier_level_max: Option<u32>,
    pub level_in_tier: u32,
    pub level: u64,
    pub lifetime_coins: u64,
    pub tier_start_coins: u64,
    pub tier_end_coins: Option<u64>,
    pub level_start_coins: u64,
    pub next_level_coins: Option<u64>,
    /// Progress toward the next level, in `[0, 1]`
    pub progress_pct: f64,
    pub show_locked_tiers: bool,
    pub locked_reason: Option<String>,
}

impl GifterStatus {
    pub fn from_parts(progression: Progression, gating: Gating) -> Self {
        Self {
            tier_key: progression.tier_key,
            tier_name: progression.tier_name,
            tier_color: progression.tier_color,
            tier_icon: progression.tier_icon,
            tier_order: progression.tier_order,
            is_diamond: progression.is_diamond,
            tier_level_max: progression.tier_level_max,
            level_in_tier: progression.level_in_tier,
            level: progression.level,
            lifetime_coins: progression.lifetime_coins,
            tier_start_coins: progression.tier_start_coins,
            tier_end_coins: progression.tier_end_coins,
            level_start_coins: progression.level_start_coins,
            next_level_coins: progression.next_level_coins,
            progress_pct: progression.progress_pct,
            show_locked_tiers: gating.show_locked_tiers,
            locked_reason: gating.locked_reason,
        }
    }
}

/// A tier table plus the reveal policy applied on top of it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GifterEngine {
    table: TierTable,
    reveal: RevealPolicy,
}

impl GifterEngine {
    /// Build an engine, checking the reveal policy against the table.
    pub fn new(table: TierTable, reveal: RevealPolicy) -> Result<Self, TierTableError> {
        reveal.validate(&table)?;
        Ok(Self { table, reveal })
    }

    pub fn table(&self) -> &TierTable {
        &self.table
    }

    pub fn reveal(&self) -> &RevealPolicy {
        &self.reveal
    }

    /// Compute the status for a raw spend value.
    ///
    /// Negative, fractional and non-finite values are normalized first.
    pub fn compute(&self, raw_lifetime_coins: f64, viewer: &ViewerContext) -> GifterStatus {
        let coins = normalize_coins(raw_lifetime_coins);
        if !raw_lifetime_coins.is_finite() || raw_lifetime_coins < 0.0 {
            tracing::warn!(
                raw = raw_lifetime_coins,
                "invalid lifetime coin value normalized to 0"
            );
        }
        self.compute_coins(coins, viewer)
    }

    /// Compute the status for a whole coin total.
    pub fn compute_coins(&self, lifetime_coins: u64, viewer: &ViewerContext) -> GifterStatus {
        let progression = self.progression(lifetime_coins);
        let gating = self.gating(&progression, viewer);
        GifterStatus::from_parts(progression, gating)
    }

    pub fn progression(&self, lifetime_coins: u64) -> Progression {
        compute_progression(&self.table, lifetime_coins)
    }

    pub fn gating(&self, progression: &Progression, viewer: &ViewerContext) -> Gating {
        compute_gating(&self.table, &self.reveal, progression, viewer)
    }

    /// Compute statuses for many `(id, lifetime_coins)` pairs seen by the
    /// same viewer. Repeated ids keep the last value.
    pub fn compute_many<I, K>(&self, entries: I, viewer: &ViewerContext) -> BTreeMap<String, GifterStatus>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        let mut coins_by_id = BTreeMap::new();
        for (id, coins) in entries {
            coins_by_id.insert(id.into(), coins);
        }
        coins_by_id
            .into_iter()
            .map(|(id, coins)| (id, self.compute_coins(coins, viewer)))
            .collect()
    }
}

/// Process-wide engine with the reference configuration.
pub fn default_engine() -> &'static GifterEngine {
    static ENGINE: OnceLock<GifterEngine> = OnceLock::new();
    ENGINE.get_or_init(GifterEngine::default)
}

/// Compute a status with the reference configuration.
pub fn gifter_status(raw_lifetime_coins: f64, viewer: &ViewerContext) -> GifterStatus {
    default_engine().compute(raw_lifetime_coins, viewer)
}
