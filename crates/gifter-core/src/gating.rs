//! Viewer-dependent gating of locked tier detail.
//!
//! Locked tiers are revealed to admins, to anyone in the unbounded tier, and
//! to anyone who has reached a fixed level inside a fixed reveal tier.

use serde::{Deserialize, Serialize};

use crate::error::TierTableError;
use crate::progression::{bounded_level, Progression};
use crate::tiers::TierTable;

/// Tier whose level unlocks locked detail.
pub const REVEAL_TIER_KEY: &str = "mythic";
/// Level within the reveal tier that unlocks locked detail.
pub const REVEAL_MIN_LEVEL: u32 = 40;

/// Who is looking at a status. Absent context means a regular viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerContext {
    #[serde(default)]
    pub is_admin: bool,
}

impl ViewerContext {
    pub fn admin() -> Self {
        Self { is_admin: true }
    }
}

/// Reveal condition: reach `min_level` within the tier named `tier_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealPolicy {
    #[serde(default = "default_reveal_tier")]
    pub tier_key: String,
    #[serde(default = "default_reveal_level")]
    pub min_level: u32,
}

fn default_reveal_tier() -> String {
    REVEAL_TIER_KEY.to_string()
}
fn default_reveal_level() -> u32 {
    REVEAL_MIN_LEVEL
}

impl Default for RevealPolicy {
    fn default() -> Self {
        Self {
            tier_key: default_reveal_tier(),
            min_level: default_reveal_level(),
        }
    }
}

impl RevealPolicy {
    /// Check the reveal tier exists, is bounded, and has `min_level`.
    pub fn validate(&self, table: &TierTable) -> Result<(), TierTableError> {
        let tier = table
            .by_key(&self.tier_key)
            .filter(|t| !t.is_unbounded())
            .ok_or_else(|| TierTableError::UnknownRevealTier(self.tier_key.clone()))?;
        let max = tier.level_count.unwrap_or(0);
        if self.min_level < 1 || self.min_level > max {
            return Err(TierTableError::RevealLevelOutOfRange {
                key: self.tier_key.clone(),
                level: self.min_level,
                max,
            });
        }
        Ok(())
    }

    /// Whether `lifetime_coins` is inside the reveal tier at or past the
    /// reveal level. False anywhere outside that tier.
    pub fn has_reached(&self, table: &TierTable, lifetime_coins: u64) -> bool {
        match table.by_key(&self.tier_key) {
            Some(tier) if tier.contains(lifetime_coins) => {
                bounded_level(tier, lifetime_coins).level >= self.min_level
            }
            _ => false,
        }
    }

    /// Message shown while locked detail is hidden.
    pub fn locked_reason(&self, table: &TierTable) -> String {
        let name = table
            .by_key(&self.tier_key)
            .map(|t| t.name.as_str())
            .unwrap_or(self.tier_key.as_str());
        format!(
            "Reach {} level {} or {} to unlock hidden tiers",
            name,
            self.min_level,
            table.unbounded().name
        )
    }
}

/// Gating decision for one viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gating {
    pub show_locked_tiers: bool,
    /// `None` whenever `show_locked_tiers` is true
    pub locked_reason: Option<String>,
}

/// Decide whether `viewer` may see locked tier detail for `progression`.
pub fn compute_gating(
    table: &TierTable,
    policy: &RevealPolicy,
    progression: &Progression,
    viewer: &ViewerContext,
) -> Gating {
    let reached = policy.has_reached(table, progression.lifetime_coins);
    let show_locked_tiers = viewer.is_admin || progression.is_diamond || reached;
    Gating {
        show_locked_tiers,
        locked_reason: (!show_locked_tiers).then(|| policy.locked_reason(table)),
    }
}
