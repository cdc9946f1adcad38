//! The ordered tier table and the reference configuration.

use std::collections::HashSet;

use super::TierDefinition;
use crate::error::TierTableError;

/// Lifetime coins at which the terminal tier begins.
pub const DIAMOND_UNLOCK_COINS: u64 = 60_000_000;
/// Cost of the first level of the terminal tier.
pub const DIAMOND_BASE_COST: u64 = 3_000_000;
/// Growth of the per-level cost in the terminal tier.
pub const DIAMOND_GROWTH_FACTOR: f64 = 1.45;
/// Levels in every bounded reference tier.
pub const LEVELS_PER_TIER: u32 = 50;
/// Level width growth in every bounded reference tier.
pub const BOUNDED_GROWTH_FACTOR: f64 = 1.1;
/// Upper limit on a bounded tier's level count.
pub const MAX_LEVELS_PER_TIER: u32 = 10_000;

/// The reference tiers, in order.
pub fn reference_tiers() -> Vec<TierDefinition> {
    let bounded = |key: &str, name: &str, start: u64, end: u64| {
        TierDefinition::bounded(key, name, start, end, BOUNDED_GROWTH_FACTOR, LEVELS_PER_TIER)
    };

    let mut tiers = vec![
        bounded("starter", "Starter", 0, 60_000).with_badge("#9CA3AF", "🌱"),
        bounded("supporter", "Supporter", 60_000, 300_000).with_badge("#CD7F32", "🤝"),
        bounded("contributor", "Contributor", 300_000, 900_000).with_badge("#C0C0C0", "⭐"),
        bounded("elite", "Elite", 900_000, 2_400_000).with_badge("#D4AF37", "👑"),
        bounded("patron", "Patron", 2_400_000, 6_000_000).with_badge("#22C55E", "🏆"),
        bounded("power", "Power", 6_000_000, 15_000_000).with_badge("#3B82F6", "⚡"),
        bounded("vip", "VIP", 15_000_000, 30_000_000).with_badge("#EF4444", "🔥"),
        bounded("legend", "Legend", 30_000_000, 45_000_000).with_badge("#A855F7", "🌟"),
        bounded("mythic", "Mythic", 45_000_000, DIAMOND_UNLOCK_COINS).with_badge("#111827", "🔮"),
        TierDefinition::unbounded("diamond", "Diamond", DIAMOND_UNLOCK_COINS, DIAMOND_GROWTH_FACTOR)
            .with_badge("#22D3EE", "💎"),
    ];
    for (index, tier) in tiers.iter_mut().enumerate() {
        tier.order = index as u32 + 1;
    }
    tiers
}

/// Validated, read-only tier configuration.
///
/// A `TierTable` is always non-empty, contiguous from 0, and ends in exactly
/// one unbounded tier. The only way to obtain one is [`TierTable::new`] or
/// [`TierTable::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct TierTable {
    tiers: Vec<TierDefinition>,
    diamond_base_cost: u64,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            tiers: reference_tiers(),
            diamond_base_cost: DIAMOND_BASE_COST,
        }
    }
}

impl TierTable {
    /// Validate `tiers` and build a table. Tier `order` values are renumbered
    /// from position.
    pub fn new(
        mut tiers: Vec<TierDefinition>,
        diamond_base_cost: u64,
    ) -> Result<Self, TierTableError> {
        if tiers.is_empty() {
            return Err(TierTableError::Empty);
        }
        if tiers[0].start != 0 {
            return Err(TierTableError::NotStartingAtZero {
                start: tiers[0].start,
            });
        }
        if diamond_base_cost == 0 {
            return Err(TierTableError::InvalidBaseCost);
        }

        let mut seen = HashSet::new();
        let last = tiers.len() - 1;
        for (index, tier) in tiers.iter().enumerate() {
            if !seen.insert(tier.key.as_str()) {
                return Err(TierTableError::DuplicateKey(tier.key.clone()));
            }
            if !tier.growth_factor.is_finite() || tier.growth_factor <= 1.0 {
                return Err(TierTableError::InvalidGrowthFactor {
                    key: tier.key.clone(),
                    value: tier.growth_factor,
                });
            }

            match (tier.end, tier.level_count) {
                (None, None) if index != last => {
                    return Err(TierTableError::UnboundedNotLast {
                        key: tier.key.clone(),
                    });
                }
                (None, None) => {}
                (Some(end), Some(levels)) if (1..=MAX_LEVELS_PER_TIER).contains(&levels) => {
                    if end <= tier.start {
                        return Err(TierTableError::EmptyRange {
                            key: tier.key.clone(),
                        });
                    }
                    if index == last {
                        return Err(TierTableError::MissingUnboundedTier);
                    }
                }
                _ => {
                    return Err(TierTableError::InvalidLevelCount {
                        key: tier.key.clone(),
                    });
                }
            }

            if index > 0 {
                let expected = tiers[index - 1].end.unwrap_or(u64::MAX);
                if expected != tier.start {
                    return Err(TierTableError::Gap {
                        key: tier.key.clone(),
                        expected,
                        actual: tier.start,
                    });
                }
            }
        }

        for (index, tier) in tiers.iter_mut().enumerate() {
            tier.order = index as u32 + 1;
        }
        Ok(Self {
            tiers,
            diamond_base_cost,
        })
    }

    pub fn tiers(&self) -> &[TierDefinition] {
        &self.tiers
    }

    pub fn diamond_base_cost(&self) -> u64 {
        self.diamond_base_cost
    }

    /// The terminal, unbounded tier.
    pub fn unbounded(&self) -> &TierDefinition {
        &self.tiers[self.tiers.len() - 1]
    }

    /// Lifetime coins at which the unbounded tier begins.
    pub fn unlock_threshold(&self) -> u64 {
        self.unbounded().start
    }

    /// Select the active tier for `coins`: the first bounded tier whose range
    /// holds it, else the unbounded tier.
    pub fn select(&self, coins: u64) -> (usize, &TierDefinition) {
        self.tiers
            .iter()
            .enumerate()
            .find(|(_, tier)| tier.contains(coins))
            .unwrap_or_else(|| (self.tiers.len() - 1, self.unbounded()))
    }

    pub fn by_key(&self, key: &str) -> Option<&TierDefinition> {
        self.tiers.iter().find(|t| t.key == key)
    }

    pub fn by_order(&self, order: u32) -> Option<&TierDefinition> {
        self.tiers.iter().find(|t| t.order == order)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.tiers.iter().position(|t| t.key == key)
    }

    /// Total levels in all bounded tiers before `index`.
    pub fn levels_before(&self, index: usize) -> u64 {
        self.tiers
            .iter()
            .take(index)
            .filter_map(|t| t.level_count)
            .map(u64::from)
            .sum()
    }

    /// Tiers a viewer may see.
    ///
    /// With `show_locked` every tier is returned. Otherwise tiers up to
    /// `preview_ahead` past the current one are returned; an unknown current
    /// key reveals only the first tier.
    pub fn visible_tiers(
        &self,
        current_key: &str,
        show_locked: bool,
        preview_ahead: u32,
    ) -> Vec<&TierDefinition> {
        if show_locked {
            return self.tiers.iter().collect();
        }
        match self.by_key(current_key) {
            Some(current) => {
                let limit = current.order.saturating_add(preview_ahead);
                self.tiers.iter().filter(|t| t.order <= limit).collect()
            }
            None => self.tiers.iter().take(1).collect(),
        }
    }
}
