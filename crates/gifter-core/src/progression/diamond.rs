//! Level stepping for the unbounded terminal tier.
//!
//! The terminal tier has no upper bound, so there is no boundary table.
//! Each level costs `base_cost * growth_factor^(step - 1)` coins more than
//! the one before. Thresholds accumulate as real numbers; a whole-coin total
//! reaches a threshold once it is at least the threshold's ceiling.

use serde::{Deserialize, Serialize};

/// Where a coin total sits inside the unbounded tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiamondLevel {
    pub level: u32,
    pub level_start: u64,
    /// `None` once thresholds no longer fit in a `u64`.
    pub next_level: Option<u64>,
}

/// Iterator over per-level costs, starting at step 1.
#[derive(Debug, Clone)]
pub struct DiamondCosts {
    base_cost: f64,
    growth_factor: f64,
    step: u32,
    previous: Option<f64>,
}

impl DiamondCosts {
    pub fn new(base_cost: u64, growth_factor: f64) -> Self {
        Self {
            base_cost: base_cost.max(1) as f64,
            growth_factor,
            step: 1,
            previous: None,
        }
    }
}

impl Iterator for DiamondCosts {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let exponent = f64::from(self.step - 1);
        let raw = self.base_cost * self.growth_factor.powf(exponent);
        // Only degenerate growth (NaN, <= 1) can fail to increase.
        let cost = match self.previous {
            Some(previous) if raw.is_nan() || raw <= previous => previous + 1.0,
            _ => raw,
        };
        self.previous = Some(cost);
        self.step = self.step.saturating_add(1);
        Some(cost)
    }
}

/// Smallest whole-coin total that reaches `threshold`, if it fits in a `u64`.
fn ceil_coins(threshold: f64) -> Option<u64> {
    let coins = threshold.ceil();
    (coins.is_finite() && coins < u64::MAX as f64).then(|| coins as u64)
}

/// Compute the level reached by `coins` in the unbounded tier.
///
/// Level 1 begins at `unlock_threshold`. Coins below the threshold are
/// treated as sitting at level 1.
pub fn diamond_level(
    coins: u64,
    unlock_threshold: u64,
    base_cost: u64,
    growth_factor: f64,
) -> DiamondLevel {
    let mut costs = DiamondCosts::new(base_cost, growth_factor);

    let mut level: u32 = 1;
    let mut level_start = unlock_threshold;
    let mut next = unlock_threshold as f64 + costs.next().unwrap_or(1.0);

    loop {
        let Some(next_coins) = ceil_coins(next) else {
            tracing::debug!(level, level_start, "diamond thresholds saturated");
            return DiamondLevel {
                level,
                level_start,
                next_level: None,
            };
        };
        if coins < next_coins || level == u32::MAX {
            return DiamondLevel {
                level,
                level_start,
                next_level: Some(next_coins),
            };
        }
        level += 1;
        level_start = next_coins;
        next += costs.next().unwrap_or(f64::INFINITY);
    }
}

/// Start thresholds of the first `count` levels of the unbounded tier.
///
/// Stops early if thresholds overflow.
pub fn diamond_thresholds(
    unlock_threshold: u64,
    base_cost: u64,
    growth_factor: f64,
    count: usize,
) -> Vec<u64> {
    let mut thresholds = Vec::with_capacity(count);
    if count == 0 {
        return thresholds;
    }
    thresholds.push(unlock_threshold);

    let mut next = unlock_threshold as f64;
    for cost in DiamondCosts::new(base_cost, growth_factor) {
        if thresholds.len() >= count {
            break;
        }
        next += cost;
        match ceil_coins(next) {
            Some(start) => thresholds.push(start),
            None => break,
        }
    }
    thresholds
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNLOCK: u64 = 60_000_000;
    const BASE: u64 = 3_000_000;
    const GROWTH: f64 = 1.45;

    /// Level start thresholds from `next = next + base * growth^(level - 1)`.
    fn recurrence_starts(count: usize) -> Vec<f64> {
        let mut starts = vec![UNLOCK as f64];
        let mut next = UNLOCK as f64;
        for step in 1..count {
            next += BASE as f64 * GROWTH.powf((step - 1) as f64);
            starts.push(next);
        }
        starts
    }

    #[test]
    fn costs_follow_geometric_curve() {
        let costs: Vec<f64> = DiamondCosts::new(BASE, GROWTH).take(3).collect();
        assert_eq!(costs[0], 3_000_000.0);
        assert!((costs[1] - 4_350_000.0).abs() < 1e-6);
        assert!((costs[2] - 6_307_500.0).abs() < 1e-6);
    }

    #[test]
    fn costs_keep_increasing_for_degenerate_growth() {
        let costs: Vec<f64> = DiamondCosts::new(5, 1.0).take(10).collect();
        assert!(costs.windows(2).all(|w| w[1] > w[0]));

        let costs: Vec<f64> = DiamondCosts::new(5, f64::NAN).take(10).collect();
        assert_eq!(costs[0], 5.0);
        assert!(costs.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn level_one_at_unlock() {
        let d = diamond_level(UNLOCK, UNLOCK, BASE, GROWTH);
        assert_eq!(d.level, 1);
        assert_eq!(d.level_start, 60_000_000);
        assert_eq!(d.next_level, Some(63_000_000));
    }

    #[test]
    fn level_two_at_first_cost() {
        let d = diamond_level(63_000_000, UNLOCK, BASE, GROWTH);
        assert_eq!(d.level, 2);
        assert_eq!(d.level_start, 63_000_000);
        assert_eq!(d.next_level, Some(67_350_000));

        let just_before = diamond_level(62_999_999, UNLOCK, BASE, GROWTH);
        assert_eq!(just_before.level, 1);
    }

    #[test]
    fn fractional_threshold_rounds_up() {
        // Level 8 starts at 143,176,439.109375 coins.
        assert_eq!(diamond_level(143_176_439, UNLOCK, BASE, GROWTH).level, 7);
        let d = diamond_level(143_176_440, UNLOCK, BASE, GROWTH);
        assert_eq!(d.level, 8);
        assert_eq!(d.level_start, 143_176_440);

        // Level 19 starts at 5,405,538,847.99... coins.
        assert_eq!(diamond_level(5_405_538_847, UNLOCK, BASE, GROWTH).level, 18);
        let d = diamond_level(5_405_538_848, UNLOCK, BASE, GROWTH);
        assert_eq!(d.level, 19);
        assert_eq!(d.level_start, 5_405_538_848);
    }

    #[test]
    fn first_levels_follow_cost_recurrence() {
        let exact = recurrence_starts(25);
        let listed = diamond_thresholds(UNLOCK, BASE, GROWTH, 25);
        assert_eq!(listed.len(), 25);

        for (index, threshold) in exact.iter().enumerate() {
            let level = index as u32 + 1;
            let start = threshold.ceil() as u64;
            assert_eq!(listed[index], start, "level {level}");

            let d = diamond_level(start, UNLOCK, BASE, GROWTH);
            assert_eq!(d.level, level, "at start of level {level}");
            assert_eq!(d.level_start, start);
            if let Some(next) = exact.get(index + 1) {
                assert_eq!(d.next_level, Some(next.ceil() as u64), "level {level}");
            }

            if level > 1 {
                let below = diamond_level(start - 1, UNLOCK, BASE, GROWTH);
                assert_eq!(below.level, level - 1, "just below level {level}");
            }
        }
    }

    #[test]
    fn large_spend_reaches_level_in_few_steps() {
        let d = diamond_level(10_000_000_000_000, UNLOCK, BASE, GROWTH);
        assert!(d.level > 30 && d.level < 50, "level={}", d.level);
        let next = d.next_level.unwrap();
        assert!(d.level_start <= 10_000_000_000_000 && 10_000_000_000_000 < next);
    }

    #[test]
    fn saturates_at_u64_max() {
        let d = diamond_level(u64::MAX, UNLOCK, BASE, GROWTH);
        assert_eq!(d.next_level, None);
        assert!(d.level > 1);
    }

    #[test]
    fn below_unlock_is_level_one() {
        let d = diamond_level(5, UNLOCK, BASE, GROWTH);
        assert_eq!(d.level, 1);
        assert_eq!(d.level_start, UNLOCK);
    }

    #[test]
    fn thresholds_list_level_starts() {
        let t = diamond_thresholds(UNLOCK, BASE, GROWTH, 3);
        assert_eq!(t, vec![60_000_000, 63_000_000, 67_350_000]);
        assert!(diamond_thresholds(UNLOCK, BASE, GROWTH, 0).is_empty());
    }

    #[test]
    fn thresholds_stop_on_overflow() {
        let t = diamond_thresholds(u64::MAX - 1, BASE, GROWTH, 5);
        assert_eq!(t, vec![u64::MAX - 1]);
    }
}
