//! Short human-readable coin amounts and tier ranges.

use crate::tiers::TierDefinition;

/// Format coins as `60.0M`, `300K` or a plain integer.
pub fn format_coin_amount(coins: u64) -> String {
    if coins >= 1_000_000 {
        format!("{:.1}M", coins as f64 / 1_000_000.0)
    } else if coins >= 1_000 {
        format!("{:.0}K", coins as f64 / 1_000.0)
    } else {
        coins.to_string()
    }
}

/// Coin range of a tier, e.g. `60K – 300K` or `60.0M+`.
pub fn tier_coin_range(tier: &TierDefinition) -> String {
    let start = format_coin_amount(tier.start);
    match tier.end {
        Some(end) => format!("{} – {}", start, format_coin_amount(end)),
        None => format!("{start}+"),
    }
}

/// Level range of a tier, e.g. `1–50` or `1+`.
pub fn tier_level_range(tier: &TierDefinition) -> String {
    match tier.level_count {
        Some(levels) => format!("1–{levels}"),
        None => "1+".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiers::TierTable;

    #[test]
    fn formats_each_magnitude() {
        assert_eq!(format_coin_amount(0), "0");
        assert_eq!(format_coin_amount(999), "999");
        assert_eq!(format_coin_amount(60_000), "60K");
        assert_eq!(format_coin_amount(2_400_000), "2.4M");
        assert_eq!(format_coin_amount(60_000_000), "60.0M");
    }

    #[test]
    fn tier_ranges() {
        let table = TierTable::default();
        let supporter = table.by_key("supporter").unwrap();
        assert_eq!(tier_coin_range(supporter), "60K – 300K");
        assert_eq!(tier_level_range(supporter), "1–50");

        let diamond = table.unbounded();
        assert_eq!(tier_coin_range(diamond), "60.0M+");
        assert_eq!(tier_level_range(diamond), "1+");
    }
}
