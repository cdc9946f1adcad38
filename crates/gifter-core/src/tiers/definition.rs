//! A single tier band of lifetime spend.

use serde::{Deserialize, Serialize};

/// One named band of lifetime coins.
///
/// Bounded tiers cover `[start, end)` and are split into `level_count`
/// levels. The terminal tier has neither `end` nor `level_count`; its levels
/// are generated on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDefinition {
    /// Stable identifier (e.g. "starter", "diamond")
    pub key: String,
    /// Display name
    pub name: String,
    /// Badge color as a hex string
    #[serde(default)]
    pub color: String,
    /// Badge icon
    #[serde(default)]
    pub icon: String,
    /// 1-based position in the table, assigned when the table is built
    #[serde(default)]
    pub order: u32,
    /// Inclusive lower bound in coins
    pub start: u64,
    /// Exclusive upper bound in coins, `None` for the terminal tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
    /// Ratio between the widths of successive levels
    pub growth_factor: f64,
    /// Number of levels in `[start, end)`, `None` for the terminal tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_count: Option<u32>,
}

impl TierDefinition {
    /// Create a bounded tier covering `[start, end)`.
    pub fn bounded(
        key: &str,
        name: &str,
        start: u64,
        end: u64,
        growth_factor: f64,
        level_count: u32,
    ) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            color: String::new(),
            icon: String::new(),
            order: 0,
            start,
            end: Some(end),
            growth_factor,
            level_count: Some(level_count),
        }
    }

    /// Create the terminal tier starting at `start` with no upper bound.
    pub fn unbounded(key: &str, name: &str, start: u64, growth_factor: f64) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            color: String::new(),
            icon: String::new(),
            order: 0,
            start,
            end: None,
            growth_factor,
            level_count: None,
        }
    }

    /// Attach badge presentation.
    pub fn with_badge(mut self, color: &str, icon: &str) -> Self {
        self.color = color.to_string();
        self.icon = icon.to_string();
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.end.is_none()
    }

    /// Whether `coins` lies in this tier's half-open range.
    ///
    /// Always false for the terminal tier; it is selected as the fallback.
    pub fn contains(&self, coins: u64) -> bool {
        match self.end {
            Some(end) => self.start <= coins && coins < end,
            None => false,
        }
    }
}
