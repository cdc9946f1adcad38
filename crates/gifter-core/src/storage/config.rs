//! TOML-based engine configuration.
//!
//! Stores:
//! - The tier table (`[[tiers]]`)
//! - Unbounded tier stepping (`[diamond]`)
//! - The reveal policy for locked tiers (`[reveal]`)
//! - Display preferences (`[display]`)
//!
//! Configuration is stored at `~/.config/gifter/config.toml`. Every field
//! defaults to the reference configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::engine::GifterEngine;
use crate::error::{ConfigError, TierTableError};
use crate::gating::RevealPolicy;
use crate::tiers::{reference_tiers, TierDefinition, TierTable, DIAMOND_BASE_COST};

/// Unbounded tier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiamondConfig {
    #[serde(default = "default_base_cost")]
    pub base_cost: u64,
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Locked tiers shown past the viewer's current tier
    #[serde(default = "default_preview_tiers_ahead")]
    pub preview_tiers_ahead: u32,
}

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/gifter/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub diamond: DiamondConfig,
    #[serde(default)]
    pub reveal: RevealPolicy,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default = "reference_tiers")]
    pub tiers: Vec<TierDefinition>,
}

fn default_base_cost() -> u64 {
    DIAMOND_BASE_COST
}
fn default_preview_tiers_ahead() -> u32 {
    1
}

impl Default for DiamondConfig {
    fn default() -> Self {
        Self {
            base_cost: default_base_cost(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            preview_tiers_ahead: default_preview_tiers_ahead(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            diamond: DiamondConfig::default(),
            reveal: RevealPolicy::default(),
            display: DisplayConfig::default(),
            tiers: reference_tiers(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Path of the config file in the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults if no file exists.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(path)?;
            return Ok(cfg);
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, keeping the existing type.
    ///
    /// Does not save; call [`Config::save`] afterwards.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Validate the configured tiers and build an engine.
    pub fn engine(&self) -> Result<GifterEngine, TierTableError> {
        let table = TierTable::new(self.tiers.clone(), self.diamond.base_cost)?;
        GifterEngine::new(table, self.reveal.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gating::ViewerContext;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_file_is_reference_config() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed, Config::default());
        assert_eq!(parsed.engine().unwrap(), GifterEngine::default());
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let parsed: Config = toml::from_str("[reveal]\nmin_level = 25\n").unwrap();
        assert_eq!(parsed.reveal.tier_key, "mythic");
        assert_eq!(parsed.reveal.min_level, 25);
        assert_eq!(parsed.diamond.base_cost, 3_000_000);
        assert_eq!(parsed.tiers.len(), 10);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("diamond.base_cost").as_deref(), Some("3000000"));
        assert_eq!(cfg.get("reveal.tier_key").as_deref(), Some("mythic"));
        assert_eq!(cfg.get("display.preview_tiers_ahead").as_deref(), Some("1"));
        assert!(cfg.get("reveal.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_number_and_string() {
        let mut cfg = Config::default();
        cfg.set("diamond.base_cost", "2500000").unwrap();
        cfg.set("reveal.tier_key", "legend").unwrap();
        assert_eq!(cfg.diamond.base_cost, 2_500_000);
        assert_eq!(cfg.reveal.tier_key, "legend");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("diamond.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        let result = cfg.set("reveal.min_level", "forty");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        assert_eq!(cfg.reveal.min_level, 40);
    }

    #[test]
    fn set_rejects_negative_for_unsigned_field() {
        let mut cfg = Config::default();
        assert!(cfg.set("diamond.base_cost", "-3").is_err());
    }

    #[test]
    fn engine_rejects_invalid_tables() {
        let mut cfg = Config::default();
        cfg.tiers.pop();
        assert_eq!(cfg.engine(), Err(TierTableError::MissingUnboundedTier));

        let mut cfg = Config::default();
        cfg.reveal.tier_key = "diamond".into();
        assert!(matches!(
            cfg.engine(),
            Err(TierTableError::UnknownRevealTier(_))
        ));
    }

    #[test]
    fn custom_base_cost_changes_diamond_steps() {
        let mut cfg = Config::default();
        cfg.diamond.base_cost = 1_000_000;
        let engine = cfg.engine().unwrap();
        let status = engine.compute_coins(61_000_000, &ViewerContext::default());
        assert_eq!(status.level_in_tier, 2);
        assert_eq!(status.level_start_coins, 61_000_000);
    }

    #[test]
    fn load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut edited = cfg.clone();
        edited.display.preview_tiers_ahead = 3;
        edited.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().display.preview_tiers_ahead, 3);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[diamond]\nbase_cost = \"lots\"\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }
}
