mod config;

pub use config::{Config, DiamondConfig, DisplayConfig};

use std::path::PathBuf;

/// Returns the configuration directory.
///
/// `GIFTER_CONFIG_DIR` wins when set. Otherwise `~/.config/gifter[-dev]/`,
/// with the `-dev` suffix chosen by `GIFTER_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("GIFTER_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("GIFTER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("gifter-dev")
            } else {
                base_dir.join("gifter")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
