pub mod config;
pub mod status;
pub mod tiers;

use gifter_core::{Config, GifterEngine};

/// Load the configuration and build a validated engine from it.
pub fn load_engine() -> Result<(Config, GifterEngine), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let engine = config.engine()?;
    Ok((config, engine))
}
