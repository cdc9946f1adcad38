//! # Gifter Core Library
//!
//! Converts a user's lifetime spend on virtual gifts into a tier, a level
//! within that tier, progress toward the next level, and a decision on
//! whether locked tier detail may be shown to the viewer.
//!
//! Every call recomputes from the lifetime coin total. Nothing is cached or
//! persisted, and computation never fails: malformed input degrades to the
//! first tier at level 1.
//!
//! ## Architecture
//!
//! - **Tier Table**: ordered, contiguous tiers ending in one unbounded tier
//! - **Progression**: level boundaries for bounded tiers, on-demand geometric
//!   stepping for the unbounded tier, and the progress fraction
//! - **Gating**: viewer-dependent reveal policy for locked tiers
//! - **Storage**: TOML configuration overriding the reference tier table
//!
//! ## Key Components
//!
//! - [`GifterEngine`]: tier table plus reveal policy; computes [`GifterStatus`]
//! - [`TierTable`]: validated tier configuration
//! - [`compute_progression`] / [`compute_gating`]: the two halves of a status
//! - [`Config`]: configuration management

pub mod engine;
pub mod error;
pub mod format;
pub mod gating;
pub mod progression;
pub mod storage;
pub mod tiers;

pub use engine::{default_engine, gifter_status, GifterEngine, GifterStatus};
pub use error::{ConfigError, CoreError, TierTableError};
pub use format::{format_coin_amount, tier_coin_range, tier_level_range};
pub use gating::{compute_gating, Gating, RevealPolicy, ViewerContext};
pub use progression::{compute_progression, normalize_coins, Progression};
pub use storage::Config;
pub use tiers::{TierDefinition, TierTable};
