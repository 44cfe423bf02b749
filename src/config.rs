//! Splitux instance configuration
//!
//! Each game instance gets a `splitux.cfg` from the launcher telling it which
//! player it is, which known-library patches to enable and which runtime
//! patches to apply. The file is read once at startup; everything derived
//! from it is immutable afterwards.
//!
//! ## Module Structure
//! - `types.rs`: SplituxConfig, SpoofIdentity, FacepunchSettings
//! - `pure/`: Parsing, identity derivation, config generation
//! - `operations/`: File loading

mod operations;
pub mod pure;
mod types;

pub use operations::{config_path, load_config};
pub use pure::{generate_config_content, parse_config};
pub use types::{
    CONFIG_FILE_NAME, ConfigError, ConfigResult, DEFAULT_ACCOUNT_NAME, FacepunchSettings,
    STEAM_ID_BASE, SplituxConfig, SpoofIdentity,
};
