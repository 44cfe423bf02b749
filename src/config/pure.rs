//! Pure functions for instance configuration
//!
//! These functions have no side effects and are deterministic.

mod config_gen;
mod identity;
mod ini;
mod parse;

pub use config_gen::generate_config_content;
pub use identity::{derive_account_name, derive_steam_id, parse_bool};
pub use ini::{IniLine, parse_line};
pub use parse::{collect_patch_field, parse_config};
