// Spoofed identity derivation

use crate::config::types::STEAM_ID_BASE;

/// Steam ID for a player slot when the launcher did not pin one.
/// Distinct player indices always yield distinct IDs.
pub fn derive_steam_id(player_index: u32) -> u64 {
    STEAM_ID_BASE + u64::from(player_index) + 1
}

/// Display name for a player slot when the launcher left the default
pub fn derive_account_name(player_index: u32) -> String {
    format!("Player {}", u64::from(player_index) + 1)
}

/// `true` (any case) and `1` are true, anything else is false
pub fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
