// splitux.cfg parser
//
// Sections: [Identity], [Facepunch], [RuntimePatches]. Unknown sections and
// keys are ignored so older plugins keep working with newer launchers.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::config::types::{DEFAULT_ACCOUNT_NAME, FacepunchSettings, SplituxConfig, SpoofIdentity};
use crate::patcher::{PatchFields, build_patch_specs};

use super::identity::{derive_account_name, derive_steam_id, parse_bool};
use super::ini::{IniLine, parse_line};

// Format: patch.0.class=SteamManager
static PATCH_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^patch\.(\d+)\.(\w+)$").unwrap());

/// [Identity] values as written, before defaults are derived
struct RawIdentity {
    player_index: u32,
    steam_id: u64,
    account_name: String,
}

impl Default for RawIdentity {
    fn default() -> Self {
        Self {
            player_index: 0,
            steam_id: 0,
            account_name: DEFAULT_ACCOUNT_NAME.to_string(),
        }
    }
}

impl RawIdentity {
    fn resolve(self) -> SpoofIdentity {
        let steam_id = if self.steam_id == 0 {
            derive_steam_id(self.player_index)
        } else {
            self.steam_id
        };
        let account_name =
            if self.account_name.is_empty() || self.account_name == DEFAULT_ACCOUNT_NAME {
                derive_account_name(self.player_index)
            } else {
                self.account_name
            };
        SpoofIdentity {
            player_index: self.player_index,
            steam_id,
            account_name,
        }
    }
}

/// Parse the full text of a splitux.cfg. Never fails: malformed values are
/// logged and left at their defaults, malformed patches are dropped.
pub fn parse_config(content: &str) -> SplituxConfig {
    let mut section = String::new();
    let mut identity = RawIdentity::default();
    let mut facepunch = FacepunchSettings::default();
    let mut patch_fields = PatchFields::new();

    for line in content.lines().filter_map(parse_line) {
        match line {
            IniLine::Section(name) => section = name,
            IniLine::Entry { key, value } => match section.as_str() {
                "identity" => parse_identity(&mut identity, &key, value),
                "facepunch" => parse_facepunch(&mut facepunch, &key, value),
                "runtimepatches" => collect_patch_field(&mut patch_fields, &key, value),
                _ => {}
            },
        }
    }

    SplituxConfig {
        identity: identity.resolve(),
        facepunch,
        runtime_patches: build_patch_specs(&patch_fields),
    }
}

fn parse_identity(identity: &mut RawIdentity, key: &str, value: &str) {
    match key {
        "player_index" => match value.parse() {
            Ok(idx) => identity.player_index = idx,
            Err(_) => warn!("[config] Ignoring invalid player_index '{}'", value),
        },
        "steam_id" => match value.parse() {
            Ok(id) => identity.steam_id = id,
            Err(_) => warn!("[config] Ignoring invalid steam_id '{}'", value),
        },
        "account_name" => identity.account_name = value.to_string(),
        _ => debug!("[config] Unknown identity key '{}'", key),
    }
}

fn parse_facepunch(settings: &mut FacepunchSettings, key: &str, value: &str) {
    let enabled = parse_bool(value);
    match key {
        "spoof_identity" => settings.spoof_identity = enabled,
        "force_valid" => settings.force_valid = enabled,
        "photon_bypass" => settings.photon_bypass = enabled,
        _ => debug!("[config] Unknown facepunch key '{}'", key),
    }
}

/// Record one `patch.<index>.<field>=<value>` declaration. Keys that do not
/// have that shape are ignored.
pub fn collect_patch_field(fields: &mut PatchFields, key: &str, value: &str) {
    let Some(caps) = PATCH_KEY.captures(key) else {
        debug!("[config] Ignoring runtime patch key '{}'", key);
        return;
    };
    let Ok(index) = caps[1].parse::<u32>() else {
        warn!("[config] Runtime patch index out of range in '{}'", key);
        return;
    };

    fields
        .entry(index)
        .or_insert_with(BTreeMap::new)
        .insert(caps[2].to_string(), value.to_string());
}
