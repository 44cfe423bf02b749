//! Built-in patch sets for known libraries
//!
//! Each `[Facepunch]` switch expands to ordinary `PatchSpec`s targeting the
//! Facepunch.Steamworks client or Photon PUN. They go through the same
//! resolver and orchestrator as the game-specific runtime patches.

use crate::config::FacepunchSettings;
use crate::patcher::PatchSpec;

const STEAM_CLIENT: &str = "Steamworks.SteamClient";

/// Simple name, so any PUN namespace layout resolves
const PHOTON_NETWORK: &str = "PhotonNetwork";

/// Enabled preset groups as (switch name, specs), in application order
pub fn preset_groups(settings: &FacepunchSettings) -> Vec<(&'static str, Vec<PatchSpec>)> {
    let mut groups = Vec::new();

    if settings.spoof_identity {
        groups.push((
            "spoof_identity",
            vec![
                PatchSpec::property(STEAM_CLIENT, "SteamId", "spoof_steam_id"),
                PatchSpec::property(STEAM_CLIENT, "Name", "spoof_account_name"),
            ],
        ));
    }

    if settings.force_valid {
        groups.push((
            "force_valid",
            vec![
                PatchSpec::property(STEAM_CLIENT, "IsValid", "force_true"),
                PatchSpec::property(STEAM_CLIENT, "IsLoggedOn", "force_true"),
            ],
        ));
    }

    if settings.photon_bypass {
        groups.push((
            "photon_bypass",
            vec![PatchSpec::setter(PHOTON_NETWORK, "AuthValues", "photon_auth_none")],
        ));
    }

    groups
}
