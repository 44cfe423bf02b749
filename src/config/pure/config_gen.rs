//! Splitux config generation
//!
//! The write side of the splitux.cfg format: what the launcher emits for each
//! instance. `parse_config` reads it back unchanged.

use crate::config::types::SplituxConfig;
use crate::patcher::MemberKind;

/// Generate the splitux.cfg content for an instance
/// Uses INI format with sections: [Identity], [Facepunch], [RuntimePatches]
pub fn generate_config_content(config: &SplituxConfig) -> String {
    let mut content = String::new();

    // [Identity] section
    content.push_str("[Identity]\n");
    content.push_str(&format!("player_index={}\n", config.identity.player_index));
    content.push_str(&format!("account_name={}\n", config.identity.account_name));
    content.push_str(&format!("steam_id={}\n", config.identity.steam_id));
    content.push('\n');

    // [Facepunch] section
    content.push_str("[Facepunch]\n");
    content.push_str(&format!("spoof_identity={}\n", config.facepunch.spoof_identity));
    content.push_str(&format!("force_valid={}\n", config.facepunch.force_valid));
    content.push_str(&format!("photon_bypass={}\n", config.facepunch.photon_bypass));

    // Setters have no config representation; only presets produce them
    let patches: Vec<_> = config
        .runtime_patches
        .iter()
        .filter(|p| !matches!(p.member, MemberKind::PropertySetter(_)))
        .collect();

    if !patches.is_empty() {
        content.push('\n');
        content.push_str("[RuntimePatches]\n");
        for (i, patch) in patches.iter().enumerate() {
            content.push_str(&format!("patch.{}.class={}\n", i, patch.target_type));
            match &patch.member {
                MemberKind::Method(name) => {
                    content.push_str(&format!("patch.{}.method={}\n", i, name));
                }
                MemberKind::PropertyGetter(name) => {
                    content.push_str(&format!("patch.{}.property={}\n", i, name));
                }
                MemberKind::PropertySetter(_) => {}
            }
            content.push_str(&format!("patch.{}.action={}\n", i, patch.action));
        }
    }

    content
}
