//! Config type definitions

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::patcher::PatchSpec;

/// Base Steam ID for generating unique IDs per player
pub const STEAM_ID_BASE: u64 = 76561198000000000;

/// Account name the launcher leaves in place when the profile has none
pub const DEFAULT_ACCOUNT_NAME: &str = "Player";

pub const CONFIG_FILE_NAME: &str = "splitux.cfg";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Known-library patch switches ([Facepunch] section)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacepunchSettings {
    /// Spoof SteamClient.SteamId and SteamClient.Name to unique per-instance values
    pub spoof_identity: bool,

    /// Force SteamClient.IsValid and IsLoggedOn to return true
    pub force_valid: bool,

    /// Bypass Photon Steam authentication (AuthType=255)
    pub photon_bypass: bool,
}

/// The identity this process presents in place of the real account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpoofIdentity {
    /// Instance index (0-based)
    pub player_index: u32,
    pub steam_id: u64,
    pub account_name: String,
}

/// Fully parsed instance configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplituxConfig {
    pub identity: SpoofIdentity,
    pub facepunch: FacepunchSettings,
    /// Game-specific patches, in ascending declaration index
    pub runtime_patches: Vec<PatchSpec>,
}
