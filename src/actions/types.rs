//! Action type definitions

use std::fmt;

use strum::{EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

use crate::host::{HostError, Postfix, Prefix};

/// Photon `CustomAuthenticationType` values.
/// Custom is rejected outright by the Photon backend; None skips validation.
pub const AUTH_TYPE_CUSTOM: u8 = 0;
pub const AUTH_TYPE_NONE: u8 = 255;

pub type HookResult<T> = Result<T, HookError>;

/// Faults raised inside a hook body. Caught at the hook boundary and logged;
/// they never reach the host.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("configuration not loaded")]
    NotReady,

    #[error("expected {expected}, found {found}")]
    UnexpectedValue {
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Host(#[from] HostError),
}

/// The action catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Action {
    /// Force a bool return value to true.
    /// Use for: IsValid, IsLoggedOn, steamLoaded getters, etc.
    ForceTrue,
    /// Force a bool return value to false
    ForceFalse,
    /// Skip the original method entirely.
    /// Use for: Quit calls, error handlers, validation methods.
    Skip,
    /// Set steamLoaded=true, steamId=spoofed, steamName=spoofed on the receiver.
    /// Use for: SteamManager.DoSteam, SteamManager.Awake, etc.
    ForceSteamLoaded,
    /// Return a fake Steam auth ticket string.
    /// Use for: GetSteamAuthTicket methods that return string.
    FakeAuthTicket,
    /// Set AuthType=255 (None) and a per-session random UserId on the
    /// credentials passed in. Use for: PhotonNetwork.AuthValues setter.
    PhotonAuthNone,
    /// Log when a method is called (for debugging)
    LogCall,
    /// Replace a Steam ID result with the spoofed ID
    SpoofSteamId,
    /// Replace a player name result with the spoofed name
    SpoofAccountName,
}

impl Action {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An action's hooks, at most one of each. Both absent means the action was
/// not found; such a binding is never installed.
#[derive(Clone, Default)]
pub struct ActionBinding {
    pub action: Option<Action>,
    pub prefix: Option<Prefix>,
    pub postfix: Option<Postfix>,
}

impl ActionBinding {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.prefix.is_none() && self.postfix.is_none()
    }
}

impl fmt::Debug for ActionBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionBinding")
            .field("action", &self.action)
            .field("prefix", &self.prefix.is_some())
            .field("postfix", &self.postfix.is_some())
            .finish()
    }
}
