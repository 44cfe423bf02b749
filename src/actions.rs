//! Library of reusable patch actions
//!
//! Each action is a named before-hook and/or after-hook that can be bound to
//! any resolved target. Actions share one injected `PatchContext`; when that
//! context has no identity (config missing) every action is a pass-through.
//!
//! ## Module Structure
//! - `types.rs`: Action, ActionBinding, HookError
//! - `context.rs`: PatchContext (identity + lazily created session values)
//! - `pure/`: FakeTicket derivation
//! - `operations/`: Hook bodies and the fault boundary around them

mod context;
mod operations;
pub mod pure;
mod types;

pub use context::PatchContext;
pub use pure::FakeTicket;
pub use types::{
    AUTH_TYPE_CUSTOM, AUTH_TYPE_NONE, Action, ActionBinding, HookError, HookResult,
};

use std::sync::Arc;

use log::warn;

use operations::{
    fake_auth_ticket, force_bool, force_steam_loaded, guard_postfix, guard_prefix, log_call,
    photon_auth_none, skip, spoof_account_name, spoof_steam_id,
};

impl Action {
    /// Hooks implementing this action, bound to `ctx`
    pub fn binding(self, ctx: &Arc<PatchContext>) -> ActionBinding {
        let tag = self.name();
        let (prefix, postfix) = match self {
            Action::ForceTrue => (
                None,
                Some(guard_postfix(tag, ctx, move |_, inv| {
                    force_bool(tag, inv, true).map(|_| ())
                })),
            ),
            Action::ForceFalse => (
                None,
                Some(guard_postfix(tag, ctx, move |_, inv| {
                    force_bool(tag, inv, false).map(|_| ())
                })),
            ),
            Action::Skip => (Some(guard_prefix(tag, ctx, skip)), None),
            Action::ForceSteamLoaded => (None, Some(guard_postfix(tag, ctx, force_steam_loaded))),
            Action::FakeAuthTicket => (Some(guard_prefix(tag, ctx, fake_auth_ticket)), None),
            Action::PhotonAuthNone => (Some(guard_prefix(tag, ctx, photon_auth_none)), None),
            Action::LogCall => (Some(guard_prefix(tag, ctx, log_call)), None),
            Action::SpoofSteamId => (None, Some(guard_postfix(tag, ctx, spoof_steam_id))),
            Action::SpoofAccountName => {
                (None, Some(guard_postfix(tag, ctx, spoof_account_name)))
            }
        };
        ActionBinding {
            action: Some(self),
            prefix,
            postfix,
        }
    }
}

/// Get the hooks for a named action (case-insensitive).
/// Returns the empty binding if the action is unknown.
pub fn lookup(name: &str, ctx: &Arc<PatchContext>) -> ActionBinding {
    match name.parse::<Action>() {
        Ok(action) => action.binding(ctx),
        Err(_) => {
            warn!("[actions] Unknown action: {}", name);
            ActionBinding::none()
        }
    }
}
