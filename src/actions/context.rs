//! Shared state for action hooks
//!
//! Built once at startup and handed to every binding. The session user id
//! and the fake ticket are created on first use and then reused by every
//! hook on every target for the rest of the process.

use std::sync::OnceLock;

use log::info;
use uuid::Uuid;

use crate::config::SpoofIdentity;

use super::pure::FakeTicket;
use super::types::{HookError, HookResult};

#[derive(Debug, Default)]
pub struct PatchContext {
    identity: Option<SpoofIdentity>,
    photon_user_id: OnceLock<String>,
    fake_ticket: OnceLock<FakeTicket>,
}

impl PatchContext {
    pub fn new(identity: SpoofIdentity) -> Self {
        Self {
            identity: Some(identity),
            ..Self::default()
        }
    }

    /// No config loaded: every hook passes through
    pub fn passthrough() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.identity.is_some()
    }

    pub fn identity(&self) -> HookResult<&SpoofIdentity> {
        self.identity.as_ref().ok_or(HookError::NotReady)
    }

    /// Random Photon UserId, generated once per session
    pub fn photon_user_id(&self) -> &str {
        self.photon_user_id.get_or_init(|| {
            let id = Uuid::new_v4().to_string();
            info!("[photon_auth_none] Generated random Photon UserId: {}", id);
            id
        })
    }

    /// Fake auth ticket for the spoofed Steam ID, derived once
    pub fn fake_ticket(&self) -> HookResult<&FakeTicket> {
        let identity = self.identity()?;
        Ok(self
            .fake_ticket
            .get_or_init(|| FakeTicket::derive(identity.steam_id)))
    }
}
