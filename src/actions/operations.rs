//! Hook bodies for each action and the fault boundary around them
//!
//! ## Module Structure
//! - `guard.rs`: Readiness check + error/panic containment for every hook
//! - `flow.rs`: force_true, force_false, skip, log_call
//! - `steam.rs`: force_steam_loaded, spoof_steam_id, spoof_account_name, fake_auth_ticket
//! - `photon.rs`: photon_auth_none

mod flow;
mod guard;
mod photon;
mod steam;

pub use flow::{force_bool, log_call, skip};
pub use guard::{guard_postfix, guard_prefix};
pub use photon::photon_auth_none;
pub use steam::{fake_auth_ticket, force_steam_loaded, spoof_account_name, spoof_steam_id};
