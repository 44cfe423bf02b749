//! Photon authentication bypass
//!
//! Runs before the credentials setter. The credentials passed in are
//! rewritten to `AuthType = None` with a per-session random `UserId`, so
//! every instance joins as a distinct unauthenticated user instead of being
//! rejected for reusing one Steam account.

use log::info;

use crate::actions::context::PatchContext;
use crate::actions::types::{AUTH_TYPE_CUSTOM, AUTH_TYPE_NONE, HookError, HookResult};
use crate::host::{Flow, Invocation, Value};

const USER_ID: &str = "UserId";
const AUTH_TYPE: &str = "AuthType";

pub fn photon_auth_none(ctx: &PatchContext, inv: &mut Invocation<'_>) -> HookResult<Flow> {
    let Some(credentials) = inv.args.first_mut() else {
        return Ok(Flow::Continue);
    };

    match credentials {
        Value::Null => {}
        Value::Object(obj) => {
            if obj.property(USER_ID).is_some() {
                let user_id = ctx.photon_user_id();
                obj.set_property(USER_ID, Value::from(user_id))?;
                info!("[photon_auth_none] Injected UserId: {}", user_id);
            }
            if let Some(previous) = obj.property(AUTH_TYPE) {
                obj.set_property(AUTH_TYPE, Value::Byte(AUTH_TYPE_NONE))?;
                info!(
                    "[photon_auth_none] Set AuthType to None ({}), was {}",
                    AUTH_TYPE_NONE,
                    auth_type_label(&previous)
                );
            }
        }
        Value::Struct(fields) => {
            if fields.has(USER_ID) {
                let user_id = ctx.photon_user_id();
                fields.set(USER_ID, Value::from(user_id));
                info!("[photon_auth_none] Injected UserId: {}", user_id);
            }
            if let Some(previous) = fields.get(AUTH_TYPE) {
                let previous = auth_type_label(previous);
                fields.set(AUTH_TYPE, Value::Byte(AUTH_TYPE_NONE));
                info!(
                    "[photon_auth_none] Set AuthType to None ({}), was {}",
                    AUTH_TYPE_NONE, previous
                );
            }
        }
        other => {
            return Err(HookError::UnexpectedValue {
                expected: "credentials object",
                found: other.kind(),
            });
        }
    }

    Ok(Flow::Continue)
}

/// Photon's name for a raw `AuthType` value
fn auth_type_label(value: &Value) -> String {
    match value.as_u64() {
        Some(v) if v == u64::from(AUTH_TYPE_CUSTOM) => "Custom".to_string(),
        Some(v) if v == u64::from(AUTH_TYPE_NONE) => "None".to_string(),
        Some(v) => v.to_string(),
        None => value.kind().to_string(),
    }
}
