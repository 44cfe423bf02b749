//! Steam identity overrides
//!
//! `force_steam_loaded` rewrites the backing fields of a Steam manager
//! instance after its init method ran. The spoof actions replace the
//! results of the client library's identity getters. `fake_auth_ticket`
//! answers ticket requests without calling Steam at all.

use log::{debug, info};

use crate::actions::context::PatchContext;
use crate::actions::types::{HookError, HookResult};
use crate::host::{Flow, Invocation, Value};

const STEAM_LOADED_FIELD: &str = "steamLoaded";
const STEAM_ID_FIELD: &str = "steamId";
const STEAM_NAME_FIELD: &str = "steamName";

/// Field holding the raw number inside a `SteamId`-style wrapper struct
const WRAPPED_ID_FIELD: &str = "Value";

/// `current` with its numeric id replaced by `id`, keeping its shape.
/// `None` when `current` carries no id to replace.
fn replace_id(current: &Value, id: u64) -> HookResult<Option<Value>> {
    match current {
        Value::UInt(_) => Ok(Some(Value::UInt(id))),
        Value::Int(_) => i64::try_from(id)
            .map(|v| Some(Value::Int(v)))
            .map_err(|_| HookError::UnexpectedValue {
                expected: "int wide enough for a steam id",
                found: "int",
            }),
        Value::Struct(wrapper) => {
            let Some(inner) = wrapper.get(WRAPPED_ID_FIELD) else {
                return Ok(None);
            };
            let Some(inner) = replace_id(inner, id)? else {
                return Ok(None);
            };
            let mut next = wrapper.clone();
            next.set(WRAPPED_ID_FIELD, inner);
            Ok(Some(Value::Struct(next)))
        }
        _ => Ok(None),
    }
}

/// Raw number out of a plain or wrapped id, for logging
fn id_number(value: &Value) -> Option<u64> {
    match value {
        Value::Struct(wrapper) => wrapper.get(WRAPPED_ID_FIELD).and_then(Value::as_u64),
        other => other.as_u64(),
    }
}

pub fn force_steam_loaded(ctx: &PatchContext, inv: &mut Invocation<'_>) -> HookResult<()> {
    let Some(instance) = inv.instance else {
        return Ok(());
    };
    let identity = ctx.identity()?;

    info!("[force_steam_loaded] Forcing Steam state...");

    if let Some(before) = instance.field(STEAM_LOADED_FIELD) {
        instance.set_field(STEAM_LOADED_FIELD, Value::Bool(true))?;
        info!("[force_steam_loaded] steamLoaded: {} -> TRUE", before);
    }

    if let Some(current) = instance.field(STEAM_ID_FIELD) {
        if let Some(next) = replace_id(&current, identity.steam_id)? {
            instance.set_field(STEAM_ID_FIELD, next)?;
            match id_number(&current) {
                Some(before) => info!(
                    "[force_steam_loaded] steamId: {} -> {}",
                    before, identity.steam_id
                ),
                None => info!("[force_steam_loaded] steamId: -> {}", identity.steam_id),
            }
        }
    }

    if let Some(before) = instance.field(STEAM_NAME_FIELD) {
        instance.set_field(
            STEAM_NAME_FIELD,
            Value::Str(identity.account_name.clone()),
        )?;
        info!(
            "[force_steam_loaded] steamName: {} -> {}",
            before, identity.account_name
        );
    }

    info!("[force_steam_loaded] Steam state forced successfully");
    Ok(())
}

pub fn spoof_steam_id(ctx: &PatchContext, inv: &mut Invocation<'_>) -> HookResult<()> {
    let steam_id = ctx.identity()?.steam_id;
    let next = match &*inv.result {
        Value::Null => Value::UInt(steam_id),
        other => replace_id(other, steam_id)?.ok_or_else(|| HookError::UnexpectedValue {
            expected: "steam id",
            found: other.kind(),
        })?,
    };
    if *inv.result != next {
        debug!(
            "[spoof_steam_id] {} -> {}",
            inv.target.qualified_name(),
            steam_id
        );
        *inv.result = next;
    }
    Ok(())
}

pub fn spoof_account_name(ctx: &PatchContext, inv: &mut Invocation<'_>) -> HookResult<()> {
    let name = &ctx.identity()?.account_name;
    let current = match &*inv.result {
        Value::Str(s) => Some(s.as_str()),
        Value::Null => None,
        other => {
            return Err(HookError::UnexpectedValue {
                expected: "string",
                found: other.kind(),
            });
        }
    };
    if current == Some(name.as_str()) {
        return Ok(());
    }
    debug!(
        "[spoof_account_name] {} -> {}",
        inv.target.qualified_name(),
        name
    );
    *inv.result = Value::Str(name.clone());
    Ok(())
}

pub fn fake_auth_ticket(ctx: &PatchContext, inv: &mut Invocation<'_>) -> HookResult<Flow> {
    let hex = ctx.fake_ticket()?.to_hex();
    info!(
        "[fake_auth_ticket] Returning fake ticket from {} (length: {} chars)",
        inv.target.qualified_name(),
        hex.len()
    );
    *inv.result = Value::Str(hex);
    Ok(Flow::Skip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::pure::steam_id_from_hex;
    use crate::config::SpoofIdentity;
    use crate::host::memory::MemoryObject;
    use crate::host::{CallableId, HostObject, ObjectRef, StructValue, TargetInfo};
    use std::sync::Arc;

    const SPOOFED: u64 = 76561198000000002;

    fn ctx() -> PatchContext {
        PatchContext::new(SpoofIdentity {
            player_index: 1,
            steam_id: SPOOFED,
            account_name: "Player 2".to_string(),
        })
    }

    fn target(name: &str) -> TargetInfo {
        TargetInfo {
            id: CallableId(9),
            declaring_type: "SteamManager".to_string(),
            name: name.to_string(),
        }
    }

    fn steam_id(v: u64) -> Value {
        Value::Struct(StructValue::new("SteamId").with_field("Value", Value::UInt(v)))
    }

    // ── force_steam_loaded ──

    #[test]
    fn rewrites_all_three_fields() {
        let obj: ObjectRef = Arc::new(
            MemoryObject::new("SteamManager")
                .with_field("steamLoaded", Value::Bool(false))
                .with_field("steamId", steam_id(1))
                .with_field("steamName", Value::from("real")),
        );
        let target = target("DoSteam");
        let mut result = Value::Null;
        let mut inv = Invocation {
            target: &target,
            instance: Some(&obj),
            args: &mut [],
            result: &mut result,
        };
        force_steam_loaded(&ctx(), &mut inv).unwrap();

        assert_eq!(obj.field("steamLoaded"), Some(Value::Bool(true)));
        assert_eq!(obj.field("steamId"), Some(steam_id(SPOOFED)));
        assert_eq!(obj.field("steamName"), Some(Value::from("Player 2")));
    }

    #[test]
    fn missing_fields_are_skipped() {
        let obj: ObjectRef = Arc::new(
            MemoryObject::new("SteamManager").with_field("steamLoaded", Value::Bool(false)),
        );
        let target = target("Awake");
        let mut result = Value::Null;
        let mut inv = Invocation {
            target: &target,
            instance: Some(&obj),
            args: &mut [],
            result: &mut result,
        };
        force_steam_loaded(&ctx(), &mut inv).unwrap();

        assert_eq!(obj.field("steamLoaded"), Some(Value::Bool(true)));
        assert_eq!(obj.field("steamId"), None);
        assert_eq!(obj.field("steamName"), None);
    }

    #[test]
    fn null_steam_id_is_left_alone() {
        let obj: ObjectRef =
            Arc::new(MemoryObject::new("SteamManager").with_field("steamId", Value::Null));
        let target = target("DoSteam");
        let mut result = Value::Null;
        let mut inv = Invocation {
            target: &target,
            instance: Some(&obj),
            args: &mut [],
            result: &mut result,
        };
        force_steam_loaded(&ctx(), &mut inv).unwrap();
        assert_eq!(obj.field("steamId"), Some(Value::Null));
    }

    #[test]
    fn static_target_is_a_no_op() {
        let target = target("Init");
        let mut result = Value::Null;
        let mut inv = Invocation {
            target: &target,
            instance: None,
            args: &mut [],
            result: &mut result,
        };
        assert!(force_steam_loaded(&ctx(), &mut inv).is_ok());
    }

    // ── spoof_* ──

    #[test]
    fn spoof_steam_id_keeps_wrapper() {
        let target = target("get_SteamId");
        let mut result = steam_id(5);
        let mut inv = Invocation {
            target: &target,
            instance: None,
            args: &mut [],
            result: &mut result,
        };
        spoof_steam_id(&ctx(), &mut inv).unwrap();
        assert_eq!(result, steam_id(SPOOFED));
    }

    #[test]
    fn spoof_steam_id_plain_numbers() {
        for start in [Value::UInt(5), Value::Null] {
            let target = target("get_SteamId");
            let mut result = start;
            let mut inv = Invocation {
                target: &target,
                instance: None,
                args: &mut [],
                result: &mut result,
            };
            spoof_steam_id(&ctx(), &mut inv).unwrap();
            assert_eq!(result, Value::UInt(SPOOFED));
        }
    }

    #[test]
    fn spoof_steam_id_rejects_strings() {
        let target = target("get_SteamId");
        let mut result = Value::from("76561198000000001");
        let mut inv = Invocation {
            target: &target,
            instance: None,
            args: &mut [],
            result: &mut result,
        };
        assert!(spoof_steam_id(&ctx(), &mut inv).is_err());
    }

    #[test]
    fn spoof_account_name_replaces_string() {
        let target = target("get_Name");
        let mut result = Value::from("SomeoneElse");
        let mut inv = Invocation {
            target: &target,
            instance: None,
            args: &mut [],
            result: &mut result,
        };
        spoof_account_name(&ctx(), &mut inv).unwrap();
        assert_eq!(result, Value::from("Player 2"));
    }

    // ── fake_auth_ticket ──

    #[test]
    fn ticket_carries_spoofed_id_and_skips() {
        let ctx = ctx();
        let target = target("GetSteamAuthTicket");
        let mut result = Value::Null;
        let mut inv = Invocation {
            target: &target,
            instance: None,
            args: &mut [],
            result: &mut result,
        };
        assert_eq!(fake_auth_ticket(&ctx, &mut inv).unwrap(), Flow::Skip);
        let hex = result.as_str().unwrap().to_string();
        assert_eq!(hex.len(), 448);
        assert_eq!(steam_id_from_hex(&hex), Some(SPOOFED));
    }

    #[test]
    fn ticket_is_identical_across_calls() {
        let ctx = ctx();
        let target = target("GetSteamAuthTicket");
        let mut first = Value::Null;
        let mut second = Value::Null;
        for slot in [&mut first, &mut second] {
            let mut inv = Invocation {
                target: &target,
                instance: None,
                args: &mut [],
                result: slot,
            };
            fake_auth_ticket(&ctx, &mut inv).unwrap();
        }
        assert_eq!(first, second);
    }
}
