//! Result forcing, skipping and call tracing

use log::{debug, info};

use crate::actions::context::PatchContext;
use crate::actions::types::{HookError, HookResult};
use crate::host::{Flow, Invocation, Value};

/// Overwrite a bool result. Returns whether the value changed; only a
/// change is logged.
pub fn force_bool(tag: &str, inv: &mut Invocation<'_>, target: bool) -> HookResult<bool> {
    let current = inv
        .result
        .as_bool()
        .ok_or_else(|| HookError::UnexpectedValue {
            expected: "bool",
            found: inv.result.kind(),
        })?;
    if current == target {
        return Ok(false);
    }
    *inv.result = Value::Bool(target);
    debug!(
        "[{}] Forced {} result to {}",
        tag,
        inv.target.qualified_name(),
        if target { "TRUE" } else { "FALSE" }
    );
    Ok(true)
}

pub fn skip(_ctx: &PatchContext, inv: &mut Invocation<'_>) -> HookResult<Flow> {
    debug!("[skip] Skipping original {}", inv.target.qualified_name());
    Ok(Flow::Skip)
}

pub fn log_call(_ctx: &PatchContext, inv: &mut Invocation<'_>) -> HookResult<Flow> {
    info!("[log_call] {}() called", inv.target.qualified_name());
    Ok(Flow::Continue)
}
