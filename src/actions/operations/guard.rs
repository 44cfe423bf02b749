//! Hook boundary
//!
//! Every action body returns a `HookResult`. The wrappers here turn that
//! into the plain `Prefix`/`Postfix` the interceptor expects: bodies only
//! run once configuration is loaded, and errors or panics are logged and
//! then dropped. A failed before-hook always lets the original body run.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::error;

use crate::actions::context::PatchContext;
use crate::actions::types::HookResult;
use crate::host::{Flow, Invocation, Postfix, Prefix};

pub fn guard_prefix<F>(tag: &'static str, ctx: &Arc<PatchContext>, body: F) -> Prefix
where
    F: Fn(&PatchContext, &mut Invocation<'_>) -> HookResult<Flow> + Send + Sync + 'static,
{
    let ctx = Arc::clone(ctx);
    Arc::new(move |inv: &mut Invocation<'_>| {
        if !ctx.is_ready() {
            return Flow::Continue;
        }
        match panic::catch_unwind(AssertUnwindSafe(|| body(&*ctx, inv))) {
            Ok(Ok(flow)) => flow,
            Ok(Err(e)) => {
                error!("[{}] Error on {}: {}", tag, inv.target.qualified_name(), e);
                Flow::Continue
            }
            Err(payload) => {
                error!(
                    "[{}] Panicked on {}: {}",
                    tag,
                    inv.target.qualified_name(),
                    panic_message(payload.as_ref())
                );
                Flow::Continue
            }
        }
    })
}

pub fn guard_postfix<F>(tag: &'static str, ctx: &Arc<PatchContext>, body: F) -> Postfix
where
    F: Fn(&PatchContext, &mut Invocation<'_>) -> HookResult<()> + Send + Sync + 'static,
{
    let ctx = Arc::clone(ctx);
    Arc::new(move |inv: &mut Invocation<'_>| {
        if !ctx.is_ready() {
            return;
        }
        match panic::catch_unwind(AssertUnwindSafe(|| body(&*ctx, inv))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!("[{}] Error on {}: {}", tag, inv.target.qualified_name(), e);
            }
            Err(payload) => {
                error!(
                    "[{}] Panicked on {}: {}",
                    tag,
                    inv.target.qualified_name(),
                    panic_message(payload.as_ref())
                );
            }
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
