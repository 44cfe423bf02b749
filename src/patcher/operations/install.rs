//! Hook installation

use crate::actions::ActionBinding;
use crate::host::{HostError, HostResult, Interceptor, TargetInfo};

/// Bind an action's hooks to a resolved callable
pub fn install_binding(
    interceptor: &mut dyn Interceptor,
    target: &TargetInfo,
    binding: &ActionBinding,
) -> HostResult<()> {
    if binding.is_none() {
        return Err(HostError::Install {
            target: target.qualified_name(),
            reason: "action has no hooks".to_string(),
        });
    }
    interceptor.install(target, binding.prefix.clone(), binding.postfix.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, PatchContext};
    use crate::host::CallableId;
    use crate::host::memory::MemoryInterceptor;
    use std::sync::Arc;

    fn target() -> TargetInfo {
        TargetInfo {
            id: CallableId(11),
            declaring_type: "SteamManager".to_string(),
            name: "DoSteam".to_string(),
        }
    }

    #[test]
    fn installs_prefix_and_postfix() {
        let ctx = Arc::new(PatchContext::passthrough());
        let mut interceptor = MemoryInterceptor::new();
        install_binding(&mut interceptor, &target(), &Action::Skip.binding(&ctx)).unwrap();
        assert_eq!(interceptor.hook_count(CallableId(11)), 1);
    }

    #[test]
    fn empty_binding_is_refused() {
        let mut interceptor = MemoryInterceptor::new();
        let err = install_binding(&mut interceptor, &target(), &ActionBinding::none());
        assert!(matches!(err, Err(HostError::Install { .. })));
        assert_eq!(interceptor.hooked_targets(), 0);
    }
}
