//! Apply orchestration
//!
//! Resolves each spec against the live object model and installs the
//! requested action. Every miss is logged and reported per entry; nothing
//! here aborts the batch.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::actions::{Action, PatchContext, lookup};
use crate::host::{CallableId, Interceptor, ObjectModel};

use super::super::operations::install_binding;
use super::super::pure::{Resolver, describe_type_members};
use super::super::types::{ApplyReport, PatchOutcome, PatchSpec};

/// Owns the interceptor for the lifetime of the installed hooks.
/// Dropping the patcher uninstalls everything it installed.
pub struct Patcher {
    model: Arc<dyn ObjectModel>,
    interceptor: Box<dyn Interceptor>,
    context: Arc<PatchContext>,
    applied: HashSet<(CallableId, Action)>,
}

impl Patcher {
    pub fn new(
        model: Arc<dyn ObjectModel>,
        interceptor: Box<dyn Interceptor>,
        context: Arc<PatchContext>,
    ) -> Self {
        Self {
            model,
            interceptor,
            context,
            applied: HashSet::new(),
        }
    }

    pub fn context(&self) -> &Arc<PatchContext> {
        &self.context
    }

    /// Number of (callable, action) pairs currently bound
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// Apply every spec in order, continuing past failures
    pub fn apply_all(&mut self, specs: &[PatchSpec]) -> ApplyReport {
        let mut report = ApplyReport::default();
        if specs.is_empty() {
            info!("[runtime_patcher] No runtime patches to apply");
            return report;
        }

        info!("[runtime_patcher] Applying {} runtime patches...", specs.len());
        for spec in specs {
            let outcome = self.apply_guarded(spec);
            report.entries.push((spec.clone(), outcome));
        }
        info!(
            "[runtime_patcher] Done applying runtime patches ({} applied, {} failed)",
            report.applied(),
            report.failed()
        );
        report
    }

    /// `apply`, with a host fault during resolution or installation turned
    /// into an `InstallFailed` outcome instead of unwinding into the caller
    pub fn apply_guarded(&mut self, spec: &PatchSpec) -> PatchOutcome {
        match panic::catch_unwind(AssertUnwindSafe(|| self.apply(spec))) {
            Ok(outcome) => outcome,
            Err(_) => {
                error!("[runtime_patcher] Failed to apply patch {}: panicked", spec);
                PatchOutcome::InstallFailed("panicked".to_string())
            }
        }
    }

    /// Resolve one spec and bind its action
    pub fn apply(&mut self, spec: &PatchSpec) -> PatchOutcome {
        let resolver = Resolver::new(self.model.as_ref());

        let Some(ty) = resolver.find_type(&spec.target_type) else {
            warn!("[runtime_patcher] Class not found: {}", spec.target_type);
            return PatchOutcome::TypeNotFound;
        };

        let binding = lookup(&spec.action, &self.context);
        let Some(action) = binding.action.filter(|_| !binding.is_none()) else {
            return PatchOutcome::UnknownAction;
        };

        let Some(target) = resolver.find_member(&ty, &spec.member) else {
            warn!("[runtime_patcher] Target not found: {}", spec.target_label());
            for line in describe_type_members(ty.as_ref(), &spec.target_type) {
                debug!("{}", line);
            }
            return PatchOutcome::MemberNotFound;
        };

        let info = target.info();
        if self.applied.contains(&(info.id, action)) {
            debug!("[runtime_patcher] {} already bound to {}", action, info.qualified_name());
            return PatchOutcome::AlreadyApplied;
        }

        match install_binding(self.interceptor.as_mut(), &info, &binding) {
            Ok(()) => {
                self.applied.insert((info.id, action));
                info!("[runtime_patcher] Applied {} to {}", action, spec.target_label());
                PatchOutcome::Applied
            }
            Err(e) => {
                error!("[runtime_patcher] Failed to apply patch {}: {}", spec, e);
                PatchOutcome::InstallFailed(e.to_string())
            }
        }
    }

    /// Remove every installed hook
    pub fn unpatch_all(&mut self) {
        if self.applied.is_empty() {
            return;
        }
        info!("[runtime_patcher] Removing {} patches", self.applied.len());
        self.interceptor.uninstall_all();
        self.applied.clear();
    }
}

impl Drop for Patcher {
    fn drop(&mut self) {
        self.unpatch_all();
    }
}
