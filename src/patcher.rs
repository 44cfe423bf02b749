//! Runtime patcher
//!
//! Applies game-specific patches declared in config: finds the target type
//! and member by name in whatever is loaded, looks up the requested action
//! and binds its hooks through the host's interceptor. A miss is logged and
//! skipped; it never stops the rest of the batch.
//!
//! ## Module Structure
//! - `types.rs`: PatchSpec, MemberKind, ResolvedTarget, PatchOutcome, ApplyReport
//! - `pure/`: Spec building, target resolution, member dumps
//! - `operations/`: Hook installation
//! - `pipelines/`: Patcher (apply / unpatch orchestration)

mod operations;
mod pipelines;
pub mod pure;
#[cfg(test)]
mod tests;
mod types;

pub use pipelines::Patcher;
pub use pure::{Resolver, build_patch_specs, describe_type_members};
pub use types::{ApplyReport, MemberKind, PatchFields, PatchOutcome, PatchSpec, ResolvedTarget};
