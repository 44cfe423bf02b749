//! Host object model seam
//!
//! The engine never talks to the host runtime directly. Type discovery,
//! live instance access and hook installation all go through the traits
//! below, so the same resolver and action library work against a CLR
//! bridge, a runtime type table or the in-memory host used by the tests.
//!
//! ## Module Structure
//! - `types.rs`: Value, member descriptors, Invocation, Flow
//! - `memory.rs`: In-memory reference host

pub mod memory;
mod types;

pub use types::{
    CallableId, FieldDesc, Flow, Invocation, MethodDesc, PropertyDesc, StructValue, TargetInfo,
    Value, Visibility,
};

use std::sync::Arc;
use thiserror::Error;

pub type ModuleRef = Arc<dyn HostModule>;
pub type TypeRef = Arc<dyn HostType>;
pub type ObjectRef = Arc<dyn HostObject>;

/// Before-hook: runs ahead of the original body and may veto it
pub type Prefix = Arc<dyn Fn(&mut Invocation<'_>) -> Flow + Send + Sync>;
/// After-hook: runs after the original body (or after a veto) and may replace the result
pub type Postfix = Arc<dyn Fn(&mut Invocation<'_>) + Send + Sync>;

pub type HostResult<T> = Result<T, HostError>;

/// Faults reported by the host while introspecting or mutating its objects
#[derive(Debug, Error)]
pub enum HostError {
    #[error("module '{module}' refused introspection: {reason}")]
    Introspection { module: String, reason: String },

    #[error("'{type_name}' has no member '{member}'")]
    MissingMember { type_name: String, member: String },

    #[error("member '{member}' holds {expected}, cannot store {found}")]
    TypeMismatch {
        member: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("failed to install hooks on {target}: {reason}")]
    Install { target: String, reason: String },
}

/// The set of modules currently loaded into the host process
pub trait ObjectModel {
    /// Loaded modules in the host's enumeration order
    fn modules(&self) -> Vec<ModuleRef>;
}

/// One loaded module (assembly, shared object, script package...)
pub trait HostModule: Send + Sync {
    fn name(&self) -> &str;

    /// All types defined by this module. Some modules refuse introspection
    /// and report an error. A bridge that panics here is skipped by the
    /// resolver like a refusing module.
    fn types(&self) -> HostResult<Vec<TypeRef>>;
}

/// A loaded type. Member lists contain declared members only; inherited
/// members are reached through `base_type`.
pub trait HostType: Send + Sync {
    /// Simple name, e.g. `SteamClient`
    fn name(&self) -> &str;

    /// Namespace-qualified name, e.g. `Steamworks.SteamClient`
    fn full_name(&self) -> &str;

    fn base_type(&self) -> Option<TypeRef>;

    /// True for the universal root type every other type derives from
    fn is_root(&self) -> bool;

    fn methods(&self) -> Vec<MethodDesc>;
    fn properties(&self) -> Vec<PropertyDesc>;
    fn fields(&self) -> Vec<FieldDesc>;
}

/// A live instance on the host heap
pub trait HostObject: Send + Sync {
    fn type_name(&self) -> &str;

    /// Current field value, `None` if the instance has no such field
    fn field(&self, name: &str) -> Option<Value>;
    fn set_field(&self, name: &str, value: Value) -> HostResult<()>;

    /// Current property value, `None` if the instance has no such property
    fn property(&self, name: &str) -> Option<Value>;
    fn set_property(&self, name: &str, value: Value) -> HostResult<()>;
}

/// The host's interception facility
///
/// After `install`, every future call of the target runs each prefix first
/// (any of which may skip the original body), then the original body unless
/// skipped, then each postfix. The result slot starts out holding the return
/// type's default, which is what a skipped call returns unless a hook writes
/// something else.
pub trait Interceptor {
    fn install(
        &mut self,
        target: &TargetInfo,
        prefix: Option<Prefix>,
        postfix: Option<Postfix>,
    ) -> HostResult<()>;

    /// Remove every hook this interceptor installed
    fn uninstall_all(&mut self);
}
