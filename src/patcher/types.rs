//! Patcher type definitions

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::host::{MethodDesc, TargetInfo, TypeRef};

/// Raw `patch.<index>.<field>` declarations grouped by index
pub type PatchFields = BTreeMap<u32, BTreeMap<String, String>>;

/// Which member of the target type a patch applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method(String),
    PropertyGetter(String),
    /// Not expressible in config; used by the built-in presets
    PropertySetter(String),
}

impl MemberKind {
    pub fn name(&self) -> &str {
        match self {
            MemberKind::Method(name)
            | MemberKind::PropertyGetter(name)
            | MemberKind::PropertySetter(name) => name,
        }
    }
}

/// One declarative rule: apply `action` to `member` of `target_type`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatchSpec {
    /// Full or simple type name (e.g. "SteamManager", "Steamworks.SteamClient")
    pub target_type: String,
    pub member: MemberKind,
    /// Action name from the action library
    pub action: String,
}

impl PatchSpec {
    pub fn method(target_type: &str, method: &str, action: &str) -> Self {
        Self {
            target_type: target_type.to_string(),
            member: MemberKind::Method(method.to_string()),
            action: action.to_string(),
        }
    }

    pub fn property(target_type: &str, property: &str, action: &str) -> Self {
        Self {
            target_type: target_type.to_string(),
            member: MemberKind::PropertyGetter(property.to_string()),
            action: action.to_string(),
        }
    }

    pub fn setter(target_type: &str, property: &str, action: &str) -> Self {
        Self {
            target_type: target_type.to_string(),
            member: MemberKind::PropertySetter(property.to_string()),
            action: action.to_string(),
        }
    }

    /// `Class.Method()` for methods, `Class.Property` for accessors
    pub fn target_label(&self) -> String {
        match &self.member {
            MemberKind::Method(name) => format!("{}.{}()", self.target_type, name),
            MemberKind::PropertyGetter(name) => format!("{}.{}", self.target_type, name),
            MemberKind::PropertySetter(name) => format!("{}.{} (set)", self.target_type, name),
        }
    }
}

impl fmt::Display for PatchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.target_label(), self.action)
    }
}

/// A located callable. Only exists for members that were actually found.
#[derive(Clone)]
pub struct ResolvedTarget {
    /// Type the callable was found on (may be a base of the requested type)
    pub declaring_type: TypeRef,
    pub callable: MethodDesc,
}

impl ResolvedTarget {
    pub fn info(&self) -> TargetInfo {
        TargetInfo {
            id: self.callable.id,
            declaring_type: self.declaring_type.full_name().to_string(),
            name: self.callable.name.clone(),
        }
    }
}

impl fmt::Debug for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedTarget")
            .field("declaring_type", &self.declaring_type.full_name())
            .field("callable", &self.callable)
            .finish()
    }
}

impl PartialEq for ResolvedTarget {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.declaring_type, &other.declaring_type) && self.callable == other.callable
    }
}

/// Result of applying a single PatchSpec
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    Applied,
    /// The same action is already bound to this callable
    AlreadyApplied,
    TypeNotFound,
    MemberNotFound,
    UnknownAction,
    InstallFailed(String),
}

impl PatchOutcome {
    pub fn is_bound(&self) -> bool {
        matches!(self, PatchOutcome::Applied | PatchOutcome::AlreadyApplied)
    }
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchOutcome::Applied => write!(f, "applied"),
            PatchOutcome::AlreadyApplied => write!(f, "already applied"),
            PatchOutcome::TypeNotFound => write!(f, "class not found"),
            PatchOutcome::MemberNotFound => write!(f, "target not found"),
            PatchOutcome::UnknownAction => write!(f, "unknown action"),
            PatchOutcome::InstallFailed(reason) => write!(f, "install failed: {}", reason),
        }
    }
}

/// Per-entry outcomes of one batch, in application order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub entries: Vec<(PatchSpec, PatchOutcome)>,
}

impl ApplyReport {
    pub fn applied(&self) -> usize {
        self.count(|o| *o == PatchOutcome::Applied)
    }

    pub fn failed(&self) -> usize {
        self.count(|o| !o.is_bound())
    }

    pub fn outcome(&self, spec: &PatchSpec) -> Option<&PatchOutcome> {
        self.entries.iter().find(|(s, _)| s == spec).map(|(_, o)| o)
    }

    fn count(&self, pred: impl Fn(&PatchOutcome) -> bool) -> usize {
        self.entries.iter().filter(|(_, o)| pred(o)).count()
    }
}
