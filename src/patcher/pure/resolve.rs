// Target resolution by name across loaded modules

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::debug;

use crate::host::{MethodDesc, ObjectModel, PropertyDesc, TypeRef};
use crate::patcher::types::{MemberKind, ResolvedTarget};

/// Name-based lookup over the host's loaded type set
pub struct Resolver<'a> {
    model: &'a dyn ObjectModel,
}

impl<'a> Resolver<'a> {
    pub fn new(model: &'a dyn ObjectModel) -> Self {
        Self { model }
    }

    /// Find a type by name across all loaded modules.
    ///
    /// A case-insensitive full-name match anywhere wins over a simple-name
    /// match. Among simple-name matches the first in module order wins.
    /// Modules that refuse introspection, or fault while enumerating, are
    /// skipped.
    pub fn find_type(&self, name: &str) -> Option<TypeRef> {
        let mut listed: Vec<Vec<TypeRef>> = Vec::new();
        for module in self.model.modules() {
            match panic::catch_unwind(AssertUnwindSafe(|| module.types())) {
                Ok(Ok(types)) => listed.push(types),
                Ok(Err(e)) => debug!("[runtime_patcher] Skipping module {}: {}", module.name(), e),
                Err(_) => debug!(
                    "[runtime_patcher] Skipping module {}: panicked while listing types",
                    module.name()
                ),
            }
        }

        listed
            .iter()
            .flatten()
            .find(|t| t.full_name().eq_ignore_ascii_case(name))
            .or_else(|| listed.iter().flatten().find(|t| t.name() == name))
            .cloned()
    }

    /// Find a method by name on `ty` or, failing that, its base types.
    /// Overloads resolve to the first declared.
    pub fn find_method(&self, ty: &TypeRef, name: &str) -> Option<ResolvedTarget> {
        walk_hierarchy(ty, |t| t.methods().into_iter().find(|m| m.name == name)).map(
            |(declaring_type, callable)| ResolvedTarget {
                declaring_type,
                callable,
            },
        )
    }

    pub fn find_property_getter(&self, ty: &TypeRef, name: &str) -> Option<ResolvedTarget> {
        find_accessor(ty, name, |p| p.getter)
    }

    pub fn find_property_setter(&self, ty: &TypeRef, name: &str) -> Option<ResolvedTarget> {
        find_accessor(ty, name, |p| p.setter)
    }

    pub fn find_member(&self, ty: &TypeRef, member: &MemberKind) -> Option<ResolvedTarget> {
        match member {
            MemberKind::Method(name) => self.find_method(ty, name),
            MemberKind::PropertyGetter(name) => self.find_property_getter(ty, name),
            MemberKind::PropertySetter(name) => self.find_property_setter(ty, name),
        }
    }
}

/// The nearest property with this name decides; a property without the
/// wanted accessor does not fall through to a base type.
fn find_accessor(
    ty: &TypeRef,
    name: &str,
    pick: impl Fn(PropertyDesc) -> Option<MethodDesc>,
) -> Option<ResolvedTarget> {
    let (declaring_type, property) =
        walk_hierarchy(ty, |t| t.properties().into_iter().find(|p| p.name == name))?;
    pick(property).map(|callable| ResolvedTarget {
        declaring_type,
        callable,
    })
}

/// Try `ty` itself, then each base type up to (not including) the root type
fn walk_hierarchy<T>(
    ty: &TypeRef,
    lookup: impl Fn(&TypeRef) -> Option<T>,
) -> Option<(TypeRef, T)> {
    if let Some(hit) = lookup(ty) {
        return Some((Arc::clone(ty), hit));
    }

    let mut base = ty.base_type();
    while let Some(current) = base {
        if current.is_root() {
            break;
        }
        if let Some(hit) = lookup(&current) {
            return Some((current, hit));
        }
        base = current.base_type();
    }
    None
}
