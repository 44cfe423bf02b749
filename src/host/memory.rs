//! In-memory reference host
//!
//! Every host trait implemented over plain Rust values. Types and modules are
//! built up front, objects hold their fields behind a mutex, and
//! `MemoryInterceptor::invoke` runs installed hooks around a caller-supplied
//! original body with the same prefix/original/postfix contract a real
//! interception facility provides.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{
    CallableId, FieldDesc, Flow, HostError, HostModule, HostObject, HostResult, HostType,
    Interceptor, Invocation, MethodDesc, ModuleRef, ObjectModel, Postfix, Prefix, PropertyDesc,
    TargetInfo, TypeRef, Value, Visibility,
};

static NEXT_CALLABLE: AtomicU64 = AtomicU64::new(1);

fn next_callable() -> CallableId {
    CallableId(NEXT_CALLABLE.fetch_add(1, Ordering::Relaxed))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Types and modules ───────────────────────────────────────────

/// Type definition builder
pub struct MemoryType {
    name: String,
    full_name: String,
    base: Option<TypeRef>,
    root: bool,
    methods: Vec<MethodDesc>,
    properties: Vec<PropertyDesc>,
    fields: Vec<FieldDesc>,
}

impl MemoryType {
    /// `full_name` is namespace-qualified; the simple name is its last segment
    pub fn new(full_name: &str) -> Self {
        let name = full_name.rsplit('.').next().unwrap_or(full_name);
        Self {
            name: name.to_string(),
            full_name: full_name.to_string(),
            base: None,
            root: false,
            methods: Vec::new(),
            properties: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// The universal root type (`System.Object` on the CLR)
    pub fn root(full_name: &str) -> Self {
        let mut ty = Self::new(full_name);
        ty.root = true;
        ty
    }

    pub fn with_base(mut self, base: &TypeRef) -> Self {
        self.base = Some(Arc::clone(base));
        self
    }

    pub fn with_method(mut self, name: &str, visibility: Visibility, is_static: bool) -> Self {
        self.methods.push(MethodDesc {
            id: next_callable(),
            name: name.to_string(),
            visibility,
            is_static,
        });
        self
    }

    /// Adds a property plus its `get_`/`set_` accessors as methods
    pub fn with_property(
        mut self,
        name: &str,
        type_name: &str,
        has_getter: bool,
        has_setter: bool,
        is_static: bool,
    ) -> Self {
        let accessor = |prefix: &str| MethodDesc {
            id: next_callable(),
            name: format!("{prefix}{name}"),
            visibility: Visibility::Public,
            is_static,
        };
        let getter = has_getter.then(|| accessor("get_"));
        let setter = has_setter.then(|| accessor("set_"));
        self.methods.extend(getter.iter().chain(setter.iter()).cloned());
        self.properties.push(PropertyDesc {
            name: name.to_string(),
            type_name: type_name.to_string(),
            getter,
            setter,
        });
        self
    }

    pub fn with_field(
        mut self,
        name: &str,
        type_name: &str,
        visibility: Visibility,
        is_static: bool,
    ) -> Self {
        self.fields.push(FieldDesc {
            name: name.to_string(),
            type_name: type_name.to_string(),
            visibility,
            is_static,
        });
        self
    }

    pub fn build(self) -> TypeRef {
        Arc::new(self)
    }
}

impl HostType for MemoryType {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn base_type(&self) -> Option<TypeRef> {
        self.base.clone()
    }

    fn is_root(&self) -> bool {
        self.root
    }

    fn methods(&self) -> Vec<MethodDesc> {
        self.methods.clone()
    }

    fn properties(&self) -> Vec<PropertyDesc> {
        self.properties.clone()
    }

    fn fields(&self) -> Vec<FieldDesc> {
        self.fields.clone()
    }
}

/// Handle of a declared method, for driving `MemoryInterceptor::invoke`
pub fn method_id(ty: &TypeRef, name: &str) -> Option<CallableId> {
    ty.methods().into_iter().find(|m| m.name == name).map(|m| m.id)
}

pub fn getter_id(ty: &TypeRef, property: &str) -> Option<CallableId> {
    ty.properties()
        .into_iter()
        .find(|p| p.name == property)
        .and_then(|p| p.getter)
        .map(|m| m.id)
}

pub fn setter_id(ty: &TypeRef, property: &str) -> Option<CallableId> {
    ty.properties()
        .into_iter()
        .find(|p| p.name == property)
        .and_then(|p| p.setter)
        .map(|m| m.id)
}

/// How a module answers a request for its type list
enum Introspection {
    Open,
    Refused(String),
    Faults(String),
}

pub struct MemoryModule {
    name: String,
    types: Vec<TypeRef>,
    introspection: Introspection,
}

impl MemoryModule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            types: Vec::new(),
            introspection: Introspection::Open,
        }
    }

    /// A module whose type list cannot be read
    pub fn refusing(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            types: Vec::new(),
            introspection: Introspection::Refused(reason.to_string()),
        }
    }

    /// A module whose type enumeration panics, like a bridge tripping over
    /// a broken image
    pub fn faulting(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            types: Vec::new(),
            introspection: Introspection::Faults(message.to_string()),
        }
    }

    pub fn with_type(mut self, ty: &TypeRef) -> Self {
        self.types.push(Arc::clone(ty));
        self
    }

    pub fn build(self) -> ModuleRef {
        Arc::new(self)
    }
}

impl HostModule for MemoryModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn types(&self) -> HostResult<Vec<TypeRef>> {
        match &self.introspection {
            Introspection::Open => Ok(self.types.clone()),
            Introspection::Refused(reason) => Err(HostError::Introspection {
                module: self.name.clone(),
                reason: reason.clone(),
            }),
            Introspection::Faults(message) => panic!("{}: {}", self.name, message),
        }
    }
}

#[derive(Default)]
pub struct MemoryModel {
    modules: Vec<ModuleRef>,
}

impl MemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, module: ModuleRef) -> Self {
        self.modules.push(module);
        self
    }
}

impl ObjectModel for MemoryModel {
    fn modules(&self) -> Vec<ModuleRef> {
        self.modules.clone()
    }
}

// ── Objects ─────────────────────────────────────────────────────

/// Live instance with named fields and properties
pub struct MemoryObject {
    type_name: String,
    fields: Mutex<BTreeMap<String, Value>>,
    properties: Mutex<BTreeMap<String, Value>>,
}

impl MemoryObject {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            fields: Mutex::new(BTreeMap::new()),
            properties: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn with_field(self, name: &str, value: Value) -> Self {
        lock(&self.fields).insert(name.to_string(), value);
        self
    }

    pub fn with_property(self, name: &str, value: Value) -> Self {
        lock(&self.properties).insert(name.to_string(), value);
        self
    }

    fn store(
        &self,
        slots: &Mutex<BTreeMap<String, Value>>,
        name: &str,
        value: Value,
    ) -> HostResult<()> {
        let mut slots = lock(slots);
        let Some(slot) = slots.get_mut(name) else {
            return Err(HostError::MissingMember {
                type_name: self.type_name.clone(),
                member: name.to_string(),
            });
        };
        // Null slots accept anything; otherwise the variant must match
        if !slot.is_null() && !value.is_null() && slot.kind() != value.kind() {
            return Err(HostError::TypeMismatch {
                member: name.to_string(),
                expected: slot.kind(),
                found: value.kind(),
            });
        }
        *slot = value;
        Ok(())
    }
}

impl HostObject for MemoryObject {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn field(&self, name: &str) -> Option<Value> {
        lock(&self.fields).get(name).cloned()
    }

    fn set_field(&self, name: &str, value: Value) -> HostResult<()> {
        self.store(&self.fields, name, value)
    }

    fn property(&self, name: &str) -> Option<Value> {
        lock(&self.properties).get(name).cloned()
    }

    fn set_property(&self, name: &str, value: Value) -> HostResult<()> {
        self.store(&self.properties, name, value)
    }
}

// ── Interception ────────────────────────────────────────────────

#[derive(Clone)]
struct Installed {
    target: TargetInfo,
    prefixes: Vec<Prefix>,
    postfixes: Vec<Postfix>,
}

/// Interceptor whose hooks run when the caller routes a call through `invoke`.
/// Clones share the same hook table.
#[derive(Clone, Default)]
pub struct MemoryInterceptor {
    installed: Arc<Mutex<HashMap<CallableId, Installed>>>,
}

impl MemoryInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of hooks (prefixes + postfixes) installed on a callable
    pub fn hook_count(&self, id: CallableId) -> usize {
        lock(&self.installed)
            .get(&id)
            .map_or(0, |i| i.prefixes.len() + i.postfixes.len())
    }

    pub fn hooked_targets(&self) -> usize {
        lock(&self.installed).len()
    }

    /// Call `id`, running any installed hooks around `original`.
    /// The result slot starts as `Value::Null`, the default for every
    /// return type in this host.
    pub fn invoke<F>(
        &self,
        id: CallableId,
        instance: Option<&super::ObjectRef>,
        args: &mut [Value],
        original: F,
    ) -> Value
    where
        F: FnOnce(Option<&super::ObjectRef>, &mut [Value]) -> Value,
    {
        // Hooks run outside the lock so they may call back into the host
        let installed = lock(&self.installed).get(&id).cloned();
        let Some(installed) = installed else {
            return original(instance, args);
        };

        let mut result = Value::Null;
        let mut run_original = true;

        for prefix in &installed.prefixes {
            let mut inv = Invocation {
                target: &installed.target,
                instance,
                args: &mut *args,
                result: &mut result,
            };
            if prefix(&mut inv) == Flow::Skip {
                run_original = false;
            }
        }

        if run_original {
            result = original(instance, args);
        }

        for postfix in &installed.postfixes {
            let mut inv = Invocation {
                target: &installed.target,
                instance,
                args: &mut *args,
                result: &mut result,
            };
            postfix(&mut inv);
        }

        result
    }
}

impl Interceptor for MemoryInterceptor {
    fn install(
        &mut self,
        target: &TargetInfo,
        prefix: Option<Prefix>,
        postfix: Option<Postfix>,
    ) -> HostResult<()> {
        if prefix.is_none() && postfix.is_none() {
            return Err(HostError::Install {
                target: target.qualified_name(),
                reason: "no hooks supplied".to_string(),
            });
        }

        let mut installed = lock(&self.installed);
        let entry = installed.entry(target.id).or_insert_with(|| Installed {
            target: target.clone(),
            prefixes: Vec::new(),
            postfixes: Vec::new(),
        });
        entry.prefixes.extend(prefix);
        entry.postfixes.extend(postfix);
        Ok(())
    }

    fn uninstall_all(&mut self) {
        lock(&self.installed).clear();
    }
}
