//! Host-facing value and descriptor types

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::ObjectRef;

/// Opaque handle to a callable, as understood by the host's interceptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallableId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Internal,
    Private,
}

impl Visibility {
    pub fn label(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Internal => "internal",
            Visibility::Private => "private",
        }
    }
}

/// A declared method (or property accessor)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDesc {
    pub id: CallableId,
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDesc {
    pub name: String,
    pub type_name: String,
    pub getter: Option<MethodDesc>,
    pub setter: Option<MethodDesc>,
}

impl PropertyDesc {
    /// Static if either accessor is static
    pub fn is_static(&self) -> bool {
        self.getter
            .as_ref()
            .or(self.setter.as_ref())
            .is_some_and(|m| m.is_static)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDesc {
    pub name: String,
    pub type_name: String,
    pub visibility: Visibility,
    pub is_static: bool,
}

/// Identifies an intercepted callable to the hooks running on it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetInfo {
    pub id: CallableId,
    /// Full name of the type that declares the callable
    pub declaring_type: String,
    pub name: String,
}

impl TargetInfo {
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.declaring_type, self.name)
    }
}

/// Value-type instance, copied rather than shared
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    pub type_name: String,
    pub fields: BTreeMap<String, Value>,
}

impl StructValue {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }
}

/// A value crossing the host boundary: arguments, results, fields
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Byte(u8),
    Int(i64),
    UInt(u64),
    Str(String),
    Struct(StructValue),
    Object(ObjectRef),
}

impl Value {
    /// Short name of the variant, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Byte(_) => "byte",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Str(_) => "string",
            Value::Struct(_) => "struct",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(v) => Some(*v),
            Value::Byte(v) => Some(u64::from(*v)),
            Value::Int(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => a == b,
            // Host objects compare by identity
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(v) => write!(f, "Bool({v})"),
            Value::Byte(v) => write!(f, "Byte({v})"),
            Value::Int(v) => write!(f, "Int({v})"),
            Value::UInt(v) => write!(f, "UInt({v})"),
            Value::Str(v) => write!(f, "Str({v:?})"),
            Value::Struct(v) => write!(f, "Struct({v:?})"),
            Value::Object(o) => write!(f, "Object(<{}>)", o.type_name()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v}"),
            Value::Struct(s) => {
                write!(f, "{} {{", s.type_name)?;
                for (i, (name, value)) in s.fields.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{name}: {value}")?;
                }
                write!(f, " }}")
            }
            Value::Object(o) => write!(f, "<{}>", o.type_name()),
        }
    }
}

/// Verdict of a before-hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Let the original body run
    Continue,
    /// Suppress the original body; the caller receives the current result
    /// slot. Hosts pre-fill that slot with the return type's default before
    /// the first prefix runs, so a bare skip yields that default.
    Skip,
}

/// What a hook sees of one intercepted call
pub struct Invocation<'a> {
    pub target: &'a TargetInfo,
    /// Receiver, `None` for static callables
    pub instance: Option<&'a ObjectRef>,
    pub args: &'a mut [Value],
    pub result: &'a mut Value,
}
