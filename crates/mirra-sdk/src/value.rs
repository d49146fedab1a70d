//! Dynamic value model
//!
//! [`Value`] is the representation that crosses the descriptor boundary:
//! field reads produce one, field writes and method arguments consume
//! them, and the empty-value synthesizer manufactures them. It is a plain
//! tagged enum — values here never cross an ABI, so there is nothing to
//! NaN-box.
//!
//! [`ObjRef`] is a shared handle to a dynamic instance of an
//! application-defined type: the receiver of every field access and
//! method invocation, and the output of every constructor.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::types::TypeKey;

/// A dynamic value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absence marker
    Null,
    /// Boolean
    Bool(bool),
    /// Character
    Char(char),
    /// Integer (all integer primitives surface as `i64`)
    Int(i64),
    /// Floating-point (all float primitives surface as `f64`)
    Float(f64),
    /// Textual
    Str(String),
    /// Insertion-ordered collection
    List(Vec<Value>),
    /// Insertion-ordered map
    Map(IndexMap<String, Value>),
    /// Optional container
    Opt(Option<Box<Value>>),
    /// A dynamic instance of an application-defined type
    Object(ObjRef),
}

impl Value {
    /// Textual value from anything string-like.
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Optional container value.
    pub fn opt(inner: Option<Value>) -> Self {
        Value::Opt(inner.map(Box::new))
    }

    // ========================================================================
    // Type checks and extractors
    // ========================================================================

    /// Check for the absence marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Extract a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract a character.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Extract an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Extract a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Borrow the textual payload.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the list payload.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the map payload.
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Borrow the object payload.
    pub fn as_object(&self) -> Option<&ObjRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Runtime type identity of this value.
    ///
    /// This is what signature derivation from arguments uses: the declared
    /// parameter type of a member must match these keys exactly for the
    /// derived-signature lookup paths to resolve it.
    pub fn type_key(&self) -> TypeKey {
        match self {
            Value::Null => TypeKey::null(),
            Value::Bool(_) => TypeKey::of::<bool>(),
            Value::Char(_) => TypeKey::of::<char>(),
            Value::Int(_) => TypeKey::of::<i64>(),
            Value::Float(_) => TypeKey::of::<f64>(),
            Value::Str(_) => TypeKey::of::<String>(),
            Value::List(_) => TypeKey::of::<Vec<Value>>(),
            Value::Map(_) => TypeKey::of::<IndexMap<String, Value>>(),
            Value::Opt(_) => TypeKey::of::<Option<Value>>(),
            Value::Object(obj) => obj.type_key().clone(),
        }
    }

    /// Short kind name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Opt(_) => "opt",
            Value::Object(_) => "object",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

/// Shared handle to a dynamic instance of an application-defined type.
///
/// The instance lives behind an `RwLock`; descriptor handles receive it as
/// `&dyn Any` / `&mut dyn Any` and downcast to their concrete type. The
/// owning type's identity is captured at construction so dispatch can
/// resolve members on the instance's runtime type.
#[derive(Clone)]
pub struct ObjRef {
    key: TypeKey,
    inner: Arc<RwLock<Box<dyn Any + Send + Sync>>>,
}

impl ObjRef {
    /// Wrap a concrete instance.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        ObjRef {
            key: TypeKey::of::<T>(),
            inner: Arc::new(RwLock::new(Box::new(value))),
        }
    }

    /// Runtime type identity of the instance.
    pub fn type_key(&self) -> &TypeKey {
        &self.key
    }

    /// Run `f` with shared access to the instance.
    pub fn with<R>(&self, f: impl FnOnce(&dyn Any) -> R) -> R {
        let guard = self.inner.read();
        let instance: &dyn Any = &**guard;
        f(instance)
    }

    /// Run `f` with exclusive access to the instance.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut dyn Any) -> R) -> R {
        let mut guard = self.inner.write();
        let instance: &mut dyn Any = &mut **guard;
        f(instance)
    }

    /// Whether two handles refer to the same instance.
    pub fn same_instance(a: &ObjRef, b: &ObjRef) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl PartialEq for ObjRef {
    fn eq(&self, other: &Self) -> bool {
        ObjRef::same_instance(self, other)
    }
}

impl fmt::Debug for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjRef({})", self.key.name())
    }
}
