//! Member declarations
//!
//! A type provider publishes its members as a [`TypeDecl`]: the full set
//! of declared fields, methods, and constructors, each carrying modifier
//! flags, annotations, and — where the provider chooses to bind them —
//! access handles closing over the concrete type. Handles are resolved
//! once, at declaration time; the engine reuses them for every subsequent
//! access, which is the entire point of caching the descriptors built
//! from these declarations.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::HandleResult;
use crate::types::{Signature, TypeKey};
use crate::value::{ObjRef, Value};

/// Bound field accessor: reads the field off a receiver.
pub type GetterFn = Arc<dyn Fn(&dyn Any) -> HandleResult<Value> + Send + Sync>;

/// Bound field mutator: writes a value into the field on a receiver.
pub type SetterFn = Arc<dyn Fn(&mut dyn Any, Value) -> HandleResult<()> + Send + Sync>;

/// Bound method invoker.
pub type InvokeFn = Arc<dyn Fn(&mut dyn Any, &[Value]) -> HandleResult<Value> + Send + Sync>;

/// Bound constructor.
pub type CtorFn = Arc<dyn Fn(&[Value]) -> HandleResult<ObjRef> + Send + Sync>;

/// How a type publishes its own declaration.
pub trait Describe: Any + Send + Sync {
    /// Produce the full member declaration for this type.
    fn describe() -> TypeDecl;
}

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Visible to every caller
    Public,
    /// Visible to the declaring type and its extensions
    Protected,
    /// Visible to the declaring type only
    Private,
}

/// Modifier flags of a declared member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifiers {
    /// Member visibility
    pub visibility: Visibility,
    /// Static member (no receiver)
    pub is_static: bool,
    /// Not reassignable after construction
    pub is_final: bool,
    /// Reads/writes bypass caching
    pub is_volatile: bool,
    /// Excluded from persistence
    pub is_transient: bool,
}

impl Modifiers {
    /// Public instance member with no flags set.
    pub fn new() -> Self {
        Modifiers {
            visibility: Visibility::Public,
            is_static: false,
            is_final: false,
            is_volatile: false,
            is_transient: false,
        }
    }

    /// Set the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as static.
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark as final.
    pub fn as_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Mark as volatile.
    pub fn as_volatile(mut self) -> Self {
        self.is_volatile = true;
        self
    }

    /// Mark as transient.
    pub fn as_transient(mut self) -> Self {
        self.is_transient = true;
        self
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Modifiers::new()
    }
}

/// An annotation attached to a member: a marker name plus optional
/// string parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    name: String,
    params: FxHashMap<String, String>,
}

impl Annotation {
    /// A bare marker annotation.
    pub fn marker(name: impl Into<String>) -> Self {
        Annotation {
            name: name.into(),
            params: FxHashMap::default(),
        }
    }

    /// Attach a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// The marker name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Declaration of one field.
#[derive(Clone)]
pub struct FieldDecl {
    /// Field name
    pub name: String,
    /// Declared value type
    pub value_type: TypeKey,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Annotations, in declaration order
    pub annotations: Vec<Annotation>,
    /// Bound accessor, if the provider chose to bind one
    pub getter: Option<GetterFn>,
    /// Bound mutator, if the provider chose to bind one
    pub setter: Option<SetterFn>,
}

impl FieldDecl {
    /// Declare a field with no handles bound.
    pub fn new(name: impl Into<String>, value_type: TypeKey) -> Self {
        FieldDecl {
            name: name.into(),
            value_type,
            modifiers: Modifiers::new(),
            annotations: Vec::new(),
            getter: None,
            setter: None,
        }
    }

    /// Set the modifier flags.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Attach an annotation.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Bind the accessor handle.
    pub fn with_getter<F>(mut self, getter: F) -> Self
    where
        F: Fn(&dyn Any) -> HandleResult<Value> + Send + Sync + 'static,
    {
        self.getter = Some(Arc::new(getter));
        self
    }

    /// Bind the mutator handle.
    pub fn with_setter<F>(mut self, setter: F) -> Self
    where
        F: Fn(&mut dyn Any, Value) -> HandleResult<()> + Send + Sync + 'static,
    {
        self.setter = Some(Arc::new(setter));
        self
    }
}

impl fmt::Debug for FieldDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDecl")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("modifiers", &self.modifiers)
            .field("annotations", &self.annotations)
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .finish()
    }
}

/// Declaration of one method.
#[derive(Clone)]
pub struct MethodDecl {
    /// Method name
    pub name: String,
    /// Ordered parameter types
    pub signature: Signature,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Bound invoker, if the provider chose to bind one
    pub handler: Option<InvokeFn>,
}

impl MethodDecl {
    /// Declare a method with no invoker bound.
    pub fn new(name: impl Into<String>, signature: Signature) -> Self {
        MethodDecl {
            name: name.into(),
            signature,
            modifiers: Modifiers::new(),
            handler: None,
        }
    }

    /// Set the modifier flags.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Bind the invocation handle.
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut dyn Any, &[Value]) -> HandleResult<Value> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }
}

impl fmt::Debug for MethodDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDecl")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("modifiers", &self.modifiers)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// Declaration of one constructor.
#[derive(Clone)]
pub struct CtorDecl {
    /// Ordered parameter types
    pub signature: Signature,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Bound constructor, if the provider chose to bind one
    pub handler: Option<CtorFn>,
}

impl CtorDecl {
    /// Declare a constructor with no handle bound.
    pub fn new(signature: Signature) -> Self {
        CtorDecl {
            signature,
            modifiers: Modifiers::new(),
            handler: None,
        }
    }

    /// Set the modifier flags.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Bind the construction handle.
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&[Value]) -> HandleResult<ObjRef> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }
}

impl fmt::Debug for CtorDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CtorDecl")
            .field("signature", &self.signature)
            .field("modifiers", &self.modifiers)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// Whether a declared type is a struct-like record or an enumeration.
///
/// Enumeration-ness cannot be read off a Rust type name, so providers
/// declare it; the empty-value synthesizer refuses to invent values for
/// enumerations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    /// Record type with fields
    Struct,
    /// Enumerated type
    Enum,
}

/// The full declaration of one type: its identity plus every declared
/// field, method, and constructor.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    /// Identity of the declared type
    pub key: TypeKey,
    /// Struct or enumeration
    pub kind: DataKind,
    /// Declared fields
    pub fields: Vec<FieldDecl>,
    /// Declared methods
    pub methods: Vec<MethodDecl>,
    /// Declared constructors
    pub constructors: Vec<CtorDecl>,
}

impl TypeDecl {
    /// Empty declaration for a struct-like type.
    pub fn new(key: TypeKey) -> Self {
        TypeDecl {
            key,
            kind: DataKind::Struct,
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Mark the declared type as an enumeration.
    pub fn as_enum(mut self) -> Self {
        self.kind = DataKind::Enum;
        self
    }

    /// Add a field declaration.
    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a method declaration.
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a constructor declaration.
    pub fn with_constructor(mut self, constructor: CtorDecl) -> Self {
        self.constructors.push(constructor);
        self
    }
}
