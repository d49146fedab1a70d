//! Field descriptors
//!
//! A [`FieldDescriptor`] is the immutable, fully-resolved form of a field
//! declaration: handles bound once, annotations indexed for O(1) lookup,
//! modifier flags cached. Resolving the handles at construction time
//! amortizes the access-control and signature checks the provider did
//! when binding them; every subsequent `get`/`set` is a plain call.

use std::any::Any;
use std::fmt;

use rustc_hash::FxHashMap;

use mirra_sdk::{Annotation, FieldDecl, GetterFn, Modifiers, SetterFn, TypeKey, Value, Visibility};

use crate::error::{MetaError, MetaResult};

/// Immutable descriptor for one declared field.
pub struct FieldDescriptor {
    name: String,
    value_type: TypeKey,
    modifiers: Modifiers,
    annotations: FxHashMap<String, Annotation>,
    getter: Option<GetterFn>,
    setter: Option<SetterFn>,
    owner: TypeKey,
}

impl FieldDescriptor {
    pub(crate) fn from_decl(owner: TypeKey, decl: FieldDecl) -> Self {
        let annotations = decl
            .annotations
            .into_iter()
            .map(|a| (a.name().to_string(), a))
            .collect();
        FieldDescriptor {
            name: decl.name,
            value_type: decl.value_type,
            modifiers: decl.modifiers,
            annotations,
            getter: decl.getter,
            setter: decl.setter,
            owner,
        }
    }

    /// Read the field off `instance` through the bound accessor handle.
    pub fn get(&self, instance: &dyn Any) -> MetaResult<Value> {
        let getter = self.getter.as_ref().ok_or_else(|| self.denied("get"))?;
        getter(instance).map_err(|cause| MetaError::Invocation {
            member: self.qualified_name(),
            cause,
        })
    }

    /// Write `value` into the field on `instance` through the bound
    /// mutator handle.
    ///
    /// No type-compatibility check happens here beyond what the handle
    /// itself enforces.
    pub fn set(&self, instance: &mut dyn Any, value: Value) -> MetaResult<()> {
        let setter = self.setter.as_ref().ok_or_else(|| self.denied("set"))?;
        setter(instance, value).map_err(|cause| MetaError::Invocation {
            member: self.qualified_name(),
            cause,
        })
    }

    fn denied(&self, op: &str) -> MetaError {
        MetaError::AccessDenied {
            member: self.name.clone(),
            owner: self.owner.name().to_string(),
            reason: format!("no {op} handle bound for this field"),
        }
    }

    fn qualified_name(&self) -> String {
        format!("{}::{}", self.owner.name(), self.name)
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared value type.
    pub fn value_type(&self) -> &TypeKey {
        &self.value_type
    }

    /// Owning type.
    pub fn owner(&self) -> &TypeKey {
        &self.owner
    }

    /// Cached modifier flags.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Look up an annotation by marker name.
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.get(name)
    }

    /// Whether an annotation with the marker name is present.
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.contains_key(name)
    }

    /// All annotations, indexed by marker name.
    pub fn annotations(&self) -> &FxHashMap<String, Annotation> {
        &self.annotations
    }

    // ========================================================================
    // Modifier predicates
    // ========================================================================

    /// Publicly visible.
    pub fn is_public(&self) -> bool {
        self.modifiers.visibility == Visibility::Public
    }

    /// Protected visibility.
    pub fn is_protected(&self) -> bool {
        self.modifiers.visibility == Visibility::Protected
    }

    /// Private visibility.
    pub fn is_private(&self) -> bool {
        self.modifiers.visibility == Visibility::Private
    }

    /// Static field.
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }

    /// Final field.
    pub fn is_final(&self) -> bool {
        self.modifiers.is_final
    }

    /// Volatile field.
    pub fn is_volatile(&self) -> bool {
        self.modifiers.is_volatile
    }

    /// Transient field.
    pub fn is_transient(&self) -> bool {
        self.modifiers.is_transient
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("owner", &self.owner)
            .field("modifiers", &self.modifiers)
            .field("bound_getter", &self.getter.is_some())
            .field("bound_setter", &self.setter.is_some())
            .finish()
    }
}
