//! Empty-value synthesis
//!
//! Given a requested type, produce a reasonable placeholder value. The
//! policy is evaluated in category order; textual types and enumerations
//! get the absence marker because a synthetic "empty" value carries no
//! meaning for them, and the final fallback attempts no-argument
//! construction through the cache, recovering every failure locally to
//! the absence marker — this path never raises.

use indexmap::IndexMap;

use mirra_sdk::{Signature, TypeKey, TypeKind, TypeSpec, Value};

use crate::meta::MetaCache;

/// Synthesize a placeholder for a possibly-parameterized type request.
///
/// Parameterized requests apply the category rules to the raw type;
/// wildcards and generic arrays are unresolvable and yield the absence
/// marker.
pub fn empty_value(cache: &MetaCache, spec: &TypeSpec) -> Value {
    match spec {
        TypeSpec::Plain(key) => empty_value_for(cache, key),
        TypeSpec::Parameterized { raw, .. } => match raw.kind() {
            TypeKind::Optional => Value::Opt(None),
            TypeKind::List => Value::List(Vec::new()),
            TypeKind::Map => Value::Map(IndexMap::new()),
            _ => empty_value_for(cache, raw),
        },
        TypeSpec::GenericArray(_) | TypeSpec::Wildcard => Value::Null,
    }
}

/// Synthesize a placeholder for a plain type.
pub fn empty_value_for(cache: &MetaCache, key: &TypeKey) -> Value {
    match key.kind() {
        TypeKind::Optional => Value::Opt(None),
        TypeKind::Array | TypeKind::List => Value::List(Vec::new()),
        TypeKind::Map => Value::Map(IndexMap::new()),
        TypeKind::Primitive => primitive_zero(key),
        TypeKind::Textual => Value::Null,
        TypeKind::Other => construct_empty(cache, key),
    }
}

/// Zero-equivalent of a primitive type.
fn primitive_zero(key: &TypeKey) -> Value {
    match key.name() {
        "bool" => Value::Bool(false),
        "char" => Value::Char('\0'),
        "f32" | "f64" => Value::Float(0.0),
        _ => Value::Int(0),
    }
}

/// No-argument construction through the cache. Every failure — type
/// unsupported, declared enumeration, no matching constructor, handle
/// fault — recovers to the absence marker.
fn construct_empty(cache: &MetaCache, key: &TypeKey) -> Value {
    let descriptor = match cache.get_or_create(key) {
        Ok(descriptor) => descriptor,
        Err(_) => return Value::Null,
    };
    if descriptor.is_enum() {
        return Value::Null;
    }
    let constructor = match descriptor.get_constructor(&Signature::empty()) {
        Ok(constructor) => constructor,
        Err(_) => return Value::Null,
    };
    match constructor.instantiate(&[]) {
        Ok(instance) => Value::Object(instance),
        Err(_) => Value::Null,
    }
}
