//! Type identity, categories, and parameter signatures
//!
//! A [`TypeKey`] identifies a type by its fully-qualified Rust name, as
//! produced by `std::any::type_name`. Identity is exact string equality:
//! no assignability, no widening, no boxing awareness. Platform types
//! (anything under a reserved namespace, or a bare name with no crate
//! path at all) are recognized here so the metadata cache can refuse them
//! up front.

use std::any;
use std::fmt;

use crate::value::Value;

/// Namespace prefixes reserved for the platform; types under these are
/// never cached.
const RESERVED_PREFIXES: &[&str] = &["core::", "alloc::", "std::", "proc_macro::"];

/// The distinguished key derived from a null argument value.
///
/// No declarable parameter type matches it, so signatures derived from
/// null arguments resolve nothing — exact-match semantics, by contract.
pub const NULL_KEY: &str = "null";

/// Identity of a type: its fully-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey {
    name: String,
}

impl TypeKey {
    /// Key for a concrete Rust type.
    pub fn of<T: ?Sized>() -> Self {
        TypeKey {
            name: any::type_name::<T>().to_string(),
        }
    }

    /// Key from a fully-qualified name.
    pub fn named(name: impl Into<String>) -> Self {
        TypeKey { name: name.into() }
    }

    /// The distinguished null key (see [`NULL_KEY`]).
    pub fn null() -> Self {
        TypeKey::named(NULL_KEY)
    }

    /// Fully-qualified name of the type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this key identifies a platform type.
    ///
    /// A key is platform if it has no `::` crate path (primitives, slices,
    /// tuples — the types with no identity-bearing loader) or sits under a
    /// reserved namespace prefix.
    pub fn is_platform(&self) -> bool {
        if !self.name.contains("::") {
            return true;
        }
        RESERVED_PREFIXES.iter().any(|p| self.name.starts_with(p))
    }

    /// Name-derived category of the type.
    pub fn kind(&self) -> TypeKind {
        let name = self.name.as_str();
        match name {
            "bool" | "char" | "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16"
            | "u32" | "u64" | "u128" | "usize" | "f32" | "f64" => return TypeKind::Primitive,
            "str" | "&str" | "alloc::string::String" => return TypeKind::Textual,
            _ => {}
        }
        if name.starts_with('[') || name.starts_with("&[") {
            return TypeKind::Array;
        }
        if name.starts_with("core::option::Option") {
            return TypeKind::Optional;
        }
        if name.starts_with("alloc::vec::Vec")
            || name.starts_with("alloc::collections::vec_deque::VecDeque")
            || name.starts_with("alloc::collections::linked_list::LinkedList")
        {
            return TypeKind::List;
        }
        if name.starts_with("std::collections::hash::map::HashMap")
            || name.starts_with("alloc::collections::btree::map::BTreeMap")
            || name.starts_with("indexmap::map::IndexMap")
        {
            return TypeKind::Map;
        }
        TypeKind::Other
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Name-derived type category, used by the empty-value synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Optional container (`Option<..>`)
    Optional,
    /// Fixed-size array or slice
    Array,
    /// Sequential collection (`Vec`, `VecDeque`, ...)
    List,
    /// Keyed map (`HashMap`, `BTreeMap`, `IndexMap`, ...)
    Map,
    /// Numeric, boolean, or character primitive
    Primitive,
    /// Textual type (`str`, `String`)
    Textual,
    /// Anything else — application-defined types land here
    Other,
}

/// A possibly-parameterized type request.
///
/// Only the empty-value synthesizer consumes these; descriptor lookup is
/// always by plain [`TypeKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// A plain, fully-resolved type
    Plain(TypeKey),
    /// A generic type applied to arguments, e.g. `Vec<User>`
    Parameterized {
        /// The raw (unapplied) type
        raw: TypeKey,
        /// The type arguments, in order
        args: Vec<TypeSpec>,
    },
    /// An array of a generic component — unresolvable, always synthesizes
    /// to absence
    GenericArray(Box<TypeSpec>),
    /// An unbounded wildcard — unresolvable, always synthesizes to absence
    Wildcard,
}

impl TypeSpec {
    /// Plain spec for a concrete Rust type.
    pub fn of<T: ?Sized>() -> Self {
        TypeSpec::Plain(TypeKey::of::<T>())
    }

    /// The raw key this spec resolves around, if any.
    pub fn raw(&self) -> Option<&TypeKey> {
        match self {
            TypeSpec::Plain(key) => Some(key),
            TypeSpec::Parameterized { raw, .. } => Some(raw),
            TypeSpec::GenericArray(_) | TypeSpec::Wildcard => None,
        }
    }
}

/// Ordered parameter-type list: the exact-match lookup key for methods
/// and constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Signature(Vec<TypeKey>);

impl Signature {
    /// Signature from an ordered parameter-type list.
    pub fn new(params: Vec<TypeKey>) -> Self {
        Signature(params)
    }

    /// The zero-parameter signature.
    pub fn empty() -> Self {
        Signature(Vec::new())
    }

    /// Derive a signature from the runtime types of argument values.
    ///
    /// Null arguments derive [`NULL_KEY`], which matches no declarable
    /// parameter type.
    pub fn of_values(args: &[Value]) -> Self {
        Signature(args.iter().map(Value::type_key).collect())
    }

    /// The parameter types, in order.
    pub fn params(&self) -> &[TypeKey] {
        &self.0
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the zero-parameter signature.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<TypeKey>> for Signature {
    fn from(params: Vec<TypeKey>) -> Self {
        Signature(params)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(param.name())?;
        }
        f.write_str(")")
    }
}
