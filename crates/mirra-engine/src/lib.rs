//! Mirra engine - runtime member-introspection cache
//!
//! Given a type, the engine discovers and memoizes descriptors for its
//! fields, constructors, and methods, then exposes the descriptors'
//! bound handles so reads, writes, and invocations never repeat the
//! discovery step. On top sits a pluggable invocation strategy; the
//! default routes by-name field access through conventionally named
//! public accessor methods.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mirra_engine::{MetaCache, Reflector, SourceRegistry};
//! use mirra_sdk::{ObjRef, TypeKey, Value};
//!
//! let registry = Arc::new(SourceRegistry::new());
//! registry.register::<User>();
//!
//! let reflector = Reflector::new(Arc::new(MetaCache::new(registry)));
//! let user = reflector.new_instance(&TypeKey::of::<User>(), &[])?;
//! reflector.set_field(&user, "age", Value::Int(30))?;   // calls setAge(30)
//! let age = reflector.get_field(&user, "age")?;         // calls getAge()
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod empty;
pub mod error;
pub mod invoke;
pub mod meta;
pub mod source;

pub use empty::{empty_value, empty_value_for};
pub use error::{MemberKind, MetaError, MetaResult};
pub use invoke::{AccessorStrategy, InvocationStrategy, Reflector};
pub use meta::{
    ConstructorDescriptor, FieldDescriptor, MetaCache, MethodDescriptor, TypeDescriptor,
};
pub use source::{MemberSource, SourceRegistry};

// Re-export SDK types (canonical definitions live in mirra-sdk)
pub use mirra_sdk::{
    Annotation, CtorDecl, DataKind, Describe, FieldDecl, HandleError, HandleResult, MethodDecl,
    Modifiers, ObjRef, Signature, TypeDecl, TypeKey, TypeKind, TypeSpec, Value, Visibility,
};
