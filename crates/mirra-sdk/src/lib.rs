//! Mirra SDK - declaration ABI for type providers
//!
//! This crate provides everything a type needs to publish its members to
//! the mirra engine without depending on the engine itself: the dynamic
//! [`Value`] model, [`TypeKey`] identity, [`Signature`] parameter lists,
//! and the member declarations with their bound handles.
//!
//! # Example
//!
//! ```ignore
//! use mirra_sdk::{Describe, FieldDecl, HandleError, Signature, TypeDecl, TypeKey, Value};
//!
//! struct User { age: i64 }
//!
//! impl Describe for User {
//!     fn describe() -> TypeDecl {
//!         TypeDecl::new(TypeKey::of::<User>()).with_field(
//!             FieldDecl::new("age", TypeKey::of::<i64>()).with_getter(|obj| {
//!                 let user = obj
//!                     .downcast_ref::<User>()
//!                     .ok_or_else(|| HandleError::receiver("User"))?;
//!                 Ok(Value::Int(user.age))
//!             }),
//!         )
//!     }
//! }
//! ```

#![warn(missing_docs)]

pub mod decl;
pub mod error;
pub mod types;
pub mod value;

pub use decl::{
    Annotation, CtorDecl, CtorFn, DataKind, Describe, FieldDecl, GetterFn, InvokeFn, MethodDecl,
    Modifiers, SetterFn, TypeDecl, Visibility,
};
pub use error::{HandleError, HandleResult};
pub use types::{Signature, TypeKey, TypeKind, TypeSpec, NULL_KEY};
pub use value::{ObjRef, Value};
