//! Metadata cache and member descriptors
//!
//! The cache maps type identity to a [`TypeDescriptor`] built once from
//! the member source's declarations; each descriptor lazily materializes
//! [`FieldDescriptor`]/[`MethodDescriptor`]/[`ConstructorDescriptor`]
//! instances with their handles resolved once and reused for every
//! subsequent access.

mod cache;
mod constructor;
mod field;
mod method;
mod type_descriptor;

pub use cache::MetaCache;
pub use constructor::ConstructorDescriptor;
pub use field::FieldDescriptor;
pub use method::MethodDescriptor;
pub use type_descriptor::TypeDescriptor;
