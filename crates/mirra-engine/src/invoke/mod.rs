//! Invocation dispatch
//!
//! A single [`InvocationStrategy`] instance decides how by-name field
//! access and method invocation map onto cached descriptors. The default
//! [`AccessorStrategy`] routes field access through conventionally named
//! public accessor methods; [`Reflector`] is the facade callers hold.

mod accessor;
mod reflector;
mod strategy;

pub use accessor::AccessorStrategy;
pub use reflector::Reflector;
pub use strategy::InvocationStrategy;
