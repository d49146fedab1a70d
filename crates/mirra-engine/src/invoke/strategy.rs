//! Pluggable invocation dispatch

use mirra_sdk::{ObjRef, Signature, Value};

use crate::error::MetaResult;
use crate::meta::MetaCache;

/// Dispatch policy for by-name field access and method invocation.
///
/// Strategies are stateless; the cache is passed in explicitly so a
/// single strategy instance can serve any number of caches. One instance
/// is registered per [`Reflector`](crate::invoke::Reflector) and can be
/// swapped at runtime.
pub trait InvocationStrategy: Send + Sync {
    /// Read the field named `name` off `target`.
    fn get_field(&self, cache: &MetaCache, target: &ObjRef, name: &str) -> MetaResult<Value>;

    /// Write `value` into the field named `name` on `target`.
    fn set_field(
        &self,
        cache: &MetaCache,
        target: &ObjRef,
        name: &str,
        value: Value,
    ) -> MetaResult<()>;

    /// Invoke the method `name` with the exact `signature` on `target`.
    fn invoke(
        &self,
        cache: &MetaCache,
        target: &ObjRef,
        name: &str,
        signature: &Signature,
        args: &[Value],
    ) -> MetaResult<Value>;
}
