//! Reflection facade
//!
//! [`Reflector`] ties the pieces together: it owns a [`MetaCache`] and
//! the currently registered [`InvocationStrategy`], and exposes the
//! value-level operations (field get/set, method invocation, instance
//! construction, empty-value synthesis). The strategy slot is swappable
//! at runtime; a process-wide default instance over the global source
//! registry is available via [`Reflector::global`].

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use mirra_sdk::{ObjRef, Signature, TypeKey, TypeSpec, Value};

use crate::empty;
use crate::error::MetaResult;
use crate::invoke::accessor::AccessorStrategy;
use crate::invoke::strategy::InvocationStrategy;
use crate::meta::MetaCache;
use crate::source::SourceRegistry;

static GLOBAL_REFLECTOR: Lazy<Reflector> =
    Lazy::new(|| Reflector::new(Arc::new(MetaCache::new(SourceRegistry::global()))));

/// Facade over the metadata cache and the registered dispatch strategy.
pub struct Reflector {
    cache: Arc<MetaCache>,
    strategy: RwLock<Arc<dyn InvocationStrategy>>,
}

impl Reflector {
    /// Reflector over `cache` with the default [`AccessorStrategy`].
    pub fn new(cache: Arc<MetaCache>) -> Self {
        Reflector::with_strategy(cache, Arc::new(AccessorStrategy::new()))
    }

    /// Reflector over `cache` with an explicit strategy.
    pub fn with_strategy(cache: Arc<MetaCache>, strategy: Arc<dyn InvocationStrategy>) -> Self {
        Reflector {
            cache,
            strategy: RwLock::new(strategy),
        }
    }

    /// The process-wide default reflector, backed by
    /// [`SourceRegistry::global`].
    pub fn global() -> &'static Reflector {
        &GLOBAL_REFLECTOR
    }

    /// The underlying metadata cache.
    pub fn cache(&self) -> &MetaCache {
        &self.cache
    }

    /// Replace the registered invocation strategy.
    ///
    /// The swap is visible to every subsequent operation on this
    /// reflector, across all threads.
    pub fn register_strategy(&self, strategy: Arc<dyn InvocationStrategy>) {
        *self.strategy.write() = strategy;
    }

    /// Read the field named `name` off `target` via the registered
    /// strategy.
    pub fn get_field(&self, target: &ObjRef, name: &str) -> MetaResult<Value> {
        let strategy = self.strategy.read().clone();
        strategy.get_field(&self.cache, target, name)
    }

    /// Write `value` into the field named `name` on `target` via the
    /// registered strategy.
    pub fn set_field(&self, target: &ObjRef, name: &str, value: Value) -> MetaResult<()> {
        let strategy = self.strategy.read().clone();
        strategy.set_field(&self.cache, target, name, value)
    }

    /// Invoke the method `name` with the exact `signature` on `target`.
    pub fn invoke(
        &self,
        target: &ObjRef,
        name: &str,
        signature: &Signature,
        args: &[Value],
    ) -> MetaResult<Value> {
        let strategy = self.strategy.read().clone();
        strategy.invoke(&self.cache, target, name, signature, args)
    }

    /// Invoke the method `name` with the signature derived from the
    /// runtime types of `args`.
    pub fn invoke_auto(&self, target: &ObjRef, name: &str, args: &[Value]) -> MetaResult<Value> {
        let signature = Signature::of_values(args);
        self.invoke(target, name, &signature, args)
    }

    /// Construct an instance of `key` with the constructor whose
    /// signature matches the runtime types of `args`.
    pub fn new_instance(&self, key: &TypeKey, args: &[Value]) -> MetaResult<ObjRef> {
        let signature = Signature::of_values(args);
        let constructor = self.cache.get_constructor(key, &signature)?;
        constructor.instantiate(args)
    }

    /// Synthesize a placeholder value for the requested type.
    pub fn empty_value(&self, spec: &TypeSpec) -> Value {
        empty::empty_value(&self.cache, spec)
    }
}
