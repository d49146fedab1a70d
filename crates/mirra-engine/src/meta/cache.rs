//! Process-wide metadata cache
//!
//! [`MetaCache`] maps type identity to its [`TypeDescriptor`], building
//! each descriptor at most once per key. The map is sharded
//! ([`DashMap`]), so lookups of unrelated types never contend, and the
//! get-or-create path builds the descriptor *outside* any map lock: two
//! threads racing on the same uncached type may both build, but a single
//! atomic install decides the canonical descriptor and the loser's work
//! is discarded. Entries are never evicted.
//!
//! Platform types (reserved namespaces, or names with no crate path) are
//! rejected before any lookup and are never cached.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, trace};

use mirra_sdk::{Signature, TypeKey};

use crate::error::{MetaError, MetaResult};
use crate::meta::constructor::ConstructorDescriptor;
use crate::meta::field::FieldDescriptor;
use crate::meta::method::MethodDescriptor;
use crate::meta::type_descriptor::TypeDescriptor;
use crate::source::MemberSource;

/// Concurrent, append-only cache of type descriptors.
pub struct MetaCache {
    types: DashMap<String, Arc<TypeDescriptor>>,
    source: Arc<dyn MemberSource>,
}

impl MetaCache {
    /// Empty cache over the given member source.
    pub fn new(source: Arc<dyn MemberSource>) -> Self {
        MetaCache {
            types: DashMap::new(),
            source,
        }
    }

    /// Return the cached descriptor for `key`, building and installing it
    /// on first request.
    ///
    /// Concurrent first-time requests for the same key all observe the
    /// same descriptor instance: the first install wins and losing
    /// builders discard their work.
    pub fn get_or_create(&self, key: &TypeKey) -> MetaResult<Arc<TypeDescriptor>> {
        self.check_supported(key)?;
        if let Some(existing) = self.types.get(key.name()) {
            return Ok(existing.clone());
        }
        // Build outside the map lock so descriptor construction for
        // independent types proceeds in parallel.
        let built = self.build(key)?;
        let canonical = match self.types.entry(key.name().to_string()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => entry.insert(built).clone(),
        };
        Ok(canonical)
    }

    /// Unconditionally rebuild the descriptor for `key` and replace any
    /// cached one.
    pub fn put(&self, key: &TypeKey) -> MetaResult<Arc<TypeDescriptor>> {
        self.check_supported(key)?;
        let built = self.build(key)?;
        self.types.insert(key.name().to_string(), built.clone());
        Ok(built)
    }

    /// Look up a field by name, building the type descriptor as needed.
    pub fn get_field(&self, key: &TypeKey, name: &str) -> MetaResult<Arc<FieldDescriptor>> {
        self.get_or_create(key)?.get_field(name)
    }

    /// Look up a method by name and exact signature, building the type
    /// descriptor as needed.
    pub fn get_method(
        &self,
        key: &TypeKey,
        name: &str,
        signature: &Signature,
    ) -> MetaResult<Arc<MethodDescriptor>> {
        self.get_or_create(key)?.get_method(name, signature)
    }

    /// Look up a constructor by exact signature, building the type
    /// descriptor as needed.
    pub fn get_constructor(
        &self,
        key: &TypeKey,
        signature: &Signature,
    ) -> MetaResult<Arc<ConstructorDescriptor>> {
        self.get_or_create(key)?.get_constructor(signature)
    }

    /// Whether a descriptor for `key` is cached.
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.types.contains_key(key.name())
    }

    /// Number of cached type descriptors.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn check_supported(&self, key: &TypeKey) -> MetaResult<()> {
        if key.is_platform() {
            trace!(type_name = key.name(), "rejected platform type");
            return Err(MetaError::unsupported(key, "platform type"));
        }
        Ok(())
    }

    fn build(&self, key: &TypeKey) -> MetaResult<Arc<TypeDescriptor>> {
        let decl = self.source.describe(key).ok_or_else(|| {
            MetaError::unsupported(key, "no member source describes this type")
        })?;
        let descriptor = TypeDescriptor::build(decl);
        debug!(
            type_name = key.name(),
            fields = descriptor.field_count(),
            methods = descriptor.method_count(),
            "built type descriptor"
        );
        Ok(Arc::new(descriptor))
    }
}
