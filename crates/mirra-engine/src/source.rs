//! Member enumeration capability
//!
//! The cache never introspects types itself; it asks a [`MemberSource`]
//! to enumerate a type's declared members. The default source is a
//! [`SourceRegistry`]: a concurrent map from type name to declaration
//! thunk, populated by [`Describe`] implementations. Tests substitute
//! their own sources to instrument build counts.

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use mirra_sdk::{Describe, TypeDecl, TypeKey};

/// Enumerates the declared members of a type.
///
/// Returning `None` means this source holds no declaration for the type;
/// the cache reports such types as unsupported — without a describing
/// source there is no identity-bearing loader behind the type name.
pub trait MemberSource: Send + Sync {
    /// Produce the declaration for `key`, if this source knows the type.
    fn describe(&self, key: &TypeKey) -> Option<TypeDecl>;
}

type DescribeFn = Arc<dyn Fn() -> TypeDecl + Send + Sync>;

static GLOBAL_REGISTRY: Lazy<Arc<SourceRegistry>> =
    Lazy::new(|| Arc::new(SourceRegistry::new()));

/// The default member source: a registry of declaration thunks keyed by
/// type name.
pub struct SourceRegistry {
    entries: DashMap<String, DescribeFn>,
}

impl SourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        SourceRegistry {
            entries: DashMap::new(),
        }
    }

    /// The process-wide default registry.
    pub fn global() -> Arc<SourceRegistry> {
        GLOBAL_REGISTRY.clone()
    }

    /// Register a self-describing type.
    pub fn register<T: Describe>(&self) {
        self.register_with(TypeKey::of::<T>(), T::describe);
    }

    /// Register a declaration thunk under an explicit key.
    pub fn register_with<F>(&self, key: TypeKey, describe: F)
    where
        F: Fn() -> TypeDecl + Send + Sync + 'static,
    {
        self.entries
            .insert(key.name().to_string(), Arc::new(describe));
    }

    /// Whether a declaration is registered for `key`.
    pub fn is_registered(&self, key: &TypeKey) -> bool {
        self.entries.contains_key(key.name())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        SourceRegistry::new()
    }
}

impl MemberSource for SourceRegistry {
    fn describe(&self, key: &TypeKey) -> Option<TypeDecl> {
        self.entries.get(key.name()).map(|describe| describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirra_sdk::{FieldDecl, Signature};

    struct Widget;

    impl Describe for Widget {
        fn describe() -> TypeDecl {
            TypeDecl::new(TypeKey::of::<Widget>())
                .with_field(FieldDecl::new("id", TypeKey::of::<i64>()))
        }
    }

    #[test]
    fn test_register_and_describe() {
        let registry = SourceRegistry::new();
        assert!(registry.is_empty());

        registry.register::<Widget>();
        assert_eq!(registry.len(), 1);
        assert!(registry.is_registered(&TypeKey::of::<Widget>()));

        let decl = registry.describe(&TypeKey::of::<Widget>()).unwrap();
        assert_eq!(decl.fields.len(), 1);
        assert_eq!(decl.fields[0].name, "id");
    }

    #[test]
    fn test_unknown_type_yields_none() {
        let registry = SourceRegistry::new();
        assert!(registry.describe(&TypeKey::named("app::Nope")).is_none());
    }

    #[test]
    fn test_register_with_explicit_key() {
        let registry = SourceRegistry::new();
        let key = TypeKey::named("app::Synthetic");
        registry.register_with(key.clone(), || {
            TypeDecl::new(TypeKey::named("app::Synthetic"))
                .with_method(mirra_sdk::MethodDecl::new("touch", Signature::empty()))
        });

        let decl = registry.describe(&key).unwrap();
        assert_eq!(decl.methods.len(), 1);
    }
}
