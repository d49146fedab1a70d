//! Type descriptors
//!
//! A [`TypeDescriptor`] is built exactly once per type from the fixed set
//! of declarations the member source produced; there is no dynamic
//! re-scan. Lookups are exact-match against the prebuilt indexes, and
//! laziness is two-level: the type is indexed eagerly, but each member's
//! descriptor (with its resolved handles) is only constructed on the
//! first lookup that asks for it, then cached and shared.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxHashMap;

use mirra_sdk::{CtorDecl, DataKind, FieldDecl, MethodDecl, Signature, TypeDecl, TypeKey};

use crate::error::{MetaError, MetaResult};
use crate::meta::constructor::ConstructorDescriptor;
use crate::meta::field::FieldDescriptor;
use crate::meta::method::MethodDescriptor;

type MethodKey = (String, Signature);

/// Per-type member indexes plus lazily-built member descriptors.
pub struct TypeDescriptor {
    key: TypeKey,
    kind: DataKind,
    field_decls: FxHashMap<String, FieldDecl>,
    method_decls: FxHashMap<MethodKey, MethodDecl>,
    ctor_decls: FxHashMap<Signature, CtorDecl>,
    fields: DashMap<String, Arc<FieldDescriptor>>,
    methods: DashMap<MethodKey, Arc<MethodDescriptor>>,
    constructors: DashMap<Signature, Arc<ConstructorDescriptor>>,
}

impl TypeDescriptor {
    /// Index the declared members of `decl`. Later duplicates of the same
    /// name/signature shadow earlier ones.
    pub(crate) fn build(decl: TypeDecl) -> Self {
        let key = decl.key;
        let field_decls = decl
            .fields
            .into_iter()
            .map(|f| (f.name.clone(), f))
            .collect();
        let method_decls = decl
            .methods
            .into_iter()
            .map(|m| ((m.name.clone(), m.signature.clone()), m))
            .collect();
        let ctor_decls = decl
            .constructors
            .into_iter()
            .map(|c| (c.signature.clone(), c))
            .collect();
        TypeDescriptor {
            key,
            kind: decl.kind,
            field_decls,
            method_decls,
            ctor_decls,
            fields: DashMap::new(),
            methods: DashMap::new(),
            constructors: DashMap::new(),
        }
    }

    /// Identity of the described type.
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// Whether the provider declared this type as an enumeration.
    pub fn is_enum(&self) -> bool {
        self.kind == DataKind::Enum
    }

    /// Look up a field by name.
    pub fn get_field(&self, name: &str) -> MetaResult<Arc<FieldDescriptor>> {
        if let Some(field) = self.fields.get(name) {
            return Ok(field.clone());
        }
        let decl = self
            .field_decls
            .get(name)
            .ok_or_else(|| MetaError::field_not_found(&self.key, name))?;
        let built = Arc::new(FieldDescriptor::from_decl(self.key.clone(), decl.clone()));
        let field = self.fields.entry(name.to_string()).or_insert(built);
        Ok(field.clone())
    }

    /// Look up a method by name and exact parameter signature.
    pub fn get_method(
        &self,
        name: &str,
        signature: &Signature,
    ) -> MetaResult<Arc<MethodDescriptor>> {
        let lookup = (name.to_string(), signature.clone());
        if let Some(method) = self.methods.get(&lookup) {
            return Ok(method.clone());
        }
        let decl = self
            .method_decls
            .get(&lookup)
            .ok_or_else(|| MetaError::method_not_found(&self.key, name, signature))?;
        let built = Arc::new(MethodDescriptor::from_decl(self.key.clone(), decl.clone()));
        let method = self.methods.entry(lookup).or_insert(built);
        Ok(method.clone())
    }

    /// Look up a constructor by exact parameter signature.
    pub fn get_constructor(&self, signature: &Signature) -> MetaResult<Arc<ConstructorDescriptor>> {
        if let Some(ctor) = self.constructors.get(signature) {
            return Ok(ctor.clone());
        }
        let decl = self
            .ctor_decls
            .get(signature)
            .ok_or_else(|| MetaError::ctor_not_found(&self.key, signature))?;
        let built = Arc::new(ConstructorDescriptor::from_decl(
            self.key.clone(),
            decl.clone(),
        ));
        let ctor = self.constructors.entry(signature.clone()).or_insert(built);
        Ok(ctor.clone())
    }

    /// Whether a field with the name is declared.
    pub fn has_field(&self, name: &str) -> bool {
        self.field_decls.contains_key(name)
    }

    /// Whether a method with the name is declared under any signature.
    pub fn has_method(&self, name: &str) -> bool {
        self.method_decls.keys().any(|(n, _)| n == name)
    }

    /// Names of all declared fields.
    pub fn field_names(&self) -> Vec<&str> {
        self.field_decls.keys().map(String::as_str).collect()
    }

    /// Number of declared fields.
    pub fn field_count(&self) -> usize {
        self.field_decls.len()
    }

    /// Number of declared methods (counting each overload).
    pub fn method_count(&self) -> usize {
        self.method_decls.len()
    }

    /// Number of declared constructors.
    pub fn constructor_count(&self) -> usize {
        self.ctor_decls.len()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("fields", &self.field_count())
            .field("methods", &self.method_count())
            .field("constructors", &self.constructor_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirra_sdk::Value;
    use std::any::Any;

    struct Sensor {
        reading: f64,
    }

    fn sensor_decl() -> TypeDecl {
        TypeDecl::new(TypeKey::of::<Sensor>())
            .with_field(
                FieldDecl::new("reading", TypeKey::of::<f64>()).with_getter(|obj: &dyn Any| {
                    let sensor = obj
                        .downcast_ref::<Sensor>()
                        .ok_or_else(|| mirra_sdk::HandleError::receiver("Sensor"))?;
                    Ok(Value::Float(sensor.reading))
                }),
            )
            .with_method(MethodDecl::new(
                "calibrate",
                Signature::new(vec![TypeKey::of::<f64>()]),
            ))
            .with_method(MethodDecl::new(
                "calibrate",
                Signature::new(vec![TypeKey::of::<String>()]),
            ))
            .with_constructor(CtorDecl::new(Signature::empty()))
    }

    #[test]
    fn test_exact_match_lookup() {
        let descriptor = TypeDescriptor::build(sensor_decl());

        assert!(descriptor.get_field("reading").is_ok());
        assert!(matches!(
            descriptor.get_field("missing"),
            Err(MetaError::MemberNotFound { .. })
        ));

        let float_sig = Signature::new(vec![TypeKey::of::<f64>()]);
        let str_sig = Signature::new(vec![TypeKey::of::<String>()]);
        assert!(descriptor.get_method("calibrate", &float_sig).is_ok());
        assert!(descriptor.get_method("calibrate", &str_sig).is_ok());

        // No widening: f32 does not resolve the f64 overload.
        let narrow_sig = Signature::new(vec![TypeKey::of::<f32>()]);
        assert!(matches!(
            descriptor.get_method("calibrate", &narrow_sig),
            Err(MetaError::MemberNotFound { .. })
        ));

        assert!(descriptor.get_constructor(&Signature::empty()).is_ok());
        assert!(matches!(
            descriptor.get_constructor(&float_sig),
            Err(MetaError::MemberNotFound { .. })
        ));
    }

    #[test]
    fn test_lazy_member_descriptors_are_shared() {
        let descriptor = TypeDescriptor::build(sensor_decl());
        let first = descriptor.get_field("reading").unwrap();
        let second = descriptor.get_field("reading").unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let sig = Signature::new(vec![TypeKey::of::<f64>()]);
        let m1 = descriptor.get_method("calibrate", &sig).unwrap();
        let m2 = descriptor.get_method("calibrate", &sig).unwrap();
        assert!(Arc::ptr_eq(&m1, &m2));
    }

    #[test]
    fn test_member_inventory() {
        let descriptor = TypeDescriptor::build(sensor_decl());
        assert!(descriptor.has_field("reading"));
        assert!(!descriptor.has_field("offset"));
        assert!(descriptor.has_method("calibrate"));
        assert!(!descriptor.has_method("reset"));
        assert_eq!(descriptor.field_count(), 1);
        assert_eq!(descriptor.method_count(), 2);
        assert_eq!(descriptor.constructor_count(), 1);
        assert_eq!(descriptor.field_names(), vec!["reading"]);
        assert!(!descriptor.is_enum());
    }
}
