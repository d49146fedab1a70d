//! Default accessor-convention strategy

use mirra_sdk::{ObjRef, Signature, Value};

use crate::error::{MetaError, MetaResult};
use crate::invoke::strategy::InvocationStrategy;
use crate::meta::MetaCache;

/// The default dispatch policy: field access goes through conventionally
/// named accessor methods, never through the field itself.
///
/// `get_field` resolves and invokes the zero-argument method `get` +
/// capitalized field name; `set_field` resolves `set` + capitalized name
/// with the parameter signature derived from the value's runtime type.
/// The resolved method must be public. Because this path is independent
/// of the direct [`FieldDescriptor`](crate::meta::FieldDescriptor)
/// handles, the two can disagree when a type's accessors are not a
/// faithful mirror of its fields.
#[derive(Debug, Default)]
pub struct AccessorStrategy;

impl AccessorStrategy {
    /// Create the strategy.
    pub fn new() -> Self {
        AccessorStrategy
    }
}

/// `prefix` + field name with its first character uppercased.
fn accessor_name(prefix: &str, field: &str) -> String {
    let mut name = String::with_capacity(prefix.len() + field.len());
    name.push_str(prefix);
    let mut chars = field.chars();
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name
}

impl InvocationStrategy for AccessorStrategy {
    fn get_field(&self, cache: &MetaCache, target: &ObjRef, name: &str) -> MetaResult<Value> {
        let getter = accessor_name("get", name);
        self.invoke(cache, target, &getter, &Signature::empty(), &[])
    }

    fn set_field(
        &self,
        cache: &MetaCache,
        target: &ObjRef,
        name: &str,
        value: Value,
    ) -> MetaResult<()> {
        let setter = accessor_name("set", name);
        let args = [value];
        let signature = Signature::of_values(&args);
        self.invoke(cache, target, &setter, &signature, &args)?;
        Ok(())
    }

    fn invoke(
        &self,
        cache: &MetaCache,
        target: &ObjRef,
        name: &str,
        signature: &Signature,
        args: &[Value],
    ) -> MetaResult<Value> {
        let method = cache.get_method(target.type_key(), name, signature)?;
        if !method.is_public() {
            return Err(MetaError::AccessDenied {
                member: name.to_string(),
                owner: target.type_key().name().to_string(),
                reason: "method is not public".to_string(),
            });
        }
        target.with_mut(|instance| method.invoke(instance, args))
    }
}
