//! Method descriptors

use std::any::Any;
use std::fmt;

use mirra_sdk::{InvokeFn, Modifiers, Signature, TypeKey, Value, Visibility};

use crate::error::{MetaError, MetaResult};

/// Immutable descriptor for one declared method.
///
/// Lookup already matched the exact declared signature, so `invoke` only
/// revalidates the argument count; no coercion (boxing, widening) is ever
/// applied to the arguments.
pub struct MethodDescriptor {
    name: String,
    signature: Signature,
    modifiers: Modifiers,
    handler: Option<InvokeFn>,
    owner: TypeKey,
}

impl MethodDescriptor {
    pub(crate) fn from_decl(owner: TypeKey, decl: mirra_sdk::MethodDecl) -> Self {
        MethodDescriptor {
            name: decl.name,
            signature: decl.signature,
            modifiers: decl.modifiers,
            handler: decl.handler,
            owner,
        }
    }

    /// Invoke the method on `instance` through the bound handle.
    pub fn invoke(&self, instance: &mut dyn Any, args: &[Value]) -> MetaResult<Value> {
        if args.len() != self.signature.len() {
            return Err(MetaError::ArgumentMismatch {
                member: self.qualified_name(),
                expected: self.signature.len(),
                supplied: args.len(),
            });
        }
        let handler = self.handler.as_ref().ok_or_else(|| MetaError::AccessDenied {
            member: self.name.clone(),
            owner: self.owner.name().to_string(),
            reason: "no invocation handle bound for this method".to_string(),
        })?;
        handler(instance, args).map_err(|cause| MetaError::Invocation {
            member: self.qualified_name(),
            cause,
        })
    }

    fn qualified_name(&self) -> String {
        format!("{}::{}", self.owner.name(), self.name)
    }

    /// Method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter types.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Declared parameter count.
    pub fn param_count(&self) -> usize {
        self.signature.len()
    }

    /// Owning type.
    pub fn owner(&self) -> &TypeKey {
        &self.owner
    }

    /// Cached modifier flags.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Publicly visible.
    pub fn is_public(&self) -> bool {
        self.modifiers.visibility == Visibility::Public
    }

    /// Protected visibility.
    pub fn is_protected(&self) -> bool {
        self.modifiers.visibility == Visibility::Protected
    }

    /// Private visibility.
    pub fn is_private(&self) -> bool {
        self.modifiers.visibility == Visibility::Private
    }

    /// Static method.
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }

    /// Final method.
    pub fn is_final(&self) -> bool {
        self.modifiers.is_final
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("owner", &self.owner)
            .field("modifiers", &self.modifiers)
            .field("bound", &self.handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirra_sdk::{HandleError, MethodDecl};

    struct Greeter {
        greeting: String,
    }

    fn greet_decl() -> MethodDecl {
        MethodDecl::new("greet", Signature::new(vec![TypeKey::of::<String>()])).with_handler(
            |obj: &mut dyn Any, args: &[Value]| {
                let greeter = obj
                    .downcast_ref::<Greeter>()
                    .ok_or_else(|| HandleError::receiver("Greeter"))?;
                let name = args
                    .first()
                    .and_then(Value::as_str)
                    .ok_or_else(|| HandleError::argument(0, "String"))?;
                Ok(Value::str(format!("{} {name}", greeter.greeting)))
            },
        )
    }

    #[test]
    fn test_invoke() {
        let method = MethodDescriptor::from_decl(TypeKey::of::<Greeter>(), greet_decl());
        let mut greeter = Greeter {
            greeting: "hello".to_string(),
        };
        let result = method
            .invoke(&mut greeter, &[Value::str("world")])
            .unwrap();
        assert_eq!(result, Value::str("hello world"));
    }

    #[test]
    fn test_argument_count_mismatch() {
        let method = MethodDescriptor::from_decl(TypeKey::of::<Greeter>(), greet_decl());
        let mut greeter = Greeter {
            greeting: "hi".to_string(),
        };
        let err = method.invoke(&mut greeter, &[]).unwrap_err();
        assert!(matches!(
            err,
            MetaError::ArgumentMismatch {
                expected: 1,
                supplied: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_unbound_handle_is_access_denied() {
        let method = MethodDescriptor::from_decl(
            TypeKey::of::<Greeter>(),
            MethodDecl::new("greet", Signature::empty()),
        );
        let mut greeter = Greeter {
            greeting: String::new(),
        };
        assert!(matches!(
            method.invoke(&mut greeter, &[]),
            Err(MetaError::AccessDenied { .. })
        ));
    }

    #[test]
    fn test_fault_from_invoked_code_wraps_cause() {
        let method = MethodDescriptor::from_decl(
            TypeKey::of::<Greeter>(),
            MethodDecl::new("explode", Signature::empty()).with_handler(
                |_obj: &mut dyn Any, _args: &[Value]| Err(HandleError::raised("kaboom")),
            ),
        );
        let mut greeter = Greeter {
            greeting: String::new(),
        };
        match method.invoke(&mut greeter, &[]).unwrap_err() {
            MetaError::Invocation { cause, .. } => {
                assert_eq!(cause, HandleError::raised("kaboom"));
            }
            other => panic!("expected invocation failure, got {other:?}"),
        }
    }
}
