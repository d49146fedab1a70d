//! Constructor descriptors

use std::fmt;

use mirra_sdk::{CtorFn, Modifiers, ObjRef, Signature, TypeKey, Value, Visibility};

use crate::error::{MetaError, MetaResult};

/// Immutable descriptor for one declared constructor.
pub struct ConstructorDescriptor {
    signature: Signature,
    modifiers: Modifiers,
    handler: Option<CtorFn>,
    owner: TypeKey,
}

impl ConstructorDescriptor {
    pub(crate) fn from_decl(owner: TypeKey, decl: mirra_sdk::CtorDecl) -> Self {
        ConstructorDescriptor {
            signature: decl.signature,
            modifiers: decl.modifiers,
            handler: decl.handler,
            owner,
        }
    }

    /// Construct a fresh instance through the bound handle.
    pub fn instantiate(&self, args: &[Value]) -> MetaResult<ObjRef> {
        if args.len() != self.signature.len() {
            return Err(MetaError::ArgumentMismatch {
                member: self.qualified_name(),
                expected: self.signature.len(),
                supplied: args.len(),
            });
        }
        let handler = self.handler.as_ref().ok_or_else(|| MetaError::AccessDenied {
            member: format!("new{}", self.signature),
            owner: self.owner.name().to_string(),
            reason: "no construction handle bound".to_string(),
        })?;
        handler(args).map_err(|cause| MetaError::Invocation {
            member: self.qualified_name(),
            cause,
        })
    }

    fn qualified_name(&self) -> String {
        format!("{}::new{}", self.owner.name(), self.signature)
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

    /// Private visibility.
    pub fn is_private(&self) -> bool {
        self.modifiers.visibility == Visibility::Private
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("signature", &self.signature)
            .field("owner", &self.owner)
            .field("modifiers", &self.modifiers)
            .field("bound", &self.handler.is_some())
            .finish()
    }
}
