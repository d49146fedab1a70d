//! Error taxonomy for metadata and invocation operations
//!
//! Every failure a caller can observe is one of the [`MetaError`] kinds;
//! callers branch on the kind rather than on message text. Faults raised
//! inside bound handles always arrive wrapped in
//! [`MetaError::Invocation`] with the original cause attached.

use std::fmt;

use mirra_sdk::{HandleError, Signature, TypeKey};

/// Result alias for metadata operations.
pub type MetaResult<T> = Result<T, MetaError>;

/// Which index a failed member lookup searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// Field lookup by name
    Field,
    /// Method lookup by name and signature
    Method,
    /// Constructor lookup by signature
    Constructor,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MemberKind::Field => "field",
            MemberKind::Method => "method",
            MemberKind::Constructor => "constructor",
        })
    }
}

/// Metadata and invocation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MetaError {
    /// The type is a platform type, or no member source describes it;
    /// it is never cached and every lookup for it fails fast.
    #[error("unsupported type {name}: {reason}")]
    Unsupported {
        /// Fully-qualified type name
        name: String,
        /// Why the type cannot be cached
        reason: String,
    },

    /// No member matches the requested name and/or exact signature.
    #[error("no {kind} {name} on {owner}")]
    MemberNotFound {
        /// Which index was searched
        kind: MemberKind,
        /// Requested name, with signature rendering where applicable
        name: String,
        /// Owning type
        owner: String,
    },

    /// The member's visibility (or an unbound handle) forbids the
    /// requested operation.
    #[error("access denied to {member} on {owner}: {reason}")]
    AccessDenied {
        /// Member name
        member: String,
        /// Owning type
        owner: String,
        /// What forbids the access
        reason: String,
    },

    /// Supplied argument count does not match the declared signature.
    #[error("{member} expects {expected} arguments, got {supplied}")]
    ArgumentMismatch {
        /// Member name
        member: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        supplied: usize,
    },

    /// The underlying call raised a fault; the original cause is attached.
    #[error("invoking {member} failed")]
    Invocation {
        /// Fully-qualified member name
        member: String,
        /// The underlying fault
        #[source]
        cause: HandleError,
    },
}

impl MetaError {
    pub(crate) fn unsupported(key: &TypeKey, reason: impl Into<String>) -> Self {
        MetaError::Unsupported {
            name: key.name().to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn field_not_found(owner: &TypeKey, name: &str) -> Self {
        MetaError::MemberNotFound {
            kind: MemberKind::Field,
            name: name.to_string(),
            owner: owner.name().to_string(),
        }
    }

    pub(crate) fn method_not_found(owner: &TypeKey, name: &str, signature: &Signature) -> Self {
        MetaError::MemberNotFound {
            kind: MemberKind::Method,
            name: format!("{name}{signature}"),
            owner: owner.name().to_string(),
        }
    }

    pub(crate) fn ctor_not_found(owner: &TypeKey, signature: &Signature) -> Self {
        MetaError::MemberNotFound {
            kind: MemberKind::Constructor,
            name: format!("new{signature}"),
            owner: owner.name().to_string(),
        }
    }

    /// Which taxonomy kind this error is — convenient for branching.
    pub fn kind_name(&self) -> &'static str {
        match self {
            MetaError::Unsupported { .. } => "unsupported",
            MetaError::MemberNotFound { .. } => "member_not_found",
            MetaError::AccessDenied { .. } => "access_denied",
            MetaError::ArgumentMismatch { .. } => "argument_mismatch",
            MetaError::Invocation { .. } => "invocation",
        }
    }
}
