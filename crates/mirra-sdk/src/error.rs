//! Error types raised by bound member handles

/// Result type for bound handle calls
pub type HandleResult<T> = Result<T, HandleError>;

/// Faults a bound accessor/mutator/invocation handle can raise.
///
/// These are the "underlying faults" the engine wraps into its invocation
/// failure; they never escape to callers undecorated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleError {
    /// The receiver instance was not of the handle's concrete type
    #[error("receiver is not a {expected}")]
    ReceiverMismatch {
        /// Expected concrete type name
        expected: String,
    },

    /// An argument could not be read as the declared parameter type
    #[error("argument {index}: expected {expected}")]
    ArgumentType {
        /// Zero-based argument position
        index: usize,
        /// Expected type name
        expected: String,
    },

    /// A fault raised by the invoked code itself
    #[error("{0}")]
    Raised(String),
}

impl HandleError {
    /// Receiver downcast failed
    pub fn receiver(expected: impl Into<String>) -> Self {
        HandleError::ReceiverMismatch {
            expected: expected.into(),
        }
    }

    /// Argument extraction failed
    pub fn argument(index: usize, expected: impl Into<String>) -> Self {
        HandleError::ArgumentType {
            index,
            expected: expected.into(),
        }
    }

    /// A fault from the invoked code
    pub fn raised(message: impl Into<String>) -> Self {
        HandleError::Raised(message.into())
    }
}

impl From<String> for HandleError {
    fn from(s: String) -> Self {
        HandleError::Raised(s)
    }
}

impl From<&str> for HandleError {
    fn from(s: &str) -> Self {
        HandleError::Raised(s.to_string())
    }
}
