use crate::value::ValueType;

/// Result alias that carries the custom [`PortValueError`] type.
pub type Result<T> = std::result::Result<T, PortValueError>;

/// Common error type for the core crate.
///
/// Projection itself never fails at runtime: a type that matches no structural
/// category does not implement [`crate::Project`] and is rejected by the
/// compiler. The variants below cover the runtime edges around it.
#[derive(Debug, thiserror::Error)]
pub enum PortValueError {
    /// A [`crate::Value`] was read back as a variant it does not hold.
    #[error("expected a {expected} value, found {found}")]
    TypeMismatch { expected: ValueType, found: ValueType },
    /// A range descriptor is not self-consistent.
    #[error("invalid range: {0}")]
    InvalidRange(String),
    /// Free-form message.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Configuration or value document failed to parse.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl PortValueError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn mismatch(expected: ValueType, found: ValueType) -> Self {
        Self::TypeMismatch { expected, found }
    }
}

impl From<&str> for PortValueError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for PortValueError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
