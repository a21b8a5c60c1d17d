use thiserror::Error;

/// Runtime faults, surfaced to the host program as error values.
///
/// Every fault raised by the resolution engine is one of these classes;
/// faults raised inside resolver handlers propagate through unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JsError {
    #[error("Uncaught ReferenceError: {0}")]
    ReferenceError(String),
    #[error("Uncaught TypeError: {0}")]
    TypeError(String),
    #[error("Uncaught RangeError: {0}")]
    RangeError(String),
}

impl JsError {
    pub fn is_reference_error(&self) -> bool {
        matches!(self, JsError::ReferenceError(_))
    }

    pub fn is_type_error(&self) -> bool {
        matches!(self, JsError::TypeError(_))
    }

    pub fn message(&self) -> &str {
        match self {
            JsError::ReferenceError(m) => m,
            JsError::TypeError(m) => m,
            JsError::RangeError(m) => m,
        }
    }
}
