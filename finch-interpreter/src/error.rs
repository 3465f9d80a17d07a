use thiserror::Error;

/// An interpreter exception, bubbling up to the host unless caught by it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Exception {
    /// No method of that name anywhere on the receiver's class chain.
    #[error("'{class}' does not understand '{name}'")]
    NoSuchMethod {
        /// The receiver's dynamic class.
        class: String,
        /// The attempted method name.
        name: String,
    },
    /// A primitive was given a value without the payload it operates on.
    #[error("'{signature}': expected {expected}")]
    Representation {
        /// The primitive's signature (eg. `Int>>#+`).
        signature: String,
        /// What the primitive was expecting.
        expected: String,
    },
    /// An integer division or remainder by zero.
    #[error("'{signature}': division by zero")]
    DivisionByZero {
        /// The primitive's signature.
        signature: String,
    },
    /// Any other script-level failure.
    #[error("{0}")]
    Runtime(String),
}

impl Exception {
    /// Construct a representation error.
    pub fn representation(signature: &str, expected: &str) -> Self {
        Self::Representation {
            signature: signature.to_string(),
            expected: expected.to_string(),
        }
    }
}
