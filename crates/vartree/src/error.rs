//! Error types for value extraction and tree lookup.

use thiserror::Error;

use crate::kind::Kind;

/// Errors that can occur while reading a [`Value`](crate::Value) or a
/// [`Node`](crate::Node).
///
/// A failing operation never modifies the value or tree it was called on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VarError {
    /// The accessor does not match the stored discriminant.
    #[error("illegal cast to {expected}, while the value type is {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// A string payload is not a complete numeric literal for the target kind.
    #[error("cannot convert {input:?} to {target}: contains non-numeric characters")]
    NumericFormat { input: String, target: Kind },

    /// A string payload parsed, but the number does not fit the target kind.
    /// `bound` is the violated limit, rendered as text.
    #[error("cannot convert {input:?} to {target}: {bound}")]
    NumericOverflow {
        input: String,
        target: Kind,
        bound: Bound,
    },

    /// A bounded tree lookup did not find the key.
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// An internal invariant was violated, e.g. a raw discriminant byte
    /// outside the enumerated range.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

/// The limit a coerced number exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    Min(String),
    Max(String),
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Min(min) => write!(f, "less than permitted minimal value {min}"),
            Bound::Max(max) => write!(f, "more than permitted maximum value {max}"),
        }
    }
}

/// Convenience alias used throughout vartree.
pub type Result<T> = std::result::Result<T, VarError>;
