//! Error handling
//!
use serde_json::Value;
use thiserror;

use crate::registry::NumParams;

/// Public error enumeration
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid data - value: {value:?}, reason: {reason:?}")]
    InvalidData { value: Value, reason: String },

    #[error("Invalid rule - operator: '{key:?}', reason: {reason:?}")]
    InvalidOperation { key: String, reason: String },

    #[error("Invalid variable - '{value:?}', reason: {reason:?}")]
    InvalidVariable { value: Value, reason: String },

    #[error("Invalid variable key - '{value:?}', reason: {reason:?}")]
    InvalidVariableKey { value: Value, reason: String },

    #[error("Invalid argument for '{operation}' - '{value:?}', reason: {reason}")]
    InvalidArgument {
        value: Value,
        operation: String,
        reason: String,
    },

    #[error("Invalid variable mapping - {0} is not an object.")]
    InvalidVarMap(Value),

    #[error("Encountered an unexpected error. Please raise an issue on GitHub and include the following error message: {0}")]
    UnexpectedError(String),

    #[error("Wrong argument count - expected: {expected:?}, actual: {actual:?}")]
    WrongArgumentCount { expected: NumParams, actual: usize },

    /// No operator is registered under this name.
    #[error("Unknown operator: '{0}'")]
    UnknownOperator(String),

    /// `reduce`'s initial accumulator value was not a bool, number, or string.
    #[error("Unsupported accumulator type for reduce: '{0}'")]
    UnsupportedAccumulatorType(String),

    /// JSON parsing failed at the façade boundary.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Caught by the façade's panic boundary; wraps an internal assertion
    /// failure (including a panicking user-registered operator).
    #[error("Evaluation panicked: {0}")]
    EvaluationPanic(String),
}
