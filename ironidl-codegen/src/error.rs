//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// IDL parsing error.
    #[error("IDL parse error: {0}")]
    Parse(#[from] ironidl_idl::ParseError),

    /// IDL validation error.
    #[error("IDL error: {0}")]
    Idl(#[from] ironidl_idl::IdlError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown type reference.
    #[error("unknown type '{type_name}' in field '{field}' is neither a declared type nor an account")]
    UnknownType {
        /// Type name.
        type_name: String,
        /// Field name.
        field: String,
    },

    /// Two enum usages under one name with differing variants.
    #[error("found two enum variant specs for '{name}': {first:?} and {second:?}")]
    ConflictingEnum {
        /// Enum name.
        name: String,
        /// Previously recorded variant names.
        first: Vec<String>,
        /// Conflicting variant names.
        second: Vec<String>,
    },

    /// Enum mapped without a usable field name.
    #[error("need to provide a name to map enum types")]
    AnonymousEnum,

    /// Type shape the mapper does not handle.
    #[error("type {shape} required for '{field}' is not yet supported")]
    Unsupported {
        /// Description of the offending shape.
        shape: String,
        /// Field name.
        field: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates an unknown type reference error.
    pub fn unknown_type(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            field: field.into(),
        }
    }
}
