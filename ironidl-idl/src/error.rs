//! Error types for IDL parsing and validation.

use thiserror::Error;

/// Error type for IDL parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (type, account, instruction).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Invalid document structure.
    #[error("invalid IDL structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for IDL validation.
#[derive(Debug, Error)]
pub enum IdlError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Defined-type reference that resolves to nothing.
    #[error("unknown type '{type_name}' referenced in field '{field}'")]
    TypeNotFound {
        /// Referenced type name.
        type_name: String,
        /// Field the reference appears in.
        field: String,
    },

    /// Enum with no variants.
    #[error("enum '{name}' declares no variants")]
    EmptyEnum {
        /// Enum name.
        name: String,
    },

    /// Duplicate variant name within an enum.
    #[error("duplicate variant '{variant}' in enum '{enum_name}'")]
    DuplicateVariant {
        /// Enum name.
        enum_name: String,
        /// Duplicated variant name.
        variant: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

impl IdlError {
    /// Creates an unresolved type reference error.
    pub fn type_not_found(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::TypeNotFound {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
