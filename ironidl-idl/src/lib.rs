//! # IronIDL IDL
//!
//! Solana IDL document model, JSON parser and validation.
//!
//! This crate provides:
//! - Serde models for the IDL JSON grammar (anchor and shank flavors)
//! - The closed primitive-key enumeration and type expressions
//! - Document parsing with duplicate-declaration checks
//! - Reference-resolution validation

pub mod document;
pub mod error;
pub mod parser;
pub mod types;
pub mod validation;

pub use document::{
    Idl, IdlDiscriminant, IdlErrorDef, IdlInstruction, IdlInstructionAccount, IdlMetadata,
    SHANK_ORIGIN,
};
pub use error::{IdlError, ParseError};
pub use parser::parse_idl;
pub use types::{
    EnumDef, IdlDefinedType, IdlEnumVariant, IdlField, IdlType, IdlTypeDefinition, PrimitiveKey,
    StructDef, TypeAliases,
};
pub use validation::validate_idl;
