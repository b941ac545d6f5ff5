//! Convenience re-exports for common usage.

pub use crate::writer::write_output;
pub use ironidl_codegen::{
    CodegenError, GeneratedOutput, Generator, GeneratorOptions, OutputTarget,
};
pub use ironidl_idl::{Idl, IdlError, ParseError, TypeAliases, parse_idl, validate_idl};
