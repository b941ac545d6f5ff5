//! # IronIDL Codegen
//!
//! Client SDK and GraphQL schema generation from Solana IDLs.
//!
//! This crate provides:
//! - The primary type table and target-language type mapping
//! - Two-pass fixability propagation over user-defined types
//! - TypeScript SDK and GraphQL schema renderers
//! - The generation orchestrator producing per-entity text blocks

pub mod case;
pub mod discriminator;
pub mod error;
pub mod fixable;
pub mod generator;
pub mod known_pubkeys;
pub mod mapper;
pub mod primitives;
pub mod render;
pub mod target;

pub use error::CodegenError;
pub use fixable::{FixableTypes, compute_fixable_types};
pub use generator::{Formatter, GeneratedOutput, Generator, GeneratorOptions};
pub use mapper::{MappedField, NO_NAME_PROVIDED, TypeMapper, Usages};
pub use primitives::{PrimaryType, SerdeDescriptor, primary_type};
pub use render::Rendered;
pub use target::{GraphqlTarget, OutputTarget, RenderTarget, SdkTarget};

/// Generates output from an IDL JSON string.
///
/// # Arguments
/// * `json` - IDL document content
/// * `options` - Generation options
///
/// # Returns
/// Generated text blocks keyed by logical unit name.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or generation fails.
pub fn generate_from_json(
    json: &str,
    options: GeneratorOptions,
) -> Result<GeneratedOutput, CodegenError> {
    let idl = ironidl_idl::parse_idl(json)?;
    Generator::new(&idl, options).render()
}

/// Generates output from an IDL JSON file.
///
/// # Arguments
/// * `path` - Path to the IDL JSON file
/// * `options` - Generation options
///
/// # Returns
/// Generated text blocks keyed by logical unit name.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation or generation
/// fails.
pub fn generate_from_file(
    path: &std::path::Path,
    options: GeneratorOptions,
) -> Result<GeneratedOutput, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_from_json(&json, options)
}
