//! # IronIDL
//!
//! Solana IDL to client SDK and GraphQL schema generator.
//!
//! IronIDL walks an IDL document's type graph and emits derived
//! artifacts: typed TypeScript client SDK modules or a GraphQL schema.
//!
//! ## Features
//!
//! - **IDL parsing** - Serde models for anchor and shank JSON IDLs
//! - **Type mapping** - One mapper, pluggable output syntax adapters
//! - **Fixability inference** - Two-pass propagation of variable-size
//!   serialization through type composition
//! - **Deterministic output** - The same IDL always produces the same
//!   bytes
//!
//! ## Quick Start
//!
//! ```ignore
//! use ironidl::prelude::*;
//!
//! let output = ironidl::codegen::generate_from_json(
//!     &idl_json,
//!     GeneratorOptions {
//!         target: OutputTarget::Graphql,
//!         ..GeneratorOptions::default()
//!     },
//! )?;
//! write_output(&output, std::path::Path::new("generated"))?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`idl`] - IDL document model, parsing and validation
//! - [`codegen`] - Type mapping, fixability propagation and rendering
//! - [`writer`] - File-writing driver over generated output

pub mod prelude;
pub mod writer;

/// IDL document model, parsing and validation.
pub mod idl {
    pub use ironidl_idl::*;
}

/// Code generation from IDL documents.
pub mod codegen {
    pub use ironidl_codegen::*;
}
