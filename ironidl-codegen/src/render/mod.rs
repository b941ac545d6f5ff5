//! Renderers.
//!
//! Thin presentation layers over the type mapper. Each renderer clears
//! the mapper's usage context before doing anything, and reads the
//! fixability flag only after its own rendering completes.

pub mod graphql;
pub mod sdk;

/// Output of rendering one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Generated text block.
    pub code: String,
    /// Whether the entity needs a variable-size codec.
    pub is_fixable: bool,
}
