//! Render targets.
//!
//! The type mapper is target-agnostic: resolution and fixability live in
//! one place, and the output syntax is supplied by a thin adapter. Two
//! adapters exist, one per artifact the generator can produce.

use crate::primitives::primary_type;
use ironidl_idl::PrimitiveKey;

/// Output artifact selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputTarget {
    /// TypeScript client SDK modules.
    #[default]
    Sdk,
    /// GraphQL schema document.
    Graphql,
}

impl OutputTarget {
    /// Returns the render target adapter for this output.
    #[must_use]
    pub fn render_target(&self) -> &'static dyn RenderTarget {
        match self {
            Self::Sdk => &SdkTarget,
            Self::Graphql => &GraphqlTarget,
        }
    }
}

/// Presentation adapter supplying target-language type syntax.
pub trait RenderTarget {
    /// Target name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Representation of a primitive key.
    fn primitive(&self, key: PrimitiveKey) -> &'static str;

    /// Wraps an element representation as a homogeneous sequence.
    fn sequence(&self, inner: &str) -> String;

    /// Decorates a resolved defined-type name.
    fn defined(&self, name: &str) -> String;
}

/// TypeScript SDK syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct SdkTarget;

impl RenderTarget for SdkTarget {
    fn name(&self) -> &'static str {
        "sdk"
    }

    fn primitive(&self, key: PrimitiveKey) -> &'static str {
        primary_type(key).sdk
    }

    fn sequence(&self, inner: &str) -> String {
        format!("{inner}[]")
    }

    fn defined(&self, name: &str) -> String {
        name.to_string()
    }
}

/// GraphQL SDL syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphqlTarget;

impl RenderTarget for GraphqlTarget {
    fn name(&self) -> &'static str {
        "graphql"
    }

    fn primitive(&self, key: PrimitiveKey) -> &'static str {
        primary_type(key).graphql
    }

    fn sequence(&self, inner: &str) -> String {
        format!("[{inner}]")
    }

    // Defined references are non-null in the schema; callers rendering
    // positions where the decoration is unwanted strip it.
    fn defined(&self, name: &str) -> String {
        format!("{name}!")
    }
}
