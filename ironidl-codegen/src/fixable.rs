//! Fixability propagation.
//!
//! A named type is "fixable" when its serialized byte length cannot be
//! determined without inspecting instance data. Fixability propagates
//! through composition: a struct referencing an already-fixable type is
//! itself fixable even if all of its own fields are statically sized.
//!
//! Because a declaration may reference a type declared later, the set is
//! computed in two passes: pass 1 discovers each type's self-fixability,
//! pass 2 re-maps every declaration against the pass-1 set. The union of
//! both passes is the final set.

use crate::error::CodegenError;
use crate::mapper::TypeMapper;
use crate::target::RenderTarget;
use ironidl_idl::{Idl, IdlDefinedType, IdlTypeDefinition, TypeAliases};
use std::collections::BTreeMap;
use tracing::debug;

/// Names of types known to need a variable-size codec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixableTypes(std::collections::BTreeSet<String>);

impl FixableTypes {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type name to the set.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.0.insert(name.into());
    }

    /// Returns true if the named type is in the set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Returns the number of types in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no type has been marked fixable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the type names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Maps one declaration and reports whether it needs a fixable codec.
///
/// A declaration with no fields or variants has no serialized payload
/// and short-circuits to `false` before any mapping runs.
///
/// # Errors
/// Returns `CodegenError` if mapping any field fails.
pub fn determine_is_fixable(
    mapper: &mut TypeMapper<'_>,
    def: &IdlTypeDefinition,
) -> Result<bool, CodegenError> {
    mapper.clear_usages();
    match &def.ty {
        IdlDefinedType::Struct(s) => {
            if s.fields.is_empty() {
                return Ok(false);
            }
            for field in &s.fields {
                mapper.map(&field.ty, &field.name)?;
            }
        }
        IdlDefinedType::Enum(e) => {
            if e.variants.is_empty() {
                return Ok(false);
            }
            mapper.map_enum(e, &def.name)?;
        }
    }
    Ok(mapper.used_fixable_serde())
}

/// Computes the fixable set for every user-defined type in a document.
///
/// Pass 1 runs to completion over all declarations before pass 2
/// consults the accumulated set, so forward references resolve
/// correctly regardless of declaration order.
///
/// # Errors
/// Returns `CodegenError` if mapping any declaration fails.
pub fn compute_fixable_types(
    idl: &Idl,
    account_modules: &BTreeMap<String, String>,
    type_modules: &BTreeMap<String, String>,
    aliases: &TypeAliases,
    target: &dyn RenderTarget,
) -> Result<FixableTypes, CodegenError> {
    let mut fixable = FixableTypes::new();

    // Pass 1: self-fixability from each declaration's own structure.
    let none = FixableTypes::new();
    for def in &idl.types {
        let mut mapper = TypeMapper::new(account_modules, type_modules, aliases, &none, target);
        if determine_is_fixable(&mut mapper, def)? {
            fixable.insert(&def.name);
        }
    }

    // Pass 2: re-map with the pass-1 set so references to fixable types
    // propagate. The final set is the union of both passes.
    let pass_one = fixable.clone();
    for def in &idl.types {
        let mut mapper = TypeMapper::new(account_modules, type_modules, aliases, &pass_one, target);
        if determine_is_fixable(&mut mapper, def)? {
            fixable.insert(&def.name);
        }
    }

    debug!(
        total = idl.types.len(),
        fixable = fixable.len(),
        "computed fixable type set"
    );
    Ok(fixable)
}
