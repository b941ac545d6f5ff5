//! Type mapper.
//!
//! Resolves IDL type expressions to target-language type strings and
//! serialization codec expressions, recording cross-module imports,
//! scalar-enum usage and fixability on a per-render usage context.
//!
//! The mapper itself is cheap configuration (lookup tables, alias table,
//! force-fixable set, render target); all mutable state lives in
//! [`Usages`], which must be cleared between independent renders.

use crate::case::serde_var_name;
use crate::error::CodegenError;
use crate::fixable::FixableTypes;
use crate::primitives::primary_type;
use crate::target::RenderTarget;
use ironidl_idl::{EnumDef, IdlField, IdlType, PrimitiveKey, TypeAliases};
use std::collections::{BTreeMap, BTreeSet};

/// Sentinel for mapping positions that have no field name.
pub const NO_NAME_PROVIDED: &str = "<no name provided>";

/// A field paired with its mapped representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedField {
    /// Field name.
    pub name: String,
    /// Mapped type or codec expression.
    pub ty: String,
}

/// Per-render usage context.
///
/// Accumulated while mapping one top-level entity and read back by the
/// renderer once rendering completes. Reusing a context across two
/// unrelated renders leaks fixability and imports from one into the
/// other, so renderers reset it first.
#[derive(Debug, Clone, Default)]
pub struct Usages {
    /// Imports recorded per referenced module.
    pub imports_by_module: BTreeMap<String, BTreeSet<String>>,
    /// Scalar enum variant lists recorded under their mapped names.
    pub scalar_enums_used: BTreeMap<String, Vec<String>>,
    /// External packages referenced by mapped representations.
    pub packages_used: BTreeSet<&'static str>,
    /// Whether any mapped sub-expression needs a variable-size codec.
    pub used_fixable_serde: bool,
}

/// Resolves IDL types against one document's declarations.
pub struct TypeMapper<'a> {
    /// Account declarations mapped name -> module.
    account_modules: &'a BTreeMap<String, String>,
    /// User-defined type declarations mapped name -> module.
    type_modules: &'a BTreeMap<String, String>,
    /// Aliases mapped name -> primitive key.
    aliases: &'a TypeAliases,
    /// Names already known to need a variable-size codec.
    force_fixable: &'a FixableTypes,
    target: &'a dyn RenderTarget,
    usages: Usages,
}

impl<'a> TypeMapper<'a> {
    /// Creates a new mapper over the given resolution tables.
    #[must_use]
    pub fn new(
        account_modules: &'a BTreeMap<String, String>,
        type_modules: &'a BTreeMap<String, String>,
        aliases: &'a TypeAliases,
        force_fixable: &'a FixableTypes,
        target: &'a dyn RenderTarget,
    ) -> Self {
        Self {
            account_modules,
            type_modules,
            aliases,
            force_fixable,
            target,
            usages: Usages::default(),
        }
    }

    /// Resets the per-render usage context.
    pub fn clear_usages(&mut self) {
        self.usages = Usages::default();
    }

    /// Returns true if the current render needed a variable-size codec.
    #[must_use]
    pub fn used_fixable_serde(&self) -> bool {
        self.usages.used_fixable_serde
    }

    /// Returns the imports recorded for the current render.
    #[must_use]
    pub fn imports_by_module(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.usages.imports_by_module
    }

    /// Returns the scalar enums recorded for the current render.
    #[must_use]
    pub fn scalar_enums_used(&self) -> &BTreeMap<String, Vec<String>> {
        &self.usages.scalar_enums_used
    }

    /// Returns the external packages recorded for the current render.
    #[must_use]
    pub fn packages_used(&self) -> &BTreeSet<&'static str> {
        &self.usages.packages_used
    }

    /// Creates a mapper sharing this one's configuration with a fresh context.
    #[must_use]
    pub fn fork(&self) -> TypeMapper<'a> {
        TypeMapper::new(
            self.account_modules,
            self.type_modules,
            self.aliases,
            self.force_fixable,
            self.target,
        )
    }

    /// Folds another mapper's accumulated usages into this one.
    pub fn merge_usages(&mut self, other: &TypeMapper<'_>) {
        for (module, names) in &other.usages.imports_by_module {
            self.usages
                .imports_by_module
                .entry(module.clone())
                .or_default()
                .extend(names.iter().cloned());
        }
        for (name, variants) in &other.usages.scalar_enums_used {
            self.usages
                .scalar_enums_used
                .entry(name.clone())
                .or_insert_with(|| variants.clone());
        }
        self.usages
            .packages_used
            .extend(other.usages.packages_used.iter());
        self.usages.used_fixable_serde |= other.usages.used_fixable_serde;
    }

    // -----------------
    // Type representation mapping
    // -----------------

    /// Maps a type expression to its target-language representation.
    ///
    /// Records imports, scalar-enum usage and fixability on the current
    /// usage context as side effects.
    ///
    /// # Errors
    /// Returns `CodegenError` for unresolved references, anonymous or
    /// conflicting enums, and unsupported shapes.
    pub fn map(&mut self, ty: &IdlType, name: &str) -> Result<String, CodegenError> {
        match ty {
            IdlType::Primitive(key) => Ok(self.map_primitive(*key)),
            IdlType::Option { option } => {
                // Presence-dependent payload: the serialized width varies,
                // nullability of the representation is the caller's concern.
                let inner = self.map(option, name)?;
                self.usages.used_fixable_serde = true;
                Ok(inner)
            }
            IdlType::Vec { vec } => {
                let inner = self.map(vec, name)?;
                self.usages.used_fixable_serde = true;
                Ok(self.target.sequence(&inner))
            }
            IdlType::Array { array: (inner, _) } => {
                let inner = self.map(inner, name)?;
                Ok(self.target.sequence(&inner))
            }
            IdlType::Defined { defined } => match self.aliases.get(defined) {
                Some(key) => Ok(self.map_primitive(*key)),
                None => {
                    self.record_defined(defined, name)?;
                    Ok(self.target.defined(defined))
                }
            },
            IdlType::Enum(e) => self.map_enum(e, name),
        }
    }

    /// Maps a type expression appearing in an unnamed position.
    pub fn map_unnamed(&mut self, ty: &IdlType) -> Result<String, CodegenError> {
        self.map(ty, NO_NAME_PROVIDED)
    }

    /// Maps each field to its target-language representation.
    pub fn map_fields(&mut self, fields: &[IdlField]) -> Result<Vec<MappedField>, CodegenError> {
        fields
            .iter()
            .map(|f| {
                Ok(MappedField {
                    name: f.name.clone(),
                    ty: self.map(&f.ty, &f.name)?,
                })
            })
            .collect()
    }

    /// Maps an enum body under the given name.
    ///
    /// Scalar enums are recorded in the usage table; a second recording
    /// under the same name with differing variants is a fatal
    /// consistency violation. Data enums always need a variable-size
    /// codec.
    pub fn map_enum(&mut self, e: &EnumDef, name: &str) -> Result<String, CodegenError> {
        if name == NO_NAME_PROVIDED || name.is_empty() {
            return Err(CodegenError::AnonymousEnum);
        }
        if e.is_scalar() {
            self.record_scalar_enum(name, e)?;
        } else {
            for variant in &e.variants {
                if let Some(fields) = &variant.fields {
                    for field in fields {
                        self.map(&field.ty, &field.name)?;
                    }
                }
            }
            // Data enum size depends on the encoded variant.
            self.usages.used_fixable_serde = true;
        }
        Ok(name.to_string())
    }

    fn map_primitive(&mut self, key: PrimitiveKey) -> String {
        let mapped = primary_type(key);
        if mapped.serde.is_fixable() {
            self.usages.used_fixable_serde = true;
        }
        if key == PrimitiveKey::PublicKey {
            self.usages.packages_used.insert("web3");
        }
        self.target.primitive(key).to_string()
    }

    // -----------------
    // Serde codec mapping
    // -----------------

    /// Maps a type expression to its serialization codec expression.
    ///
    /// Shares the usage context with [`map`](Self::map): both record the
    /// same fixability and resolution side effects.
    ///
    /// # Errors
    /// Returns `CodegenError` for the same conditions as `map`.
    pub fn map_serde(&mut self, ty: &IdlType, name: &str) -> Result<String, CodegenError> {
        match ty {
            IdlType::Primitive(key) => Ok(self.map_primitive_serde(*key)),
            IdlType::Option { option } => {
                let inner = self.map_serde(option, name)?;
                self.usages.used_fixable_serde = true;
                self.usages.packages_used.insert("beet");
                Ok(format!("beet.coption({inner})"))
            }
            IdlType::Vec { vec } => {
                let inner = self.map_serde(vec, name)?;
                self.usages.used_fixable_serde = true;
                self.usages.packages_used.insert("beet");
                Ok(format!("beet.array({inner})"))
            }
            IdlType::Array {
                array: (inner, len),
            } => {
                let inner = self.map_serde(inner, name)?;
                self.usages.packages_used.insert("beet");
                Ok(format!("beet.uniformFixedSizeArray({inner}, {len})"))
            }
            IdlType::Defined { defined } => match self.aliases.get(defined) {
                Some(key) => Ok(self.map_primitive_serde(*key)),
                None => {
                    self.record_defined(defined, name)?;
                    Ok(serde_var_name(defined))
                }
            },
            IdlType::Enum(e) => {
                self.map_enum(e, name)?;
                self.usages.packages_used.insert("beet");
                if e.is_scalar() {
                    Ok(format!("beet.fixedScalarEnum({name})"))
                } else {
                    Ok(serde_var_name(name))
                }
            }
        }
    }

    /// Maps each field to its serialization codec expression.
    pub fn map_serde_fields(
        &mut self,
        fields: &[IdlField],
    ) -> Result<Vec<MappedField>, CodegenError> {
        fields
            .iter()
            .map(|f| {
                Ok(MappedField {
                    name: f.name.clone(),
                    ty: self.map_serde(&f.ty, &f.name)?,
                })
            })
            .collect()
    }

    fn map_primitive_serde(&mut self, key: PrimitiveKey) -> String {
        let descriptor = primary_type(key).serde;
        if descriptor.is_fixable() {
            self.usages.used_fixable_serde = true;
        }
        let package = descriptor.codec.split('.').next().unwrap_or("beet");
        self.usages
            .packages_used
            .insert(if package == "beetSolana" { "beetSolana" } else { "beet" });
        descriptor.codec.to_string()
    }

    // -----------------
    // Resolution
    // -----------------

    fn record_defined(&mut self, type_name: &str, field: &str) -> Result<(), CodegenError> {
        let module = self
            .account_modules
            .get(type_name)
            .or_else(|| self.type_modules.get(type_name))
            .ok_or_else(|| CodegenError::unknown_type(type_name, field))?;
        self.usages
            .imports_by_module
            .entry(module.clone())
            .or_default()
            .insert(type_name.to_string());
        if self.force_fixable.contains(type_name) {
            self.usages.used_fixable_serde = true;
        }
        Ok(())
    }

    fn record_scalar_enum(&mut self, name: &str, e: &EnumDef) -> Result<(), CodegenError> {
        let variants = e.variant_names();
        match self.usages.scalar_enums_used.get(name) {
            Some(existing) if *existing != variants => Err(CodegenError::ConflictingEnum {
                name: name.to_string(),
                first: existing.clone(),
                second: variants,
            }),
            Some(_) => Ok(()),
            None => {
                self.usages
                    .scalar_enums_used
                    .insert(name.to_string(), variants);
                Ok(())
            }
        }
    }
}
