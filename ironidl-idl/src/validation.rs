//! IDL validation utilities.
//!
//! This module checks a parsed document for internal consistency before
//! any code generation runs: every defined-type reference must resolve,
//! and enum declarations must be well-formed.

use crate::document::Idl;
use crate::error::IdlError;
use crate::types::{EnumDef, IdlDefinedType, IdlType, TypeAliases};
use std::collections::BTreeSet;

/// Validates a parsed IDL document.
///
/// # Arguments
/// * `idl` - The document to validate
/// * `aliases` - Alias names that stand in for primitive keys
///
/// # Returns
/// Ok(()) if valid, or `IdlError` describing the issue.
///
/// # Errors
/// Returns `IdlError` if any defined-type reference is unresolved or an
/// enum declaration is malformed.
pub fn validate_idl(idl: &Idl, aliases: &TypeAliases) -> Result<(), IdlError> {
    let known = known_names(idl, aliases);

    for def in idl.types.iter().chain(idl.accounts.iter()) {
        validate_definition(&def.name, &def.ty, &known)?;
    }

    for ix in &idl.instructions {
        for arg in &ix.args {
            validate_type(&arg.ty, &arg.name, &known)?;
        }
        if let Some(disc) = &ix.discriminant {
            validate_type(&disc.ty, &ix.name, &known)?;
        }
    }

    Ok(())
}

/// Collects every name a defined-type reference may resolve to.
fn known_names<'a>(idl: &'a Idl, aliases: &'a TypeAliases) -> BTreeSet<&'a str> {
    idl.types
        .iter()
        .map(|d| d.name.as_str())
        .chain(idl.accounts.iter().map(|d| d.name.as_str()))
        .chain(aliases.keys().map(String::as_str))
        .collect()
}

/// Validates one named declaration body.
fn validate_definition(
    name: &str,
    ty: &IdlDefinedType,
    known: &BTreeSet<&str>,
) -> Result<(), IdlError> {
    match ty {
        IdlDefinedType::Struct(s) => {
            for field in &s.fields {
                validate_type(&field.ty, &field.name, known)?;
            }
            Ok(())
        }
        IdlDefinedType::Enum(e) => validate_enum(name, e, known),
    }
}

/// Validates an enum body: non-empty, unique variants, resolvable payloads.
fn validate_enum(name: &str, e: &EnumDef, known: &BTreeSet<&str>) -> Result<(), IdlError> {
    if e.variants.is_empty() {
        return Err(IdlError::EmptyEnum {
            name: name.to_string(),
        });
    }

    let mut seen = BTreeSet::new();
    for variant in &e.variants {
        if !seen.insert(variant.name.as_str()) {
            return Err(IdlError::DuplicateVariant {
                enum_name: name.to_string(),
                variant: variant.name.clone(),
            });
        }
        if let Some(fields) = &variant.fields {
            for field in fields {
                validate_type(&field.ty, &field.name, known)?;
            }
        }
    }

    Ok(())
}

/// Walks a type expression checking every defined-type reference.
fn validate_type(ty: &IdlType, field: &str, known: &BTreeSet<&str>) -> Result<(), IdlError> {
    match ty {
        IdlType::Primitive(_) => Ok(()),
        IdlType::Option { option } => validate_type(option, field, known),
        IdlType::Vec { vec } => validate_type(vec, field, known),
        IdlType::Array { array } => validate_type(&array.0, field, known),
        IdlType::Defined { defined } => {
            if known.contains(defined.as_str()) {
                Ok(())
            } else {
                Err(IdlError::type_not_found(defined, field))
            }
        }
        IdlType::Enum(e) => validate_enum(field, e, known),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_idl;
    use crate::types::PrimitiveKey;

    fn idl_with_types(types_json: &str) -> Idl {
        let json = format!(
            r#"{{
                "version": "0.1.0",
                "name": "demo",
                "instructions": [],
                "types": {types_json},
                "metadata": {{"address": "Demo11111111111111111111111111111111111111"}}
            }}"#
        );
        parse_idl(&json).expect("Failed to parse")
    }

    #[test]
    fn test_validate_resolved_reference() {
        let idl = idl_with_types(
            r#"[
                {"name": "Creator", "type": {"kind": "struct", "fields": [{"name": "share", "type": "u8"}]}},
                {"name": "Config", "type": {"kind": "struct", "fields": [
                    {"name": "creators", "type": {"vec": {"defined": "Creator"}}}
                ]}}
            ]"#,
        );
        assert!(validate_idl(&idl, &TypeAliases::new()).is_ok());
    }

    #[test]
    fn test_validate_unresolved_reference() {
        let idl = idl_with_types(
            r#"[
                {"name": "Config", "type": {"kind": "struct", "fields": [
                    {"name": "ghost", "type": {"defined": "Ghost"}}
                ]}}
            ]"#,
        );
        let result = validate_idl(&idl, &TypeAliases::new());
        assert!(matches!(result, Err(IdlError::TypeNotFound { .. })));
    }

    #[test]
    fn test_validate_alias_resolves_reference() {
        let idl = idl_with_types(
            r#"[
                {"name": "Config", "type": {"kind": "struct", "fields": [
                    {"name": "key", "type": {"defined": "UnixTimestamp"}}
                ]}}
            ]"#,
        );
        let mut aliases = TypeAliases::new();
        aliases.insert("UnixTimestamp".to_string(), PrimitiveKey::I64);
        assert!(validate_idl(&idl, &aliases).is_ok());
    }

    #[test]
    fn test_validate_empty_enum() {
        let idl = idl_with_types(
            r#"[{"name": "Nothing", "type": {"kind": "enum", "variants": []}}]"#,
        );
        let result = validate_idl(&idl, &TypeAliases::new());
        assert!(matches!(result, Err(IdlError::EmptyEnum { .. })));
    }

    #[test]
    fn test_validate_duplicate_variant() {
        let idl = idl_with_types(
            r#"[{"name": "Side", "type": {"kind": "enum", "variants": [
                {"name": "Left"}, {"name": "Left"}
            ]}}]"#,
        );
        let result = validate_idl(&idl, &TypeAliases::new());
        assert!(matches!(result, Err(IdlError::DuplicateVariant { .. })));
    }

    #[test]
    fn test_validate_data_variant_payload_reference() {
        let idl = idl_with_types(
            r#"[{"name": "Action", "type": {"kind": "enum", "variants": [
                {"name": "Noop"},
                {"name": "Transfer", "fields": [{"name": "target", "type": {"defined": "Missing"}}]}
            ]}}]"#,
        );
        let result = validate_idl(&idl, &TypeAliases::new());
        assert!(matches!(result, Err(IdlError::TypeNotFound { .. })));
    }
}
