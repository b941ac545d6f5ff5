//! IDL JSON parser.
//!
//! Thin wrapper over serde deserialization plus the structural checks
//! that serde cannot express (duplicate declaration names).

use crate::document::Idl;
use crate::error::ParseError;
use std::collections::BTreeSet;

/// Parses an IDL document from a JSON string.
///
/// # Arguments
/// * `json` - IDL document content
///
/// # Returns
/// Parsed document or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed, does not match the IDL
/// grammar, or contains duplicate declarations.
pub fn parse_idl(json: &str) -> Result<Idl, ParseError> {
    let idl: Idl = serde_json::from_str(json)?;
    check_duplicates(&idl)?;
    Ok(idl)
}

/// Rejects duplicate declaration names.
///
/// Accounts and user-defined types share one namespace: a defined-type
/// reference must resolve to exactly one declaration across both lists.
fn check_duplicates(idl: &Idl) -> Result<(), ParseError> {
    let mut declared = BTreeSet::new();
    for def in &idl.types {
        if !declared.insert(def.name.as_str()) {
            return Err(ParseError::duplicate("type", &def.name));
        }
    }
    for def in &idl.accounts {
        if !declared.insert(def.name.as_str()) {
            return Err(ParseError::duplicate("account", &def.name));
        }
    }

    let mut instructions = BTreeSet::new();
    for ix in &idl.instructions {
        if !instructions.insert(ix.name.as_str()) {
            return Err(ParseError::duplicate("instruction", &ix.name));
        }
    }

    Ok(())
}
