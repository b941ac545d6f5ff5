//! IDL document definitions.
//!
//! This module contains the data structures representing a full IDL
//! document: instructions, account declarations, user-defined types,
//! error declarations and program metadata.

use crate::types::{IdlDefinedType, IdlField, IdlType, IdlTypeDefinition};
use serde::Deserialize;

/// Marker value in `metadata.origin` for shank-generated IDLs.
pub const SHANK_ORIGIN: &str = "shank";

/// A complete IDL document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Idl {
    /// Program version string.
    pub version: String,
    /// Program name.
    pub name: String,
    /// Ordered instruction declarations.
    pub instructions: Vec<IdlInstruction>,
    /// Ordered account declarations.
    #[serde(default)]
    pub accounts: Vec<IdlTypeDefinition>,
    /// Ordered user-defined type declarations.
    #[serde(default)]
    pub types: Vec<IdlTypeDefinition>,
    /// Ordered error declarations.
    #[serde(default)]
    pub errors: Vec<IdlErrorDef>,
    /// Program metadata.
    pub metadata: IdlMetadata,
}

impl Idl {
    /// Returns true if this IDL was produced by shank.
    #[must_use]
    pub fn is_shank(&self) -> bool {
        self.metadata.origin.as_deref() == Some(SHANK_ORIGIN)
    }

    /// Returns true if accounts carry an implicit leading discriminator.
    ///
    /// Shank IDLs encode their own discriminant layout; everything else
    /// gets the 8-byte account discriminator prepended.
    #[must_use]
    pub fn accounts_have_implicit_discriminator(&self) -> bool {
        !self.is_shank()
    }

    /// Looks up a declaration body by name, accounts first.
    #[must_use]
    pub fn resolve_field_type(&self, type_name: &str) -> Option<&IdlDefinedType> {
        self.accounts
            .iter()
            .chain(self.types.iter())
            .find(|def| def.name == type_name)
            .map(|def| &def.ty)
    }

    /// Returns true if any account declarations are present.
    #[must_use]
    pub fn has_accounts(&self) -> bool {
        !self.accounts.is_empty()
    }

    /// Returns true if any user-defined type declarations are present.
    #[must_use]
    pub fn has_types(&self) -> bool {
        !self.types.is_empty()
    }
}

/// Program metadata attached to an IDL document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdlMetadata {
    /// Program address (base58).
    pub address: String,
    /// Generator origin marker, e.g. `"shank"`.
    #[serde(default)]
    pub origin: Option<String>,
}

/// An instruction declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdlInstruction {
    /// Instruction name.
    pub name: String,
    /// Ordered account list.
    #[serde(default)]
    pub accounts: Vec<IdlInstructionAccount>,
    /// Ordered argument list.
    #[serde(default)]
    pub args: Vec<IdlField>,
    /// Explicit discriminant (shank extension).
    #[serde(default)]
    pub discriminant: Option<IdlDiscriminant>,
}

impl IdlInstruction {
    /// Returns true if the instruction declares an explicit discriminant.
    #[must_use]
    pub const fn has_discriminant(&self) -> bool {
        self.discriminant.is_some()
    }
}

/// An account entry within an instruction declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdlInstructionAccount {
    /// Account name.
    pub name: String,
    /// Whether the account is writable.
    #[serde(default)]
    pub is_mut: bool,
    /// Whether the account must sign.
    #[serde(default)]
    pub is_signer: bool,
    /// Human-readable description.
    #[serde(default)]
    pub desc: Option<String>,
    /// Whether the account may be omitted.
    #[serde(default)]
    pub optional: bool,
}

/// An explicit instruction discriminant (shank extension).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdlDiscriminant {
    /// Serialized type of the discriminant value.
    #[serde(rename = "type")]
    pub ty: IdlType,
    /// Discriminant value.
    pub value: u64,
}

/// An error declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdlErrorDef {
    /// Error code.
    pub code: u32,
    /// Error name.
    pub name: String,
    /// Optional human-readable message.
    #[serde(default)]
    pub msg: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_idl(origin: Option<&str>) -> Idl {
        let origin_field = origin
            .map(|o| format!(r#", "origin": "{o}""#))
            .unwrap_or_default();
        let json = format!(
            r#"{{
                "version": "0.1.0",
                "name": "fanout",
                "instructions": [],
                "metadata": {{"address": "Fan111111111111111111111111111111111111111"{origin_field}}}
            }}"#
        );
        serde_json::from_str(&json).expect("parse failed")
    }

    #[test]
    fn test_shank_detection() {
        assert!(!minimal_idl(None).is_shank());
        assert!(minimal_idl(Some("shank")).is_shank());
        assert!(!minimal_idl(Some("anchor")).is_shank());
    }

    #[test]
    fn test_implicit_discriminator() {
        assert!(minimal_idl(None).accounts_have_implicit_discriminator());
        assert!(!minimal_idl(Some("shank")).accounts_have_implicit_discriminator());
    }

    #[test]
    fn test_resolve_field_type_prefers_accounts() {
        let json = r#"{
            "version": "0.1.0",
            "name": "demo",
            "instructions": [],
            "accounts": [
                {"name": "Vault", "type": {"kind": "struct", "fields": [{"name": "bump", "type": "u8"}]}}
            ],
            "types": [
                {"name": "Config", "type": {"kind": "struct", "fields": []}}
            ],
            "metadata": {"address": "Demo11111111111111111111111111111111111111"}
        }"#;
        let idl: Idl = serde_json::from_str(json).expect("parse failed");
        assert!(idl.resolve_field_type("Vault").is_some());
        assert!(idl.resolve_field_type("Config").is_some());
        assert!(idl.resolve_field_type("Ghost").is_none());
    }

    #[test]
    fn test_instruction_deserialize() {
        let json = r#"{
            "name": "init",
            "accounts": [
                {"name": "authority", "isMut": false, "isSigner": true},
                {"name": "systemProgram", "isMut": false, "isSigner": false}
            ],
            "args": [{"name": "bump", "type": "u8"}],
            "discriminant": {"type": "u8", "value": 0}
        }"#;
        let ix: IdlInstruction = serde_json::from_str(json).expect("parse failed");
        assert_eq!(ix.name, "init");
        assert_eq!(ix.accounts.len(), 2);
        assert!(ix.accounts[0].is_signer);
        assert!(!ix.accounts[0].optional);
        assert!(ix.has_discriminant());
        assert_eq!(ix.discriminant.as_ref().map(|d| d.value), Some(0));
    }

    #[test]
    fn test_error_def_deserialize() {
        let json = r#"{"code": 6000, "name": "InvalidAuthority", "msg": "wrong authority"}"#;
        let err: IdlErrorDef = serde_json::from_str(json).expect("parse failed");
        assert_eq!(err.code, 6000);
        assert_eq!(err.msg.as_deref(), Some("wrong authority"));

        let json = r#"{"code": 6001, "name": "Bare"}"#;
        let err: IdlErrorDef = serde_json::from_str(json).expect("parse failed");
        assert!(err.msg.is_none());
    }
}
