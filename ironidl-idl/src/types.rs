//! IDL type definitions.
//!
//! This module contains the data structures representing the IDL type
//! grammar: primitive keys, composite wrappers (option, vec, array),
//! defined-type references and enums.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Primitive type keys of the IDL type grammar.
///
/// The enumeration is closed: every primitive a document can name is
/// listed here, so primary-type-table lookups are total by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum PrimitiveKey {
    /// Unsigned 8-bit integer.
    #[serde(rename = "u8")]
    U8,
    /// Unsigned 16-bit integer.
    #[serde(rename = "u16")]
    U16,
    /// Unsigned 32-bit integer.
    #[serde(rename = "u32")]
    U32,
    /// Unsigned 64-bit integer.
    #[serde(rename = "u64")]
    U64,
    /// Unsigned 128-bit integer.
    #[serde(rename = "u128")]
    U128,
    /// Unsigned 256-bit integer.
    #[serde(rename = "u256")]
    U256,
    /// Unsigned 512-bit integer.
    #[serde(rename = "u512")]
    U512,
    /// Signed 8-bit integer.
    #[serde(rename = "i8")]
    I8,
    /// Signed 16-bit integer.
    #[serde(rename = "i16")]
    I16,
    /// Signed 32-bit integer.
    #[serde(rename = "i32")]
    I32,
    /// Signed 64-bit integer.
    #[serde(rename = "i64")]
    I64,
    /// Signed 128-bit integer.
    #[serde(rename = "i128")]
    I128,
    /// Signed 256-bit integer.
    #[serde(rename = "i256")]
    I256,
    /// Signed 512-bit integer.
    #[serde(rename = "i512")]
    I512,
    /// Boolean.
    #[serde(rename = "bool")]
    Bool,
    /// Variable-length UTF-8 string.
    #[serde(rename = "string")]
    String,
    /// Variable-length byte buffer.
    #[serde(rename = "bytes")]
    Bytes,
    /// Opaque 32-byte public key.
    #[serde(rename = "publicKey", alias = "pubkey")]
    PublicKey,
}

impl PrimitiveKey {
    /// Every primitive key, in declaration order.
    pub const ALL: [Self; 18] = [
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::U128,
        Self::U256,
        Self::U512,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::I128,
        Self::I256,
        Self::I512,
        Self::Bool,
        Self::String,
        Self::Bytes,
        Self::PublicKey,
    ];

    /// Returns the serialized byte width, or `None` for variable-size keys.
    #[must_use]
    pub const fn byte_width(&self) -> Option<usize> {
        match self {
            Self::U8 | Self::I8 | Self::Bool => Some(1),
            Self::U16 | Self::I16 => Some(2),
            Self::U32 | Self::I32 => Some(4),
            Self::U64 | Self::I64 => Some(8),
            Self::U128 | Self::I128 => Some(16),
            Self::U256 | Self::I256 | Self::PublicKey => Some(32),
            Self::U512 | Self::I512 => Some(64),
            Self::String | Self::Bytes => None,
        }
    }

    /// Returns the IDL name for this key.
    #[must_use]
    pub const fn idl_name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::U256 => "u256",
            Self::U512 => "u512",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::I256 => "i256",
            Self::I512 => "i512",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::PublicKey => "publicKey",
        }
    }

    /// Parses a primitive key from its IDL name.
    #[must_use]
    pub fn from_idl_name(name: &str) -> Option<Self> {
        match name {
            "u8" => Some(Self::U8),
            "u16" => Some(Self::U16),
            "u32" => Some(Self::U32),
            "u64" => Some(Self::U64),
            "u128" => Some(Self::U128),
            "u256" => Some(Self::U256),
            "u512" => Some(Self::U512),
            "i8" => Some(Self::I8),
            "i16" => Some(Self::I16),
            "i32" => Some(Self::I32),
            "i64" => Some(Self::I64),
            "i128" => Some(Self::I128),
            "i256" => Some(Self::I256),
            "i512" => Some(Self::I512),
            "bool" => Some(Self::Bool),
            "string" => Some(Self::String),
            "bytes" => Some(Self::Bytes),
            "publicKey" | "pubkey" => Some(Self::PublicKey),
            _ => None,
        }
    }

    /// Returns true if this is a signed integer key.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::I128 | Self::I256 | Self::I512
        )
    }

    /// Returns true if this is an unsigned integer key.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::U128 | Self::U256 | Self::U512
        )
    }

    /// Returns true if the serialized width depends on instance data.
    #[must_use]
    pub const fn is_variable_size(&self) -> bool {
        self.byte_width().is_none()
    }
}

/// An IDL type expression.
///
/// Deserializes from the IDL JSON grammar: primitives are bare strings,
/// wrappers are single-key objects (`{"vec": ...}`), arrays carry the
/// element type and static length as a two-element list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IdlType {
    /// Primitive type.
    Primitive(PrimitiveKey),
    /// Nullable wrapper.
    Option {
        /// Inner type.
        option: Box<IdlType>,
    },
    /// Dynamically sized homogeneous sequence.
    Vec {
        /// Element type.
        vec: Box<IdlType>,
    },
    /// Statically sized homogeneous sequence.
    Array {
        /// Element type and static length.
        array: (Box<IdlType>, usize),
    },
    /// Reference to a user-declared type or account by name.
    Defined {
        /// Referenced declaration name.
        defined: String,
    },
    /// Inline enum type.
    Enum(EnumDef),
}

impl IdlType {
    /// Creates a primitive type.
    #[must_use]
    pub const fn primitive(key: PrimitiveKey) -> Self {
        Self::Primitive(key)
    }

    /// Creates an option wrapping `inner`.
    #[must_use]
    pub fn option(inner: IdlType) -> Self {
        Self::Option {
            option: Box::new(inner),
        }
    }

    /// Creates a vec of `inner`.
    #[must_use]
    pub fn vec(inner: IdlType) -> Self {
        Self::Vec {
            vec: Box::new(inner),
        }
    }

    /// Creates a fixed array of `inner` with static length `len`.
    #[must_use]
    pub fn array(inner: IdlType, len: usize) -> Self {
        Self::Array {
            array: (Box::new(inner), len),
        }
    }

    /// Creates a reference to the declaration named `name`.
    #[must_use]
    pub fn defined(name: impl Into<String>) -> Self {
        Self::Defined {
            defined: name.into(),
        }
    }

    /// Returns true if this is a primitive type.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Returns true if this is a defined-type reference.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        matches!(self, Self::Defined { .. })
    }

    /// Returns true if this is an enum type.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }
}

/// A named field with an IDL type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdlField {
    /// Field name.
    pub name: String,
    /// Field type.
    #[serde(rename = "type")]
    pub ty: IdlType,
}

impl IdlField {
    /// Creates a new field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: IdlType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// An enum variant, optionally carrying payload fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdlEnumVariant {
    /// Variant name.
    pub name: String,
    /// Payload fields, if this is a data variant.
    #[serde(default)]
    pub fields: Option<Vec<IdlField>>,
}

impl IdlEnumVariant {
    /// Creates a scalar variant.
    #[must_use]
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: None,
        }
    }

    /// Creates a data variant with payload fields.
    #[must_use]
    pub fn with_fields(name: impl Into<String>, fields: Vec<IdlField>) -> Self {
        Self {
            name: name.into(),
            fields: Some(fields),
        }
    }

    /// Returns true if this variant carries payload fields.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.fields.as_ref().is_some_and(|f| !f.is_empty())
    }
}

/// Struct definition body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructDef {
    /// Ordered fields.
    #[serde(default)]
    pub fields: Vec<IdlField>,
}

impl StructDef {
    /// Creates a struct body from its fields.
    #[must_use]
    pub fn new(fields: Vec<IdlField>) -> Self {
        Self { fields }
    }

    /// Returns true if the struct declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Enum definition body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnumDef {
    /// Ordered variants.
    pub variants: Vec<IdlEnumVariant>,
}

impl EnumDef {
    /// Creates an enum body from its variants.
    #[must_use]
    pub fn new(variants: Vec<IdlEnumVariant>) -> Self {
        Self { variants }
    }

    /// Returns true if no variant carries payload fields.
    ///
    /// Scalar-vs-data classification is purely structural; names and
    /// annotations play no part in it.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        !self.variants.iter().any(IdlEnumVariant::has_data)
    }

    /// Returns the ordered variant names.
    #[must_use]
    pub fn variant_names(&self) -> Vec<String> {
        self.variants.iter().map(|v| v.name.clone()).collect()
    }
}

/// Body of a named type or account declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IdlDefinedType {
    /// Struct body.
    Struct(StructDef),
    /// Enum body.
    Enum(EnumDef),
}

impl IdlDefinedType {
    /// Returns the kind name of the body.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Struct(_) => "struct",
            Self::Enum(_) => "enum",
        }
    }

    /// Returns the struct fields, or an empty slice for enums.
    #[must_use]
    pub fn fields(&self) -> &[IdlField] {
        match self {
            Self::Struct(s) => &s.fields,
            Self::Enum(_) => &[],
        }
    }
}

/// A top-level named type (or account) declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdlTypeDefinition {
    /// Declaration name.
    pub name: String,
    /// Declaration body.
    #[serde(rename = "type")]
    pub ty: IdlDefinedType,
}

impl IdlTypeDefinition {
    /// Creates a struct declaration.
    #[must_use]
    pub fn new_struct(name: impl Into<String>, fields: Vec<IdlField>) -> Self {
        Self {
            name: name.into(),
            ty: IdlDefinedType::Struct(StructDef::new(fields)),
        }
    }

    /// Creates an enum declaration.
    #[must_use]
    pub fn new_enum(name: impl Into<String>, variants: Vec<IdlEnumVariant>) -> Self {
        Self {
            name: name.into(),
            ty: IdlDefinedType::Enum(EnumDef::new(variants)),
        }
    }
}

/// Aliases letting a defined-type name stand in for a primitive key.
pub type TypeAliases = BTreeMap<String, PrimitiveKey>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_key_byte_width() {
        assert_eq!(PrimitiveKey::U8.byte_width(), Some(1));
        assert_eq!(PrimitiveKey::I64.byte_width(), Some(8));
        assert_eq!(PrimitiveKey::U512.byte_width(), Some(64));
        assert_eq!(PrimitiveKey::PublicKey.byte_width(), Some(32));
        assert_eq!(PrimitiveKey::String.byte_width(), None);
        assert_eq!(PrimitiveKey::Bytes.byte_width(), None);
    }

    #[test]
    fn test_primitive_key_names() {
        assert_eq!(PrimitiveKey::U128.idl_name(), "u128");
        assert_eq!(PrimitiveKey::PublicKey.idl_name(), "publicKey");
        assert_eq!(
            PrimitiveKey::from_idl_name("i256"),
            Some(PrimitiveKey::I256)
        );
        assert_eq!(
            PrimitiveKey::from_idl_name("pubkey"),
            Some(PrimitiveKey::PublicKey)
        );
        assert_eq!(PrimitiveKey::from_idl_name("unknown"), None);
    }

    #[test]
    fn test_primitive_key_signedness() {
        assert!(PrimitiveKey::I8.is_signed());
        assert!(!PrimitiveKey::I8.is_unsigned());
        assert!(PrimitiveKey::U256.is_unsigned());
        assert!(!PrimitiveKey::Bool.is_signed());
        assert!(!PrimitiveKey::Bool.is_unsigned());
    }

    #[test]
    fn test_idl_type_deserialize_primitive() {
        let ty: IdlType = serde_json::from_str("\"u64\"").expect("parse failed");
        assert_eq!(ty, IdlType::Primitive(PrimitiveKey::U64));
    }

    #[test]
    fn test_idl_type_deserialize_wrappers() {
        let ty: IdlType = serde_json::from_str(r#"{"vec": "u8"}"#).expect("parse failed");
        assert_eq!(ty, IdlType::vec(IdlType::Primitive(PrimitiveKey::U8)));

        let ty: IdlType = serde_json::from_str(r#"{"option": "string"}"#).expect("parse failed");
        assert_eq!(ty, IdlType::option(IdlType::Primitive(PrimitiveKey::String)));

        let ty: IdlType = serde_json::from_str(r#"{"array": ["u8", 32]}"#).expect("parse failed");
        assert_eq!(ty, IdlType::array(IdlType::Primitive(PrimitiveKey::U8), 32));

        let ty: IdlType =
            serde_json::from_str(r#"{"defined": "Creator"}"#).expect("parse failed");
        assert_eq!(ty, IdlType::defined("Creator"));
    }

    #[test]
    fn test_idl_type_deserialize_nested() {
        let ty: IdlType =
            serde_json::from_str(r#"{"vec": {"defined": "Creator"}}"#).expect("parse failed");
        assert_eq!(ty, IdlType::vec(IdlType::defined("Creator")));
    }

    #[test]
    fn test_idl_type_deserialize_inline_enum() {
        let json = r#"{"kind": "enum", "variants": [{"name": "Up"}, {"name": "Down"}]}"#;
        let ty: IdlType = serde_json::from_str(json).expect("parse failed");
        match ty {
            IdlType::Enum(e) => {
                assert!(e.is_scalar());
                assert_eq!(e.variant_names(), vec!["Up", "Down"]);
            }
            other => panic!("expected enum, got {other:?}"),
        }
    }

    #[test]
    fn test_enum_scalar_classification() {
        let scalar = EnumDef::new(vec![
            IdlEnumVariant::scalar("A"),
            IdlEnumVariant::scalar("B"),
        ]);
        assert!(scalar.is_scalar());

        let data = EnumDef::new(vec![
            IdlEnumVariant::scalar("None"),
            IdlEnumVariant::with_fields(
                "Some",
                vec![IdlField::new("value", IdlType::Primitive(PrimitiveKey::U64))],
            ),
        ]);
        assert!(!data.is_scalar());
    }

    #[test]
    fn test_defined_type_deserialize() {
        let json = r#"{
            "name": "Creator",
            "type": {
                "kind": "struct",
                "fields": [{"name": "share", "type": "u8"}]
            }
        }"#;
        let def: IdlTypeDefinition = serde_json::from_str(json).expect("parse failed");
        assert_eq!(def.name, "Creator");
        assert_eq!(def.ty.kind(), "struct");
        assert_eq!(def.ty.fields().len(), 1);
    }

    #[test]
    fn test_defined_type_empty_struct() {
        let json = r#"{"name": "Placeholder", "type": {"kind": "struct"}}"#;
        let def: IdlTypeDefinition = serde_json::from_str(json).expect("parse failed");
        match &def.ty {
            IdlDefinedType::Struct(s) => assert!(s.is_empty()),
            other => panic!("expected struct, got {other:?}"),
        }
    }
}
