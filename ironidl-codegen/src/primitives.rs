//! Primary type table.
//!
//! Maps every primitive key to its target-language representations and
//! its serialization descriptor. Pure data: the key enumeration is
//! closed, so the lookup is total by construction and a miss cannot
//! occur at runtime.

use ironidl_idl::PrimitiveKey;

/// Serialization descriptor for a primitive key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerdeDescriptor {
    /// Fully qualified codec expression in generated SDK code.
    pub codec: &'static str,
    /// Static byte width, or `None` for variable-size codecs.
    pub byte_width: Option<usize>,
}

impl SerdeDescriptor {
    /// Returns true if this codec has no statically known size.
    #[must_use]
    pub const fn is_fixable(&self) -> bool {
        self.byte_width.is_none()
    }
}

/// Primary type table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryType {
    /// TypeScript SDK representation.
    pub sdk: &'static str,
    /// GraphQL schema representation.
    pub graphql: &'static str,
    /// Serialization descriptor.
    pub serde: SerdeDescriptor,
}

/// Looks up the primary type entry for a primitive key.
#[must_use]
pub const fn primary_type(key: PrimitiveKey) -> PrimaryType {
    match key {
        PrimitiveKey::U8 => entry("number", "Int", "beet.u8", Some(1)),
        PrimitiveKey::U16 => entry("number", "Int", "beet.u16", Some(2)),
        PrimitiveKey::U32 => entry("number", "Int", "beet.u32", Some(4)),
        PrimitiveKey::U64 => entry("beet.bignum", "GraphQLLong", "beet.u64", Some(8)),
        PrimitiveKey::U128 => entry("beet.bignum", "GraphQLLong", "beet.u128", Some(16)),
        PrimitiveKey::U256 => entry("beet.bignum", "GraphQLLong", "beet.u256", Some(32)),
        PrimitiveKey::U512 => entry("beet.bignum", "GraphQLLong", "beet.u512", Some(64)),
        PrimitiveKey::I8 => entry("number", "Int", "beet.i8", Some(1)),
        PrimitiveKey::I16 => entry("number", "Int", "beet.i16", Some(2)),
        PrimitiveKey::I32 => entry("number", "Int", "beet.i32", Some(4)),
        PrimitiveKey::I64 => entry("beet.bignum", "GraphQLLong", "beet.i64", Some(8)),
        PrimitiveKey::I128 => entry("beet.bignum", "GraphQLLong", "beet.i128", Some(16)),
        PrimitiveKey::I256 => entry("beet.bignum", "GraphQLLong", "beet.i256", Some(32)),
        PrimitiveKey::I512 => entry("beet.bignum", "GraphQLLong", "beet.i512", Some(64)),
        PrimitiveKey::Bool => entry("boolean", "Boolean", "beet.bool", Some(1)),
        PrimitiveKey::String => entry("string", "String", "beet.utf8String", None),
        PrimitiveKey::Bytes => entry("Uint8Array", "[Int!]", "beet.bytes", None),
        PrimitiveKey::PublicKey => {
            entry("web3.PublicKey", "PublicKey", "beetSolana.publicKey", Some(32))
        }
    }
}

const fn entry(
    sdk: &'static str,
    graphql: &'static str,
    codec: &'static str,
    byte_width: Option<usize>,
) -> PrimaryType {
    PrimaryType {
        sdk,
        graphql,
        serde: SerdeDescriptor { codec, byte_width },
    }
}
