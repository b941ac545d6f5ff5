//! Generates a GraphQL schema from an inline IDL document.
//!
//! Run with:
//! ```sh
//! cargo run --example generate_schema
//! ```

use ironidl::prelude::*;

const FANOUT_IDL: &str = r#"{
    "version": "0.0.1",
    "name": "fanout",
    "instructions": [
        {
            "name": "init",
            "accounts": [
                {"name": "authority", "isMut": true, "isSigner": true},
                {"name": "fanout", "isMut": true, "isSigner": false},
                {"name": "systemProgram", "isMut": false, "isSigner": false}
            ],
            "args": [
                {"name": "name", "type": "string"},
                {"name": "totalShares", "type": "u64"},
                {"name": "model", "type": {"defined": "MembershipModel"}}
            ]
        },
        {
            "name": "distribute",
            "accounts": [
                {"name": "member", "isMut": true, "isSigner": false},
                {"name": "fanout", "isMut": true, "isSigner": false}
            ],
            "args": []
        }
    ],
    "accounts": [
        {
            "name": "Fanout",
            "type": {
                "kind": "struct",
                "fields": [
                    {"name": "authority", "type": "publicKey"},
                    {"name": "name", "type": "string"},
                    {"name": "totalShares", "type": "u64"},
                    {"name": "creators", "type": {"vec": {"defined": "Creator"}}}
                ]
            }
        }
    ],
    "types": [
        {
            "name": "Creator",
            "type": {
                "kind": "struct",
                "fields": [
                    {"name": "address", "type": "publicKey"},
                    {"name": "share", "type": "u8"}
                ]
            }
        },
        {
            "name": "MembershipModel",
            "type": {
                "kind": "enum",
                "variants": [{"name": "Wallet"}, {"name": "Token"}, {"name": "NFT"}]
            }
        }
    ],
    "errors": [
        {"code": 6000, "name": "BadArtithmetic", "msg": "Encountered an arithmetic error"}
    ],
    "metadata": {"address": "hyDQ4Nz1eYyegS6JfenyKwKzYxRsMsFCZmrg6FzNeeo"}
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let output = ironidl::codegen::generate_from_json(
        FANOUT_IDL,
        GeneratorOptions {
            target: OutputTarget::Graphql,
            ..GeneratorOptions::default()
        },
    )?;

    let dir = std::path::Path::new("generated-schema");
    write_output(&output, dir)?;
    println!("schema written to {}", dir.join("schema.graphql").display());
    Ok(())
}
