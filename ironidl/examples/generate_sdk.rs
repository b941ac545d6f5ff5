//! Generates TypeScript SDK modules from an IDL file.
//!
//! Run with:
//! ```sh
//! cargo run --example generate_sdk -- path/to/idl.json [output-dir]
//! ```

use ironidl::prelude::*;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let idl_path = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: generate_sdk <idl.json> [output-dir]"))?;
    let out_dir = args.next().unwrap_or_else(|| "generated-sdk".to_string());

    let output = ironidl::codegen::generate_from_file(
        Path::new(&idl_path),
        GeneratorOptions {
            target: OutputTarget::Sdk,
            ..GeneratorOptions::default()
        },
    )?;

    write_output(&output, Path::new(&out_dir))?;
    println!(
        "{} instructions, {} accounts, {} types written to {out_dir}",
        output.instructions.len(),
        output.accounts.len(),
        output.types.len(),
    );
    Ok(())
}
