//! Output writer.
//!
//! Thin file-writing driver over [`GeneratedOutput`]: the GraphQL target
//! lands in a single `schema.graphql`, the SDK target in one module per
//! entity plus per-directory and root index files. All rendering
//! decisions happen upstream; this module only lays out files.

use ironidl_codegen::{CodegenError, GeneratedOutput, OutputTarget};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Writes generated output under the given directory.
///
/// # Arguments
/// * `output` - Generated text blocks
/// * `dir` - Target directory, created if absent
///
/// # Errors
/// Returns `CodegenError::Io` if any directory or file operation fails.
pub fn write_output(output: &GeneratedOutput, dir: &Path) -> Result<(), CodegenError> {
    fs::create_dir_all(dir)?;
    match output.target {
        OutputTarget::Graphql => write_schema(output, dir),
        OutputTarget::Sdk => write_sdk(output, dir),
    }
}

/// Writes the schema-wide document plus all entity blocks into one file.
fn write_schema(output: &GeneratedOutput, dir: &Path) -> Result<(), CodegenError> {
    let mut code = output.index.clone();
    for block in output
        .types
        .values()
        .chain(output.accounts.values())
        .chain(output.instructions.values())
    {
        code.push('\n');
        code.push_str(block);
    }

    let path = dir.join("schema.graphql");
    info!(path = %path.display(), "writing schema");
    fs::write(path, code)?;
    Ok(())
}

/// Writes one module per entity plus index files.
fn write_sdk(output: &GeneratedOutput, dir: &Path) -> Result<(), CodegenError> {
    write_modules(dir, "instructions", &output.instructions)?;
    if !output.accounts.is_empty() {
        write_modules(dir, "accounts", &output.accounts)?;
    }
    if !output.types.is_empty() {
        write_modules(dir, "types", &output.types)?;
    }
    if let Some(errors) = &output.errors {
        let errors_dir = dir.join("errors");
        fs::create_dir_all(&errors_dir)?;
        info!(path = %errors_dir.display(), "writing errors");
        fs::write(errors_dir.join("index.ts"), errors)?;
    }

    debug!("writing index.ts joining all generated modules");
    fs::write(dir.join("index.ts"), &output.index)?;
    Ok(())
}

fn write_modules(
    dir: &Path,
    label: &str,
    modules: &BTreeMap<String, String>,
) -> Result<(), CodegenError> {
    let module_dir = dir.join(label);
    fs::create_dir_all(&module_dir)?;
    info!(path = %module_dir.display(), count = modules.len(), "writing {label}");

    for (name, code) in modules {
        debug!(%name, "writing {label} module");
        fs::write(module_dir.join(format!("{name}.ts")), code)?;
    }

    let mut index = String::new();
    for name in modules.keys() {
        index.push_str(&format!("export * from './{name}.js';\n"));
    }
    fs::write(module_dir.join("index.ts"), index)?;
    Ok(())
}
