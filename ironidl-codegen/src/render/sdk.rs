//! TypeScript SDK renderers.
//!
//! Emit one module per type, account and instruction, plus the errors
//! module and the package index. Type syntax comes from the mapper
//! configured with [`SdkTarget`](crate::target::SdkTarget); codec
//! expressions come from the mapper's serde mapping.

use crate::case::{serde_var_name, to_camel_case, to_pascal_case};
use crate::discriminator::{
    account_discriminator, discriminator_literal, instruction_discriminator,
};
use crate::error::CodegenError;
use crate::known_pubkeys::resolve_known_pubkey;
use crate::mapper::{MappedField, TypeMapper};
use crate::render::Rendered;
use ironidl_idl::{
    EnumDef, IdlDefinedType, IdlErrorDef, IdlInstruction, IdlTypeDefinition, StructDef,
};
use std::collections::BTreeSet;

/// Package the fixed/fixable codec primitives come from.
pub const BEET_PACKAGE: &str = "@metaplex-foundation/beet";
/// Package the solana-specific codecs come from.
pub const BEET_SOLANA_PACKAGE: &str = "@metaplex-foundation/beet-solana";
/// Package the web3 primitives come from.
pub const SOLANA_WEB3_PACKAGE: &str = "@solana/web3.js";
/// Package the spl-token constants come from.
pub const SOLANA_SPL_TOKEN_PACKAGE: &str = "@solana/spl-token";

/// Renders one user-defined type declaration as a module.
///
/// # Errors
/// Returns `CodegenError` if mapping any field fails.
pub fn render_type(
    def: &IdlTypeDefinition,
    mapper: &mut TypeMapper<'_>,
) -> Result<Rendered, CodegenError> {
    mapper.clear_usages();
    let body = match &def.ty {
        IdlDefinedType::Enum(e) if e.is_scalar() => {
            render_scalar_enum(&def.name, &e.variant_names())
        }
        IdlDefinedType::Enum(e) => render_data_enum(&def.name, e, mapper)?,
        IdlDefinedType::Struct(s) => render_struct(&def.name, s, mapper)?,
    };
    let body = append_inline_enums(mapper, body);
    let code = with_imports(mapper, &["beet"], body);
    Ok(Rendered {
        code,
        is_fixable: mapper.used_fixable_serde(),
    })
}

/// Renders an account declaration as a module.
///
/// Non-shank accounts carry an implicit 8-byte discriminator as the
/// leading serialized field.
///
/// # Errors
/// Returns `CodegenError` if the account is not a struct or mapping a
/// field fails.
pub fn render_account(
    def: &IdlTypeDefinition,
    mapper: &mut TypeMapper<'_>,
    implicit_discriminator: bool,
) -> Result<Rendered, CodegenError> {
    mapper.clear_usages();
    let IdlDefinedType::Struct(s) = &def.ty else {
        return Err(CodegenError::Unsupported {
            shape: "enum account".to_string(),
            field: def.name.clone(),
        });
    };
    let camel = to_camel_case(&def.name);
    let fields = mapper.map_fields(&s.fields)?;
    let serde_fields = mapper.map_serde_fields(&s.fields)?;

    let mut body = format!("export type {}Args = {{\n", def.name);
    for field in &fields {
        body.push_str(&format!("  {}: {}\n", field.name, field.ty));
    }
    body.push_str("}\n\n");

    if implicit_discriminator {
        body.push_str(&format!(
            "export const {camel}Discriminator = {}\n\n",
            discriminator_literal(&account_discriminator(&def.name))
        ));
        body.push_str(&format!(
            "export type {name} = {name}Args & {{\n  accountDiscriminator: number[]\n}}\n\n",
            name = def.name
        ));
    } else {
        body.push_str(&format!(
            "export type {name} = {name}Args\n\n",
            name = def.name
        ));
    }

    // Codec class is decided from the mapper state after mapping, not
    // before.
    let struct_class = if mapper.used_fixable_serde() {
        "FixableBeetStruct"
    } else {
        "BeetStruct"
    };
    body.push_str(&format!(
        "export const {camel}Beet = new beet.{struct_class}<{name}, {name}Args>(\n  [\n",
        name = def.name
    ));
    if implicit_discriminator {
        body.push_str("    ['accountDiscriminator', beet.uniformFixedSizeArray(beet.u8, 8)],\n");
    }
    for field in &serde_fields {
        body.push_str(&format!("    ['{}', {}],\n", field.name, field.ty));
    }
    body.push_str(&format!("  ],\n  '{}'\n)\n", def.name));

    let body = append_inline_enums(mapper, body);
    let code = with_imports(mapper, &["beet"], body);
    Ok(Rendered {
        code,
        is_fixable: mapper.used_fixable_serde(),
    })
}

/// Renders an instruction declaration as a module.
///
/// Shank instructions use their declared discriminant; everything else
/// gets the derived 8-byte instruction discriminator.
///
/// # Errors
/// Returns `CodegenError` if mapping any argument fails.
pub fn render_instruction(
    ix: &IdlInstruction,
    mapper: &mut TypeMapper<'_>,
) -> Result<Rendered, CodegenError> {
    mapper.clear_usages();
    let pascal = to_pascal_case(&ix.name);
    let camel = to_camel_case(&ix.name);
    let args = mapper.map_fields(&ix.args)?;
    let serde_args = mapper.map_serde_fields(&ix.args)?;

    let (disc_ts, disc_serde, disc_literal) = match &ix.discriminant {
        Some(d) => (
            "number",
            mapper.map_serde(&d.ty, "instructionDiscriminator")?,
            d.value.to_string(),
        ),
        None => (
            "number[]",
            "beet.uniformFixedSizeArray(beet.u8, 8)".to_string(),
            discriminator_literal(&instruction_discriminator(&ix.name)),
        ),
    };

    let mut body = String::new();

    if !args.is_empty() {
        body.push_str(&format!("export type {pascal}InstructionArgs = {{\n"));
        for arg in &args {
            body.push_str(&format!("  {}: {}\n", arg.name, arg.ty));
        }
        body.push_str("}\n\n");
    }

    // Args codec always leads with the discriminator field.
    let struct_class = if mapper.used_fixable_serde() {
        "FixableBeetArgsStruct"
    } else {
        "BeetArgsStruct"
    };
    let generic = if args.is_empty() {
        format!("{{ instructionDiscriminator: {disc_ts} }}")
    } else {
        format!("{pascal}InstructionArgs & {{ instructionDiscriminator: {disc_ts} }}")
    };
    body.push_str(&format!(
        "export const {camel}Struct = new beet.{struct_class}<{generic}>(\n  [\n"
    ));
    body.push_str(&format!("    ['instructionDiscriminator', {disc_serde}],\n"));
    for arg in &serde_args {
        body.push_str(&format!("    ['{}', {}],\n", arg.name, arg.ty));
    }
    body.push_str(&format!("  ],\n  '{pascal}InstructionArgs'\n)\n\n"));

    let accounts: Vec<_> = ix
        .accounts
        .iter()
        .filter(|a| resolve_known_pubkey(&a.name).is_none())
        .collect();
    let mut extra_packages: Vec<&'static str> = vec!["beet"];
    if !accounts.is_empty() {
        extra_packages.push("web3");
        body.push_str(&format!("export type {pascal}InstructionAccounts = {{\n"));
        for account in &accounts {
            let optional = if account.optional { "?" } else { "" };
            body.push_str(&format!(
                "  {}{optional}: web3.PublicKey\n",
                account.name
            ));
        }
        body.push_str("}\n\n");
    }

    body.push_str(&format!(
        "export const {camel}InstructionDiscriminator = {disc_literal}\n\n"
    ));

    body.push_str(&format!("export type {pascal}Instruction = {{\n"));
    body.push_str("  programId: web3.PublicKey\n");
    if !accounts.is_empty() {
        body.push_str(&format!("  accounts: {pascal}InstructionAccounts\n"));
    }
    if !args.is_empty() {
        body.push_str(&format!("  args: {pascal}InstructionArgs\n"));
    }
    body.push_str("}\n");
    extra_packages.push("web3");

    let body = append_inline_enums(mapper, body);
    let code = with_imports(mapper, &extra_packages, body);
    Ok(Rendered {
        code,
        is_fixable: mapper.used_fixable_serde(),
    })
}

/// Renders the errors module, or `None` when no errors are declared.
#[must_use]
pub fn render_errors(errors: &[IdlErrorDef]) -> Option<String> {
    if errors.is_empty() {
        return None;
    }

    let mut out = String::from(
        "type ErrorWithCode = Error & { code: number }\n\
         type MaybeErrorWithCode = ErrorWithCode | null | undefined\n\n\
         const createErrorFromCodeLookup: Map<number, () => ErrorWithCode> = new Map()\n\
         const createErrorFromNameLookup: Map<string, () => ErrorWithCode> = new Map()\n\n",
    );

    for error in errors {
        let class = format!("{}Error", error.name);
        let message = error.msg.as_deref().unwrap_or(&error.name);
        out.push_str(&format!(
            "export class {class} extends Error {{\n\
             \x20 readonly code: number = {code:#x}\n\
             \x20 readonly name: string = '{name}'\n\
             \x20 constructor() {{\n\
             \x20   super('{message}')\n\
             \x20   if (typeof Error.captureStackTrace === 'function') {{\n\
             \x20     Error.captureStackTrace(this, {class})\n\
             \x20   }}\n\
             \x20 }}\n\
             }}\n\n\
             createErrorFromCodeLookup.set({code:#x}, () => new {class}())\n\
             createErrorFromNameLookup.set('{name}', () => new {class}())\n\n",
            code = error.code,
            name = error.name,
        ));
    }

    out.push_str(
        "export function errorFromCode(code: number): MaybeErrorWithCode {\n\
         \x20 const createError = createErrorFromCodeLookup.get(code)\n\
         \x20 return createError != null ? createError() : null\n\
         }\n\n\
         export function errorFromName(name: string): MaybeErrorWithCode {\n\
         \x20 const createError = createErrorFromNameLookup.get(name)\n\
         \x20 return createError != null ? createError() : null\n\
         }\n",
    );

    Some(out)
}

/// Renders the package index: re-exports plus the union types joining
/// all generated entities.
#[must_use]
pub fn render_index(
    instruction_names: &[String],
    account_names: &[String],
    type_names: &[String],
    has_errors: bool,
) -> String {
    let mut out = String::new();

    let mut reexports = vec!["instructions"];
    if !account_names.is_empty() {
        reexports.push("accounts");
    }
    if !type_names.is_empty() {
        reexports.push("types");
    }
    if has_errors {
        reexports.push("errors");
    }
    reexports.sort_unstable();
    for module in &reexports {
        out.push_str(&format!("export * from './{module}/index.js';\n"));
    }
    out.push('\n');

    if !instruction_names.is_empty() {
        let imports: Vec<String> = instruction_names
            .iter()
            .map(|n| format!("{}Instruction", to_pascal_case(n)))
            .collect();
        out.push_str(&format!(
            "import {{\n  {}\n}} from './instructions/index.js';\n",
            imports.join(",\n  ")
        ));
    }
    if !account_names.is_empty() {
        let imports: Vec<String> = account_names
            .iter()
            .flat_map(|n| [n.clone(), format!("{n}Args")])
            .collect();
        out.push_str(&format!(
            "import {{\n  {}\n}} from './accounts/index.js';\n",
            imports.join(",\n  ")
        ));
    }
    if !type_names.is_empty() {
        out.push_str(&format!(
            "import {{\n  {}\n}} from './types/index.js';\n",
            type_names.join(",\n  ")
        ));
    }
    out.push('\n');

    push_union(
        &mut out,
        "ParsedInstructions",
        &instruction_names
            .iter()
            .map(|n| format!("{}Instruction", to_pascal_case(n)))
            .collect::<Vec<_>>(),
    );
    push_union(&mut out, "ParsedAccounts", account_names);
    push_union(
        &mut out,
        "ParsedAccountsData",
        &account_names
            .iter()
            .map(|n| format!("{n}Args"))
            .collect::<Vec<_>>(),
    );
    push_union(&mut out, "ParsedTypes", type_names);

    out
}

fn push_union<S: AsRef<str>>(out: &mut String, label: &str, members: &[S]) {
    if members.is_empty() {
        return;
    }
    let joined: Vec<&str> = members.iter().map(AsRef::as_ref).collect();
    out.push_str(&format!(
        "export type {label} =\n  {}\n",
        joined.join(" |\n  ")
    ));
}

// -----------------
// Bodies
// -----------------

fn render_struct(
    name: &str,
    s: &StructDef,
    mapper: &mut TypeMapper<'_>,
) -> Result<String, CodegenError> {
    let camel = to_camel_case(name);
    if s.is_empty() {
        // Placeholder for declared-but-empty types.
        return Ok(format!(
            "export type {name} = {{}}\n\n\
             export const {camel}Beet = new beet.BeetArgsStruct<{name}>([], '{name}')\n"
        ));
    }

    let fields = mapper.map_fields(&s.fields)?;
    let serde_fields = mapper.map_serde_fields(&s.fields)?;

    let mut out = format!("export type {name} = {{\n");
    for field in &fields {
        out.push_str(&format!("  {}: {}\n", field.name, field.ty));
    }
    out.push_str("}\n\n");

    let struct_class = if mapper.used_fixable_serde() {
        "FixableBeetArgsStruct"
    } else {
        "BeetArgsStruct"
    };
    out.push_str(&format!(
        "export const {camel}Beet = new beet.{struct_class}<{name}>(\n  [\n"
    ));
    for field in &serde_fields {
        out.push_str(&format!("    ['{}', {}],\n", field.name, field.ty));
    }
    out.push_str(&format!("  ],\n  '{name}'\n)\n"));
    Ok(out)
}

fn render_scalar_enum(name: &str, variants: &[String]) -> String {
    let camel = to_camel_case(name);
    let mut out = format!("export enum {name} {{\n");
    for variant in variants {
        out.push_str(&format!("  {variant},\n"));
    }
    out.push_str("}\n\n");
    out.push_str(&format!(
        "export const {camel}Beet = beet.fixedScalarEnum({name}) as beet.FixedSizeBeet<{name}, {name}>\n"
    ));
    out
}

fn render_data_enum(
    name: &str,
    e: &EnumDef,
    mapper: &mut TypeMapper<'_>,
) -> Result<String, CodegenError> {
    // Validates the name and records the fixable usage up front.
    mapper.map_enum(e, name)?;
    let camel = to_camel_case(name);

    let mut record_lines = Vec::new();
    let mut beet_lines = Vec::new();
    for variant in &e.variants {
        match &variant.fields {
            Some(fields) if !fields.is_empty() => {
                // Per-variant codec class depends on that variant's own
                // fields, so each variant maps through a fork.
                let mut forked = mapper.fork();
                let mapped = forked.map_fields(fields)?;
                let serde_fields = forked.map_serde_fields(fields)?;
                let variant_class = if forked.used_fixable_serde() {
                    "FixableBeetArgsStruct"
                } else {
                    "BeetArgsStruct"
                };
                mapper.merge_usages(&forked);

                let decls: Vec<String> = mapped
                    .iter()
                    .map(|f| format!("{}: {}", f.name, f.ty))
                    .collect();
                record_lines.push(format!("  {}: {{ {} }}", variant.name, decls.join(", ")));

                let serde_decls: Vec<String> = serde_fields
                    .iter()
                    .map(|f: &MappedField| format!("['{}', {}]", f.name, f.ty))
                    .collect();
                beet_lines.push(format!(
                    "  ['{variant}', new beet.{variant_class}<{name}Record[\"{variant}\"]>(\n    [{decls}],\n    '{name}Record[\"{variant}\"]'\n  )]",
                    variant = variant.name,
                    decls = serde_decls.join(", "),
                ));
            }
            _ => {
                record_lines.push(format!("  {}: void", variant.name));
                beet_lines.push(format!("  ['{}', beet.unit]", variant.name));
            }
        }
    }

    let mut out = format!("export type {name}Record = {{\n");
    out.push_str(&record_lines.join(",\n"));
    out.push_str("\n}\n\n");

    out.push_str(&format!(
        "export type {name} = beet.DataEnumKeyAsKind<{name}Record>\n\n"
    ));

    for variant in &e.variants {
        out.push_str(&format!(
            "export const is{name}{variant} = (\n  x: {name}\n): x is {name} & {{ __kind: '{variant}' }} => x.__kind === '{variant}'\n",
            variant = variant.name,
        ));
    }
    out.push('\n');

    out.push_str(&format!("export const {camel}Beet = beet.dataEnum<{name}Record>([\n"));
    out.push_str(&beet_lines.join(",\n"));
    out.push_str(&format!("\n]) as beet.FixableBeet<{name}>\n"));
    Ok(out)
}

/// Appends definitions for scalar enums mapped inline during the render.
///
/// Declared enum types render their own module and are referenced by
/// name, so only inline usages land here.
fn append_inline_enums(mapper: &TypeMapper<'_>, mut body: String) -> String {
    for (name, variants) in mapper.scalar_enums_used() {
        body.push('\n');
        body.push_str(&render_scalar_enum(name, variants));
    }
    body
}

// -----------------
// Imports
// -----------------

/// Prepends the import header derived from the mapper's recorded usages.
fn with_imports(mapper: &TypeMapper<'_>, extra_packages: &[&'static str], body: String) -> String {
    let mut packages: BTreeSet<&str> = mapper.packages_used().iter().copied().collect();
    packages.extend(extra_packages);

    let mut out = String::new();
    for package in &packages {
        let line = match *package {
            "beet" => format!("import * as beet from '{BEET_PACKAGE}'\n"),
            "beetSolana" => format!("import * as beetSolana from '{BEET_SOLANA_PACKAGE}'\n"),
            "web3" => format!("import * as web3 from '{SOLANA_WEB3_PACKAGE}'\n"),
            "splToken" => format!("import * as splToken from '{SOLANA_SPL_TOKEN_PACKAGE}'\n"),
            other => format!("// unknown package: {other}\n"),
        };
        out.push_str(&line);
    }

    for (module, names) in mapper.imports_by_module() {
        let mut imported: Vec<String> = Vec::new();
        for name in names {
            imported.push(name.clone());
            imported.push(serde_var_name(name));
        }
        out.push_str(&format!(
            "import {{ {} }} from '../{module}'\n",
            imported.join(", ")
        ));
    }

    if out.is_empty() {
        body
    } else {
        out.push('\n');
        out.push_str(&body);
        out
    }
}
