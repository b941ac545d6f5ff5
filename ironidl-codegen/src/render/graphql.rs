//! GraphQL schema renderers.
//!
//! Emit SDL blocks for types, accounts and instructions, plus the
//! schema-wide document joining them. Field type syntax comes from the
//! mapper configured with [`GraphqlTarget`](crate::target::GraphqlTarget).

use crate::case::{to_camel_case, to_pascal_case};
use crate::error::CodegenError;
use crate::known_pubkeys::resolve_known_pubkey;
use crate::mapper::TypeMapper;
use crate::render::Rendered;
use ironidl_idl::{EnumDef, IdlDefinedType, IdlInstruction, IdlTypeDefinition};
use std::collections::BTreeMap;

/// Static declarations every generated schema references.
const PREAMBLE: &str = "scalar GraphQLLong
scalar Datetime
scalar PublicKey

type AccessStats {
\taccesses: Int
\tlastAccessTime: Datetime
}

interface Account {
\tname: String
\ttype: AccountType
\taddress: String
\tstats: AccessStats
}

interface Instruction {
\tid: String
\ttype: InstructionType
\ttimestamp: Datetime
\tprogramId: String
\taccount: String
}
";

/// Renders one user-defined type declaration.
///
/// # Errors
/// Returns `CodegenError` if mapping any field fails.
pub fn render_type(
    def: &IdlTypeDefinition,
    mapper: &mut TypeMapper<'_>,
) -> Result<Rendered, CodegenError> {
    mapper.clear_usages();
    let code = match &def.ty {
        IdlDefinedType::Enum(e) if e.is_scalar() => {
            render_scalar_enum(&def.name, &e.variant_names())
        }
        IdlDefinedType::Enum(e) => render_data_enum(&def.name, e, mapper)?,
        IdlDefinedType::Struct(s) if s.is_empty() => {
            // Declared but empty; nothing to serialize, nothing to map.
            format!("type {} {{}}\n", def.name)
        }
        IdlDefinedType::Struct(s) => {
            let fields = mapper.map_fields(&s.fields)?;
            let mut out = format!("type {} {{\n", def.name);
            for field in fields {
                out.push_str(&format!("\t{}: {}\n", field.name, field.ty));
            }
            out.push_str("}\n");
            out
        }
    };
    Ok(Rendered {
        code,
        is_fixable: mapper.used_fixable_serde(),
    })
}

/// Renders an account declaration as an `Account` implementor plus its
/// data block.
///
/// # Errors
/// Returns `CodegenError` if the account is not a struct or mapping a
/// field fails.
pub fn render_account(
    def: &IdlTypeDefinition,
    mapper: &mut TypeMapper<'_>,
) -> Result<Rendered, CodegenError> {
    mapper.clear_usages();
    let IdlDefinedType::Struct(s) = &def.ty else {
        return Err(CodegenError::Unsupported {
            shape: "enum account".to_string(),
            field: def.name.clone(),
        });
    };
    let fields = mapper.map_fields(&s.fields)?;

    let mut out = format!(
        "type {name} implements Account {{\n\
         \tname: String\n\
         \ttype: AccountType\n\
         \taddress: String\n\
         \tstats: AccessStats\n\
         \tdata: {name}Data\n\
         }}\n\n",
        name = def.name
    );
    out.push_str(&format!("type {}Data {{\n", def.name));
    for field in fields {
        // Data fields drop the non-null decoration.
        out.push_str(&format!("\t{}: {}\n", field.name, field.ty.replace('!', "")));
    }
    out.push_str("}\n");

    Ok(Rendered {
        code: out,
        is_fixable: mapper.used_fixable_serde(),
    })
}

/// Renders an instruction as an `Instruction` implementor plus its
/// accounts and args blocks.
///
/// # Errors
/// Returns `CodegenError` if mapping any argument fails.
pub fn render_instruction(
    ix: &IdlInstruction,
    mapper: &mut TypeMapper<'_>,
) -> Result<Rendered, CodegenError> {
    mapper.clear_usages();
    let pascal = to_pascal_case(&ix.name);
    let args = mapper.map_fields(&ix.args)?;

    // Accounts with a well-known address are defaulted by the consumer
    // and left out of the declared account set.
    let accounts: Vec<_> = ix
        .accounts
        .iter()
        .filter(|a| resolve_known_pubkey(&a.name).is_none())
        .collect();

    let mut out = String::new();

    if !accounts.is_empty() {
        out.push_str(&format!("type {pascal}InstructionAccounts {{\n"));
        for account in &accounts {
            let decoration = if account.optional { "" } else { "!" };
            out.push_str(&format!("\t{}: PublicKey{decoration}\n", account.name));
        }
        out.push_str("}\n\n");
    }

    if !args.is_empty() {
        out.push_str(&format!("type {pascal}InstructionArgs {{\n"));
        for arg in &args {
            out.push_str(&format!("\t{}: {}\n", arg.name, arg.ty.replace('!', "")));
        }
        out.push_str("}\n\n");
    }

    out.push_str(&format!("type {pascal}Instruction implements Instruction {{\n"));
    out.push_str("\tid: String\n");
    out.push_str("\ttype: InstructionType\n");
    out.push_str("\ttimestamp: Datetime\n");
    out.push_str("\tprogramId: String\n");
    out.push_str("\taccount: String\n");
    if !accounts.is_empty() {
        out.push_str(&format!("\taccounts: {pascal}InstructionAccounts\n"));
    }
    if !args.is_empty() {
        out.push_str(&format!("\targs: {pascal}InstructionArgs\n"));
    }
    out.push_str("}\n");

    Ok(Rendered {
        code: out,
        is_fixable: mapper.used_fixable_serde(),
    })
}

/// Renders a scalar enum block.
#[must_use]
pub fn render_scalar_enum(name: &str, variants: &[String]) -> String {
    let mut out = format!("enum {name} {{\n");
    for variant in variants {
        out.push_str(&format!("\t{variant}\n"));
    }
    out.push_str("}\n");
    out
}

/// Renders a data enum as a kind enum, one type per variant and a union.
fn render_data_enum(
    name: &str,
    e: &EnumDef,
    mapper: &mut TypeMapper<'_>,
) -> Result<String, CodegenError> {
    // Record resolution and fixability effects for the whole enum.
    mapper.map_enum(e, name)?;

    let mut out = format!("enum {name}Kind {{\n");
    for variant in &e.variants {
        out.push_str(&format!("\t{}\n", variant.name));
    }
    out.push_str("}\n\n");

    for variant in &e.variants {
        out.push_str(&format!("type {name}{} {{\n", variant.name));
        out.push_str(&format!("\tkind: {name}Kind\n"));
        if let Some(fields) = &variant.fields {
            for field in fields {
                let mapped = mapper.map(&field.ty, &field.name)?;
                out.push_str(&format!("\t{}: {}\n", field.name, mapped.replace('!', "")));
            }
        }
        out.push_str("}\n\n");
    }

    let members: Vec<String> = e
        .variants
        .iter()
        .map(|v| format!("{name}{}", v.name))
        .collect();
    out.push_str(&format!("union {name} = {}\n", members.join(" | ")));
    Ok(out)
}

/// Pieces joined into the schema-wide document.
#[derive(Debug, Default)]
pub struct SchemaDocParts<'a> {
    /// Instruction names in declaration order.
    pub instruction_names: &'a [String],
    /// Account names in declaration order.
    pub account_names: &'a [String],
    /// Names of struct type declarations (union members).
    pub object_type_names: &'a [String],
    /// All type declaration names (query roots).
    pub all_type_names: &'a [String],
    /// Scalar enums used inline, keyed by name.
    pub scalar_enums: Option<&'a BTreeMap<String, Vec<String>>>,
}

/// Renders the schema-wide document: preamble, query roots, kind
/// enumerations, inline scalar enums and the joining unions.
#[must_use]
pub fn render_schema_doc(parts: &SchemaDocParts<'_>) -> String {
    let mut out = String::from(PREAMBLE);
    out.push('\n');

    if !parts.instruction_names.is_empty() {
        out.push_str("enum InstructionType {\n");
        for name in parts.instruction_names {
            out.push_str(&format!("\t{}\n", to_pascal_case(name)));
        }
        out.push_str("}\n\n");
    }

    if !parts.account_names.is_empty() {
        out.push_str("enum AccountType {\n");
        for name in parts.account_names {
            out.push_str(&format!("\t{name}\n"));
        }
        out.push_str("}\n\n");
    }

    if let Some(enums) = parts.scalar_enums {
        for (name, variants) in enums {
            out.push_str(&render_scalar_enum(name, variants));
            out.push('\n');
        }
    }

    if !parts.all_type_names.is_empty() {
        out.push_str("type Query {\n");
        for name in parts.all_type_names {
            out.push_str(&format!("\t{}: [{name}]\n", to_camel_case(name)));
        }
        out.push_str("}\n\n");
    }

    let instruction_union: Vec<String> = parts
        .instruction_names
        .iter()
        .map(|n| format!("{}Instruction", to_pascal_case(n)))
        .collect();
    push_union(&mut out, "ParsedInstructions", &instruction_union);
    push_union(&mut out, "ParsedAccounts", parts.account_names);
    let data_union: Vec<String> = parts
        .account_names
        .iter()
        .map(|n| format!("{n}Data"))
        .collect();
    push_union(&mut out, "ParsedAccountsData", &data_union);
    push_union(&mut out, "ParsedTypes", parts.object_type_names);

    out
}

fn push_union<S: AsRef<str>>(out: &mut String, label: &str, members: &[S]) {
    if members.is_empty() {
        return;
    }
    let joined: Vec<&str> = members.iter().map(AsRef::as_ref).collect();
    out.push_str(&format!("union {label} = {}\n", joined.join(" | ")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixable::FixableTypes;
    use crate::target::GraphqlTarget;
    use ironidl_idl::{TypeAliases, parse_idl};

    fn demo_idl() -> ironidl_idl::Idl {
        parse_idl(
            r#"{
                "version": "0.1.0",
                "name": "demo",
                "instructions": [
                    {
                        "name": "init",
                        "accounts": [
                            {"name": "authority", "isMut": true, "isSigner": true},
                            {"name": "member", "isMut": false, "isSigner": false, "optional": true},
                            {"name": "systemProgram", "isMut": false, "isSigner": false}
                        ],
                        "args": [{"name": "shares", "type": "u64"}]
                    }
                ],
                "accounts": [
                    {"name": "Fanout", "type": {"kind": "struct", "fields": [
                        {"name": "authority", "type": "publicKey"},
                        {"name": "name", "type": "string"}
                    ]}}
                ],
                "types": [
                    {"name": "Creator", "type": {"kind": "struct", "fields": [
                        {"name": "share", "type": "u8"}
                    ]}}
                ],
                "metadata": {"address": "Demo11111111111111111111111111111111111111"}
            }"#,
        )
        .expect("Failed to parse")
    }

    struct Tables {
        accounts: BTreeMap<String, String>,
        types: BTreeMap<String, String>,
        aliases: TypeAliases,
        fixable: FixableTypes,
    }

    impl Tables {
        fn new(idl: &ironidl_idl::Idl) -> Self {
            Self {
                accounts: crate::generator::account_modules(idl),
                types: crate::generator::type_modules(idl),
                aliases: TypeAliases::new(),
                fixable: FixableTypes::new(),
            }
        }

        fn mapper(&self) -> TypeMapper<'_> {
            TypeMapper::new(
                &self.accounts,
                &self.types,
                &self.aliases,
                &self.fixable,
                &GraphqlTarget,
            )
        }
    }

    #[test]
    fn test_render_struct_type() {
        let idl = demo_idl();
        let tables = Tables::new(&idl);
        let mut mapper = tables.mapper();
        let rendered = render_type(&idl.types[0], &mut mapper).expect("render failed");
        assert!(rendered.code.contains("type Creator {"));
        assert!(rendered.code.contains("\tshare: Int"));
        assert!(!rendered.is_fixable);
    }

    #[test]
    fn test_render_empty_struct_type() {
        let idl = parse_idl(
            r#"{
                "version": "0.1.0", "name": "demo", "instructions": [],
                "types": [{"name": "Unit", "type": {"kind": "struct", "fields": []}}],
                "metadata": {"address": "Demo11111111111111111111111111111111111111"}
            }"#,
        )
        .expect("Failed to parse");
        let tables = Tables::new(&idl);
        let mut mapper = tables.mapper();
        let rendered = render_type(&idl.types[0], &mut mapper).expect("render failed");
        assert_eq!(rendered.code, "type Unit {}\n");
        assert!(!rendered.is_fixable);
    }

    #[test]
    fn test_render_account_blocks() {
        let idl = demo_idl();
        let tables = Tables::new(&idl);
        let mut mapper = tables.mapper();
        let rendered = render_account(&idl.accounts[0], &mut mapper).expect("render failed");
        assert!(rendered.code.contains("type Fanout implements Account {"));
        assert!(rendered.code.contains("\tdata: FanoutData\n"));
        assert!(rendered.code.contains("type FanoutData {"));
        assert!(rendered.code.contains("\tauthority: PublicKey\n"));
        // Account carries a string field, so its codec is fixable.
        assert!(rendered.is_fixable);
    }

    #[test]
    fn test_render_instruction_blocks() {
        let idl = demo_idl();
        let tables = Tables::new(&idl);
        let mut mapper = tables.mapper();
        let rendered = render_instruction(&idl.instructions[0], &mut mapper).expect("render failed");
        assert!(rendered.code.contains("type InitInstructionAccounts {"));
        assert!(rendered.code.contains("\tauthority: PublicKey!\n"));
        assert!(rendered.code.contains("\tmember: PublicKey\n"));
        // Known pubkeys are defaulted, not declared.
        assert!(!rendered.code.contains("systemProgram"));
        assert!(rendered.code.contains("type InitInstructionArgs {"));
        assert!(rendered.code.contains("type InitInstruction implements Instruction {"));
    }

    #[test]
    fn test_render_data_enum() {
        let idl = parse_idl(
            r#"{
                "version": "0.1.0", "name": "demo", "instructions": [],
                "types": [{"name": "Action", "type": {"kind": "enum", "variants": [
                    {"name": "Noop"},
                    {"name": "Set", "fields": [{"name": "value", "type": "u8"}]}
                ]}}],
                "metadata": {"address": "Demo11111111111111111111111111111111111111"}
            }"#,
        )
        .expect("Failed to parse");
        let tables = Tables::new(&idl);
        let mut mapper = tables.mapper();
        let rendered = render_type(&idl.types[0], &mut mapper).expect("render failed");
        assert!(rendered.code.contains("enum ActionKind {"));
        assert!(rendered.code.contains("type ActionSet {"));
        assert!(rendered.code.contains("\tvalue: Int\n"));
        assert!(rendered.code.contains("union Action = ActionNoop | ActionSet"));
        assert!(rendered.is_fixable);
    }

    #[test]
    fn test_render_schema_doc_cross_references() {
        let instruction_names = vec!["init".to_string()];
        let account_names = vec!["Fanout".to_string()];
        let type_names = vec!["Creator".to_string()];
        let doc = render_schema_doc(&SchemaDocParts {
            instruction_names: &instruction_names,
            account_names: &account_names,
            object_type_names: &type_names,
            all_type_names: &type_names,
            scalar_enums: None,
        });
        assert!(doc.contains("interface Account {"));
        assert!(doc.contains("interface Instruction {"));
        assert!(doc.contains("enum InstructionType {\n\tInit\n}"));
        assert!(doc.contains("enum AccountType {\n\tFanout\n}"));
        assert!(doc.contains("type Query {\n\tcreator: [Creator]\n}"));
        assert!(doc.contains("union ParsedInstructions = InitInstruction"));
        assert!(doc.contains("union ParsedAccounts = Fanout"));
        assert!(doc.contains("union ParsedAccountsData = FanoutData"));
        assert!(doc.contains("union ParsedTypes = Creator"));
    }
}
