//! Generation orchestrator.
//!
//! Drives one full render of an IDL document: validation, the two-pass
//! fixability computation, per-entity rendering and the index/schema
//! document assembly. Types render before instructions and accounts so
//! the final fixable set is known when codec classes are chosen.

use crate::error::CodegenError;
use crate::mapper::TypeMapper;
use crate::render::{Rendered, graphql, sdk};
use crate::target::OutputTarget;
use ironidl_idl::{Idl, IdlDefinedType, TypeAliases, validate_idl};
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// Best-effort formatting hook applied to each generated block.
///
/// A failing formatter is logged and the unformatted text used;
/// generation never aborts over cosmetics.
pub type Formatter = fn(&str) -> Result<String, String>;

/// Options controlling one generation run.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Output artifact to produce.
    pub target: OutputTarget,
    /// Aliases mapped name -> primitive key.
    pub type_aliases: TypeAliases,
    /// Optional formatting hook.
    pub formatter: Option<Formatter>,
}

/// Generated text blocks keyed by logical unit name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
    /// Output artifact that was produced.
    pub target: OutputTarget,
    /// Program address from the IDL metadata.
    pub program_address: String,
    /// Type name -> generated block.
    pub types: BTreeMap<String, String>,
    /// Account name -> generated block.
    pub accounts: BTreeMap<String, String>,
    /// Instruction name -> generated block.
    pub instructions: BTreeMap<String, String>,
    /// Errors module, when errors are declared and the target has one.
    pub errors: Option<String>,
    /// Schema-wide document (GraphQL) or package index (SDK).
    pub index: String,
}

/// Builds the account name -> module table.
#[must_use]
pub fn account_modules(idl: &Idl) -> BTreeMap<String, String> {
    idl.accounts
        .iter()
        .map(|def| (def.name.clone(), format!("accounts/{}", def.name)))
        .collect()
}

/// Builds the user-defined type name -> module table.
#[must_use]
pub fn type_modules(idl: &Idl) -> BTreeMap<String, String> {
    idl.types
        .iter()
        .map(|def| (def.name.clone(), format!("types/{}", def.name)))
        .collect()
}

/// Renders every entity of one IDL document.
pub struct Generator<'a> {
    idl: &'a Idl,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a generator for the given document.
    #[must_use]
    pub fn new(idl: &'a Idl, options: GeneratorOptions) -> Self {
        Self { idl, options }
    }

    /// Renders the document into per-entity text blocks.
    ///
    /// # Errors
    /// Returns `CodegenError` on any configuration or consistency error;
    /// no partial output is produced.
    pub fn render(&self) -> Result<GeneratedOutput, CodegenError> {
        validate_idl(self.idl, &self.options.type_aliases)?;

        let account_mods = account_modules(self.idl);
        let type_mods = type_modules(self.idl);
        let target = self.options.target.render_target();

        let fixable = crate::fixable::compute_fixable_types(
            self.idl,
            &account_mods,
            &type_mods,
            &self.options.type_aliases,
            target,
        )?;

        let mut doc_enums: BTreeMap<String, Vec<String>> = BTreeMap::new();

        // -----------------
        // Types
        // -----------------
        debug!(count = self.idl.types.len(), "rendering types");
        let mut types = BTreeMap::new();
        for def in &self.idl.types {
            debug!(name = %def.name, kind = def.ty.kind(), "rendering type");
            let mut mapper =
                self.mapper(&account_mods, &type_mods, &fixable, target);
            let rendered = match self.options.target {
                OutputTarget::Sdk => sdk::render_type(def, &mut mapper)?,
                OutputTarget::Graphql => graphql::render_type(def, &mut mapper)?,
            };
            trace!(name = %def.name, fixable = rendered.is_fixable, "type rendered");
            self.collect_doc_enums(&mut doc_enums, &mapper)?;
            types.insert(def.name.clone(), self.format_block(&def.name, rendered));
        }

        // -----------------
        // Instructions
        // -----------------
        let mut instructions = BTreeMap::new();
        for ix in &self.idl.instructions {
            debug!(name = %ix.name, "rendering instruction");
            trace!(args = ix.args.len(), accounts = ix.accounts.len(), "instruction shape");
            let mut mapper =
                self.mapper(&account_mods, &type_mods, &fixable, target);
            let rendered = match self.options.target {
                OutputTarget::Sdk => sdk::render_instruction(ix, &mut mapper)?,
                OutputTarget::Graphql => graphql::render_instruction(ix, &mut mapper)?,
            };
            self.collect_doc_enums(&mut doc_enums, &mapper)?;
            instructions.insert(ix.name.clone(), self.format_block(&ix.name, rendered));
        }

        // -----------------
        // Accounts
        // -----------------
        let implicit_discriminator = self.idl.accounts_have_implicit_discriminator();
        let mut accounts = BTreeMap::new();
        for def in &self.idl.accounts {
            debug!(name = %def.name, "rendering account");
            let mut mapper =
                self.mapper(&account_mods, &type_mods, &fixable, target);
            let rendered = match self.options.target {
                OutputTarget::Sdk => {
                    sdk::render_account(def, &mut mapper, implicit_discriminator)?
                }
                OutputTarget::Graphql => graphql::render_account(def, &mut mapper)?,
            };
            self.collect_doc_enums(&mut doc_enums, &mapper)?;
            accounts.insert(def.name.clone(), self.format_block(&def.name, rendered));
        }

        // -----------------
        // Errors
        // -----------------
        debug!(count = self.idl.errors.len(), "rendering errors");
        let errors = match self.options.target {
            OutputTarget::Sdk => sdk::render_errors(&self.idl.errors),
            OutputTarget::Graphql => None,
        };

        // -----------------
        // Index / schema document
        // -----------------
        let instruction_names: Vec<String> =
            self.idl.instructions.iter().map(|ix| ix.name.clone()).collect();
        let account_names: Vec<String> =
            self.idl.accounts.iter().map(|def| def.name.clone()).collect();
        let type_names: Vec<String> =
            self.idl.types.iter().map(|def| def.name.clone()).collect();
        let object_type_names: Vec<String> = self
            .idl
            .types
            .iter()
            .filter(|def| matches!(def.ty, IdlDefinedType::Struct(_)))
            .map(|def| def.name.clone())
            .collect();

        let index = match self.options.target {
            OutputTarget::Sdk => sdk::render_index(
                &instruction_names,
                &account_names,
                &type_names,
                errors.is_some(),
            ),
            OutputTarget::Graphql => graphql::render_schema_doc(&graphql::SchemaDocParts {
                instruction_names: &instruction_names,
                account_names: &account_names,
                object_type_names: &object_type_names,
                all_type_names: &type_names,
                scalar_enums: Some(&doc_enums),
            }),
        };

        Ok(GeneratedOutput {
            target: self.options.target,
            program_address: self.idl.metadata.address.clone(),
            types,
            accounts,
            instructions,
            errors,
            index,
        })
    }

    fn mapper<'t>(
        &'t self,
        account_mods: &'t BTreeMap<String, String>,
        type_mods: &'t BTreeMap<String, String>,
        fixable: &'t crate::fixable::FixableTypes,
        target: &'t dyn crate::target::RenderTarget,
    ) -> TypeMapper<'t> {
        TypeMapper::new(
            account_mods,
            type_mods,
            &self.options.type_aliases,
            fixable,
            target,
        )
    }

    /// Collects inline scalar enums for the schema document, rejecting
    /// conflicting variant lists recorded under one name.
    fn collect_doc_enums(
        &self,
        doc_enums: &mut BTreeMap<String, Vec<String>>,
        mapper: &TypeMapper<'_>,
    ) -> Result<(), CodegenError> {
        if self.options.target != OutputTarget::Graphql {
            return Ok(());
        }
        for (name, variants) in mapper.scalar_enums_used() {
            match doc_enums.get(name) {
                Some(existing) if existing != variants => {
                    return Err(CodegenError::ConflictingEnum {
                        name: name.clone(),
                        first: existing.clone(),
                        second: variants.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    doc_enums.insert(name.clone(), variants.clone());
                }
            }
        }
        Ok(())
    }

    fn format_block(&self, name: &str, rendered: Rendered) -> String {
        let Some(formatter) = self.options.formatter else {
            return rendered.code;
        };
        match formatter(&rendered.code) {
            Ok(formatted) => formatted,
            Err(err) => {
                warn!(%name, error = %err, "failed to format block, using unformatted output");
                rendered.code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironidl_idl::parse_idl;

    const CONFIG_IDL: &str = r#"{
        "version": "0.1.0",
        "name": "tokenConfig",
        "instructions": [
            {
                "name": "createConfig",
                "accounts": [
                    {"name": "authority", "isMut": true, "isSigner": true},
                    {"name": "config", "isMut": true, "isSigner": false},
                    {"name": "systemProgram", "isMut": false, "isSigner": false}
                ],
                "args": [{"name": "data", "type": {"defined": "ConfigData"}}]
            }
        ],
        "accounts": [
            {"name": "Config", "type": {"kind": "struct", "fields": [
                {"name": "authority", "type": "publicKey"},
                {"name": "data", "type": {"defined": "ConfigData"}}
            ]}}
        ],
        "types": [
            {"name": "Creator", "type": {"kind": "struct", "fields": [
                {"name": "address", "type": "publicKey"},
                {"name": "share", "type": "u8"}
            ]}},
            {"name": "ConfigData", "type": {"kind": "struct", "fields": [
                {"name": "uuid", "type": "string"},
                {"name": "creators", "type": {"vec": {"defined": "Creator"}}},
                {"name": "maxSupply", "type": "u64"},
                {"name": "isMutable", "type": "bool"}
            ]}}
        ],
        "errors": [
            {"code": 6000, "name": "InvalidAuthority", "msg": "wrong authority"}
        ],
        "metadata": {"address": "Conf11111111111111111111111111111111111111"}
    }"#;

    fn render(target: OutputTarget) -> GeneratedOutput {
        let idl = parse_idl(CONFIG_IDL).expect("Failed to parse");
        Generator::new(
            &idl,
            GeneratorOptions {
                target,
                ..GeneratorOptions::default()
            },
        )
        .render()
        .expect("render failed")
    }

    #[test]
    fn test_end_to_end_sdk_fixability() {
        let output = render(OutputTarget::Sdk);

        // Creator has only statically sized fields.
        let creator = &output.types["Creator"];
        assert!(creator.contains("new beet.BeetArgsStruct<Creator>"));

        // ConfigData carries a direct vector and a string.
        let config_data = &output.types["ConfigData"];
        assert!(config_data.contains("new beet.FixableBeetArgsStruct<ConfigData>"));
        assert!(config_data.contains("import { Creator, creatorBeet } from '../types/Creator'"));

        // The account references ConfigData, so propagation makes its
        // codec fixable even though its own fields are static shapes.
        let account = &output.accounts["Config"];
        assert!(account.contains("new beet.FixableBeetStruct<Config, ConfigArgs>"));
        assert!(account.contains("import { ConfigData, configDataBeet } from '../types/ConfigData'"));
    }

    #[test]
    fn test_end_to_end_sdk_units() {
        let output = render(OutputTarget::Sdk);
        assert_eq!(output.program_address, "Conf11111111111111111111111111111111111111");
        assert_eq!(output.types.len(), 2);
        assert_eq!(output.accounts.len(), 1);
        assert_eq!(output.instructions.len(), 1);
        assert!(output.errors.is_some());
        assert!(output.index.contains("export type ParsedAccounts"));
    }

    #[test]
    fn test_end_to_end_graphql_schema() {
        let output = render(OutputTarget::Graphql);
        assert!(output.types["ConfigData"].contains("\tcreators: [Creator!]\n"));
        assert!(output.accounts["Config"].contains("type Config implements Account {"));
        assert!(output.instructions["createConfig"]
            .contains("type CreateConfigInstruction implements Instruction {"));
        assert!(output.errors.is_none());
        assert!(output.index.contains("enum InstructionType {\n\tCreateConfig\n}"));
        assert!(output.index.contains("enum AccountType {\n\tConfig\n}"));
        assert!(output.index.contains("union ParsedTypes = Creator | ConfigData"));
    }

    #[test]
    fn test_deterministic_output() {
        assert_eq!(render(OutputTarget::Sdk), render(OutputTarget::Sdk));
        assert_eq!(render(OutputTarget::Graphql), render(OutputTarget::Graphql));
    }

    #[test]
    fn test_unresolved_reference_aborts() {
        let idl = parse_idl(
            r#"{
                "version": "0.1.0", "name": "demo",
                "instructions": [],
                "types": [{"name": "Broken", "type": {"kind": "struct", "fields": [
                    {"name": "ghost", "type": {"defined": "Ghost"}}
                ]}}],
                "metadata": {"address": "Demo11111111111111111111111111111111111111"}
            }"#,
        )
        .expect("Failed to parse");
        let result = Generator::new(&idl, GeneratorOptions::default()).render();
        assert!(result.is_err());
    }

    fn failing_formatter(_: &str) -> Result<String, String> {
        Err("formatter exploded".to_string())
    }

    fn tagging_formatter(code: &str) -> Result<String, String> {
        Ok(format!("// formatted\n{code}"))
    }

    #[test]
    fn test_formatter_failure_falls_back_to_unformatted() {
        let idl = parse_idl(CONFIG_IDL).expect("Failed to parse");
        let plain = Generator::new(&idl, GeneratorOptions::default())
            .render()
            .expect("render failed");
        let with_failing = Generator::new(
            &idl,
            GeneratorOptions {
                formatter: Some(failing_formatter),
                ..GeneratorOptions::default()
            },
        )
        .render()
        .expect("render failed");
        assert_eq!(plain.types, with_failing.types);
        assert_eq!(plain.accounts, with_failing.accounts);
    }

    #[test]
    fn test_formatter_applies() {
        let idl = parse_idl(CONFIG_IDL).expect("Failed to parse");
        let output = Generator::new(
            &idl,
            GeneratorOptions {
                formatter: Some(tagging_formatter),
                ..GeneratorOptions::default()
            },
        )
        .render()
        .expect("render failed");
        assert!(output.types["Creator"].starts_with("// formatted\n"));
    }

    #[test]
    fn test_shank_accounts_skip_discriminator() {
        let idl = parse_idl(
            r#"{
                "version": "0.1.0", "name": "demo",
                "instructions": [],
                "accounts": [{"name": "Vault", "type": {"kind": "struct", "fields": [
                    {"name": "bump", "type": "u8"}
                ]}}],
                "metadata": {"address": "Demo11111111111111111111111111111111111111", "origin": "shank"}
            }"#,
        )
        .expect("Failed to parse");
        let output = Generator::new(&idl, GeneratorOptions::default())
            .render()
            .expect("render failed");
        assert!(!output.accounts["Vault"].contains("accountDiscriminator"));
    }
}
