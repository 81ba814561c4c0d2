//! Prop extraction from the component instance script.
//!
//! This is the only module that interprets AST shape. The recognized
//! declaration pattern is a top-level `export let` binding group, the
//! convention marking a variable as an externally settable component input.
//! Everything else in the statement sequence is ignored, and nothing here
//! ever fails: unexpected shapes degrade to "no property found".

#[cfg(feature = "napi")]
use napi_derive::napi;
use oxc_allocator::Allocator;
use oxc_ast::ast::{BindingPattern, Declaration, Statement, VariableDeclarationKind};
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::{Deserialize, Serialize};

use crate::compiler::{CompileError, CompileOptions, ComponentAst};
use crate::parse::parse_component;

// ═══════════════════════════════════════════════════════════════════════════════
// RESULT TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// Declared props plus informational warnings, in declaration order.
/// Duplicates from malformed source pass through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub props: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOptions {
    /// Used only to annotate warning text.
    #[serde(default)]
    pub filename: Option<String>,
}

impl From<&CompileOptions> for ExtractOptions {
    fn from(options: &CompileOptions) -> Self {
        ExtractOptions {
            filename: options.filename.clone(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// EXTRACTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Scan the instance script's top-level statements for exported mutable
/// bindings. A component without an instance script contributes nothing.
///
/// Only the top level is scanned; an `export let` nested inside another
/// construct is not a prop declaration and is deliberately not recognized.
pub fn extract_props(ast: &ComponentAst, options: &ExtractOptions) -> ExtractionResult {
    let mut result = ExtractionResult::default();

    let instance = match &ast.instance {
        Some(instance) => instance,
        None => return result,
    };

    let location = options
        .filename
        .as_deref()
        .map(|f| format!(" in \"{}\"", f))
        .unwrap_or_default();

    let allocator = Allocator::default();
    let source_type = SourceType::default()
        .with_module(true)
        .with_typescript(instance.is_typescript());
    let ret = Parser::new(&allocator, &instance.raw, source_type).parse();
    if !ret.errors.is_empty() {
        // Syntax errors are the front end's to raise; an unparseable script
        // contributes no props here.
        return result;
    }

    for stmt in &ret.program.body {
        let export = match stmt {
            Statement::ExportNamedDeclaration(export) => export,
            _ => continue,
        };
        let declaration = match &export.declaration {
            Some(Declaration::VariableDeclaration(declaration)) => declaration,
            _ => continue,
        };
        if !matches!(declaration.kind, VariableDeclarationKind::Let) {
            continue;
        }
        for declarator in &declaration.declarations {
            if let BindingPattern::BindingIdentifier(ident) = &declarator.id {
                result.props.push(ident.name.to_string());
                if declarator.init.is_none() {
                    result.warnings.push(format!(
                        "Property \"{}\"{} doesn't have a default value",
                        ident.name, location
                    ));
                }
            }
        }
    }

    result
}

/// Parse component source through the front end, then extract. Syntax
/// errors from the parse step propagate unchanged.
pub fn extract_from_source(
    source: &str,
    options: &CompileOptions,
) -> Result<ExtractionResult, CompileError> {
    let ast = parse_component(source, options)?;
    Ok(extract_props(&ast, &ExtractOptions::from(options)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
fn extract_options_from_json(options_json: Option<String>) -> napi::Result<ExtractOptions> {
    match options_json {
        Some(json) => {
            serde_json::from_str(&json).map_err(|e| napi::Error::from_reason(e.to_string()))
        }
        None => Ok(ExtractOptions::default()),
    }
}

#[cfg(feature = "napi")]
#[napi]
pub fn extract_from_ast_native(
    ast_json: String,
    options_json: Option<String>,
) -> napi::Result<serde_json::Value> {
    let ast: ComponentAst =
        serde_json::from_str(&ast_json).map_err(|e| napi::Error::from_reason(e.to_string()))?;
    let options = extract_options_from_json(options_json)?;
    serde_json::to_value(extract_props(&ast, &options))
        .map_err(|e| napi::Error::from_reason(e.to_string()))
}

#[cfg(feature = "napi")]
#[napi]
pub fn extract_from_source_native(
    source: String,
    options_json: Option<String>,
) -> napi::Result<serde_json::Value> {
    let options: CompileOptions = match options_json {
        Some(json) => {
            serde_json::from_str(&json).map_err(|e| napi::Error::from_reason(e.to_string()))?
        }
        None => CompileOptions::default(),
    };
    let result = extract_from_source(&source, &options)
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;
    serde_json::to_value(result).map_err(|e| napi::Error::from_reason(e.to_string()))
}
