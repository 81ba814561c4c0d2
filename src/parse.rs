//! Component script front end.
//!
//! Locates the `<script>` blocks of a component source, classifies them as
//! instance or module context, and validates the script text with oxc so
//! syntax errors surface to callers before extraction or generation runs.

use lazy_static::lazy_static;
#[cfg(feature = "napi")]
use napi_derive::napi;
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use regex::Regex;
use std::collections::HashMap;

use crate::compiler::{CompileError, CompileOptions, ComponentAst, ScriptBlock};

lazy_static! {
    /// Script block regex
    static ref SCRIPT_REGEX: Regex =
        Regex::new(r"(?is)<script\b([^>]*)>([\s\S]*?)</script>").unwrap();

    /// Attribute regex for parsing script attributes
    static ref ATTR_REGEX: Regex =
        Regex::new(r#"(?i)([a-z0-9-]+)(?:=(?:"([^"]*)"|'([^']*)'|([^>\s]+)))?"#).unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCRIPT BLOCK EXTRACTION
// ═══════════════════════════════════════════════════════════════════════════════

fn parse_script_attributes(attr_string: &str) -> HashMap<String, String> {
    let mut attributes = HashMap::new();
    for caps in ATTR_REGEX.captures_iter(attr_string) {
        if let Some(name) = caps.get(1) {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "true".to_string());
            attributes.insert(name.as_str().to_string(), value);
        }
    }
    attributes
}

/// A script tag with `context="module"` (or a bare `module` attribute) runs
/// once per module, not per instance.
fn is_module_context(attributes: &HashMap<String, String>) -> bool {
    attributes.get("context").map(|c| c.as_str()) == Some("module")
        || attributes.contains_key("module")
}

/// Parse component source into the crate's AST representation.
///
/// Markup is left untouched; only script blocks are pulled out. Each context
/// may appear at most once, matching the component compiler's own rule.
pub fn parse_component(
    source: &str,
    options: &CompileOptions,
) -> Result<ComponentAst, CompileError> {
    let filename = options.filename.as_deref();
    let mut ast = ComponentAst::default();

    for caps in SCRIPT_REGEX.captures_iter(source) {
        let attr_string = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let content = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        let block = ScriptBlock {
            raw: content.trim().to_string(),
            attributes: parse_script_attributes(attr_string),
        };

        if is_module_context(&block.attributes) {
            if ast.module.is_some() {
                return Err(CompileError::new(
                    "duplicate-script",
                    "A component can have a single module-context <script> element",
                    filename,
                    0,
                    0,
                ));
            }
            ast.module = Some(block);
        } else {
            if ast.instance.is_some() {
                return Err(CompileError::new(
                    "duplicate-script",
                    "A component can have a single instance-level <script> element",
                    filename,
                    0,
                    0,
                ));
            }
            ast.instance = Some(block);
        }
    }

    if let Some(instance) = &ast.instance {
        check_script_syntax(instance, filename)?;
    }
    if let Some(module) = &ast.module {
        check_script_syntax(module, filename)?;
    }

    Ok(ast)
}

/// Run the script text through oxc and surface the first diagnostic as a
/// compile error. Extraction downstream re-parses tolerantly; this is the
/// only place a syntax error is raised.
fn check_script_syntax(block: &ScriptBlock, filename: Option<&str>) -> Result<(), CompileError> {
    let allocator = Allocator::default();
    let source_type = SourceType::default()
        .with_module(true)
        .with_typescript(block.is_typescript());
    let ret = Parser::new(&allocator, &block.raw, source_type).parse();

    if let Some(error) = ret.errors.first() {
        return Err(CompileError::new(
            "parse-error",
            &error.to_string(),
            filename,
            0,
            0,
        ));
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn parse_component_native(
    source: String,
    options_json: Option<String>,
) -> napi::Result<serde_json::Value> {
    let options: CompileOptions = match options_json {
        Some(json) => {
            serde_json::from_str(&json).map_err(|e| napi::Error::from_reason(e.to_string()))?
        }
        None => CompileOptions::default(),
    };
    let ast = parse_component(&source, &options)
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;
    serde_json::to_value(ast).map_err(|e| napi::Error::from_reason(e.to_string()))
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
