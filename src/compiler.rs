//! Compiler seam types for the story toolkit.
//!
//! The component compiler itself is an external collaborator. This module
//! pins down the narrow slice of its surface the crate depends on: the
//! options it accepts, the `{ ast, js: { code } }` shape it returns, and the
//! error it raises for invalid source.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════════════
// COMPONENT AST IR
// ═══════════════════════════════════════════════════════════════════════════════

/// Parsed component structure as seen by this crate. Only the script blocks
/// are carried; markup is never interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComponentAst {
    /// Instance script: per-instance setup logic. The sole source of props.
    #[serde(default)]
    pub instance: Option<ScriptBlock>,
    /// Module-context script (`<script context="module">`). Carried for
    /// completeness, never scanned for props.
    #[serde(default)]
    pub module: Option<ScriptBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScriptBlock {
    pub raw: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl ScriptBlock {
    /// `lang="ts"` on the script tag switches the parse to TypeScript.
    pub fn is_typescript(&self) -> bool {
        self.attributes.get("lang").map(|l| l.as_str()) == Some("ts")
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPILE OPTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Where the compiler puts generated styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CssMode {
    /// Styles inlined into the component's runtime code.
    Injected,
    /// Styles extracted to a separate artifact.
    #[default]
    External,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompileOptions {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub css: CssMode,
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPILED OUTPUT
// ═══════════════════════════════════════════════════════════════════════════════

/// The compiler's output, read-only from this crate's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledOutput {
    pub ast: ComponentAst,
    pub js: JsOutput,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JsOutput {
    pub code: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPILE ERROR
// ═══════════════════════════════════════════════════════════════════════════════

/// Error surfaced by the component compiler. The crate propagates these
/// verbatim; it never wraps, translates, or recovers.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code}] {message}")]
pub struct CompileError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl CompileError {
    pub fn new(code: &str, message: &str, filename: Option<&str>, line: u32, column: u32) -> Self {
        CompileError {
            code: code.to_string(),
            message: message.to_string(),
            filename: filename.map(|f| f.to_string()),
            line,
            column,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPILER CAPABILITY
// ═══════════════════════════════════════════════════════════════════════════════

/// The external component compiler, injected wherever full compilation
/// (AST plus executable code) is needed.
pub trait ComponentCompiler {
    fn compile(&self, source: &str, options: &CompileOptions)
        -> Result<CompiledOutput, CompileError>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
