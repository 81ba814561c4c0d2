//! # Story Native
//!
//! Native engine for story-module tooling over Svelte components: prop
//! extraction from component source and generation of instrumented modules
//! that expose those props to an external control panel.
//!
//! ## Contract
//!
//! 1. **Prop convention**: a component input is a top-level `export let`
//!    binding in the instance script. Nothing else is recognized, and
//!    unexpected AST shapes are skipped, never raised.
//! 2. **Ordering**: props are reported in declaration order and generated
//!    binding code is emitted in that same order; downstream display relies
//!    on it being stable.
//! 3. **Warnings are informational**: a prop without a default value
//!    produces a warning string but never blocks extraction or generation.
//! 4. **Compile errors pass through**: syntax errors from the component
//!    front end surface verbatim; this crate adds no wrapping or recovery.
//! 5. **Generated mount contract**: `mount(target, sync)` instantiates the
//!    component, wires every prop through the runtime binding helper into a
//!    shared props bag, subscribes to the sync stream for inbound updates
//!    via `$set`, and returns an idempotent teardown that unsubscribes
//!    before destroying the instance.

#[cfg(feature = "napi")]
use napi_derive::napi;

mod compiler;
mod extract;
mod generate;
mod parse;

#[cfg(test)]
mod generate_tests;

pub use compiler::{
    CompileError, CompileOptions, CompiledOutput, ComponentAst, ComponentCompiler, CssMode,
    JsOutput, ScriptBlock,
};
pub use extract::{extract_from_source, extract_props, ExtractOptions, ExtractionResult};
pub use generate::{generate_from_compiled, generate_story_module};
pub use parse::parse_component;

#[cfg(feature = "napi")]
pub use extract::{extract_from_ast_native, extract_from_source_native};
#[cfg(feature = "napi")]
pub use generate::generate_story_module_native;
#[cfg(feature = "napi")]
pub use parse::parse_component_native;

#[cfg(feature = "napi")]
#[napi]
pub fn story_bridge() -> String {
    "Story Native Bridge Connected".to_string()
}
