//! Story module generation.
//!
//! Rewrites the compiler's generated component code into a self-contained
//! module exporting `mount(target, sync)`: the component is instantiated
//! against the mount target, every declared prop is wired to the runtime's
//! binding helper so internal changes flow out into the shared props bag,
//! and the caller-supplied sync stream drives external updates back in
//! through `$set`. Output is text only; nothing is executed or validated.

use lazy_static::lazy_static;
#[cfg(feature = "napi")]
use napi_derive::napi;
use regex::Regex;
use tracing::warn;

use crate::compiler::{
    CompileError, CompileOptions, CompiledOutput, ComponentCompiler, CssMode,
};
use crate::extract::{extract_props, ExtractOptions};

/// Local name the default-exported component constructor is rebound to.
const COMPONENT_ALIAS: &str = "StoryComponent";

lazy_static! {
    static ref EXPORT_DEFAULT_RE: Regex = Regex::new(r"export default ").unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// GENERATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Compile a component and instrument it for control-panel synchronization.
///
/// Styles are forced to `injected` so the produced module carries its own
/// CSS instead of relying on an extracted artifact. Compile errors
/// propagate unchanged.
pub fn generate_story_module<C: ComponentCompiler + ?Sized>(
    compiler: &C,
    source: &str,
    options: Option<&CompileOptions>,
) -> Result<String, CompileError> {
    let mut compile_options = options.cloned().unwrap_or_default();
    compile_options.css = CssMode::Injected;

    let output = compiler.compile(source, &compile_options)?;
    Ok(generate_from_compiled(
        &output,
        &ExtractOptions::from(&compile_options),
    ))
}

/// Pure half of the generator: compiled output in, module text out.
pub fn generate_from_compiled(output: &CompiledOutput, options: &ExtractOptions) -> String {
    let meta = extract_props(&output.ast, options);
    for warning in &meta.warnings {
        // Warnings never block generation, but dropping them silently would
        // hide missing defaults from whoever runs the toolchain.
        warn!("{}", warning);
    }

    let mut code = String::with_capacity(output.js.code.len() + 512);
    code.push_str("import { bind as svelteBind } from \"svelte/internal\";\n");
    code.push_str(&rebind_default_export(&output.js.code, options));
    code.push_str(&emit_mount_function(&meta.props));
    code
}

/// The single seam coupling this crate to the compiler's generated-code
/// shape: compiled modules are expected to default-export the component
/// constructor. When the shape doesn't match, the code passes through
/// unchanged and the mismatch is logged rather than raised.
fn rebind_default_export(code: &str, options: &ExtractOptions) -> String {
    if !EXPORT_DEFAULT_RE.is_match(code) {
        warn!(
            filename = options.filename.as_deref().unwrap_or("<unknown>"),
            "compiled output has no default export to rebind; emitting code unchanged"
        );
        return code.to_string();
    }
    EXPORT_DEFAULT_RE
        .replace(code, format!("const {} = ", COMPONENT_ALIAS).as_str())
        .to_string()
}

fn emit_mount_function(props: &[String]) -> String {
    let mut out = String::new();
    out.push_str("\n\nexport function mount(target, sync) {\n");
    out.push_str("\tconst props = {};\n");
    out.push_str(&format!(
        "\tconst component = new {}({{ target, props }});\n",
        COMPONENT_ALIAS
    ));

    for prop in props {
        let name = quote_js_string(prop);
        out.push_str(&format!(
            "\n\tsvelteBind(component, {name}, (value) => {{\n\t\tprops[{name}] = value;\n\t}});\n",
            name = name
        ));
    }

    out.push_str(
        "\n\tconst unsubscribe = sync(props).subscribe((newProps) => {\n\
         \t\tcomponent.$set(newProps);\n\
         \t});\n",
    );

    // Unsubscribe before destroy, so a torn-down instance can never receive
    // a sync update. The guard keeps teardown idempotent.
    out.push_str(
        "\n\tlet destroyed = false;\n\
         \treturn () => {\n\
         \t\tif (destroyed) {\n\
         \t\t\treturn;\n\
         \t\t}\n\
         \t\tdestroyed = true;\n\
         \t\tunsubscribe();\n\
         \t\tcomponent.$destroy();\n\
         \t};\n\
         }\n",
    );
    out
}

fn quote_js_string(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('\"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "");
    format!("\"{}\"", escaped)
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

/// JSON boundary for hosts that run the component compiler themselves.
/// The host is responsible for compiling with `css: "injected"`.
#[cfg(feature = "napi")]
#[napi]
pub fn generate_story_module_native(
    compiled_json: String,
    options_json: Option<String>,
) -> napi::Result<String> {
    let output: CompiledOutput = serde_json::from_str(&compiled_json)
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;
    let options: ExtractOptions = match options_json {
        Some(json) => {
            serde_json::from_str(&json).map_err(|e| napi::Error::from_reason(e.to_string()))?
        }
        None => ExtractOptions::default(),
    };
    Ok(generate_from_compiled(&output, &options))
}
