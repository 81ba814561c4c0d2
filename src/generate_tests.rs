#[cfg(test)]
mod tests {
    use crate::compiler::{
        CompileError, CompileOptions, CompiledOutput, ComponentAst, ComponentCompiler, CssMode,
        JsOutput,
    };
    use crate::extract::ExtractOptions;
    use crate::generate::{generate_from_compiled, generate_story_module};
    use crate::parse::parse_component;
    use std::cell::RefCell;

    /// Compiler stand-in: parses the real source through the front end and
    /// pairs it with canned generated code in the compiler's known shape.
    struct MockCompiler {
        js_code: String,
        seen_options: RefCell<Option<CompileOptions>>,
    }

    impl MockCompiler {
        fn new(js_code: &str) -> Self {
            MockCompiler {
                js_code: js_code.to_string(),
                seen_options: RefCell::new(None),
            }
        }
    }

    impl ComponentCompiler for MockCompiler {
        fn compile(
            &self,
            source: &str,
            options: &CompileOptions,
        ) -> Result<CompiledOutput, CompileError> {
            *self.seen_options.borrow_mut() = Some(options.clone());
            let ast = parse_component(source, options)?;
            Ok(CompiledOutput {
                ast,
                js: JsOutput {
                    code: self.js_code.clone(),
                },
            })
        }
    }

    struct FailingCompiler;

    impl ComponentCompiler for FailingCompiler {
        fn compile(
            &self,
            _source: &str,
            options: &CompileOptions,
        ) -> Result<CompiledOutput, CompileError> {
            Err(CompileError::new(
                "parse-error",
                "Unexpected token",
                options.filename.as_deref(),
                1,
                1,
            ))
        }
    }

    const HELLO_JS: &str = concat!(
        "/* generated by the component compiler */\n",
        "class Hello {\n",
        "\tconstructor(options) {}\n",
        "\t$set(props) {}\n",
        "\t$destroy() {}\n",
        "}\n",
        "export default Hello;"
    );

    const HELLO_SOURCE: &str =
        "<script>export let name = \"world\";</script>\n<h1>Hello {name}</h1>";

    #[test]
    fn test_default_export_rebound() {
        let compiler = MockCompiler::new(HELLO_JS);
        let code = generate_story_module(&compiler, HELLO_SOURCE, None).unwrap();
        assert!(code.contains("const StoryComponent = Hello;"));
        assert!(!code.contains("export default Hello;"));
    }

    #[test]
    fn test_bind_import_prepended() {
        let compiler = MockCompiler::new(HELLO_JS);
        let code = generate_story_module(&compiler, HELLO_SOURCE, None).unwrap();
        assert!(code.starts_with("import { bind as svelteBind } from \"svelte/internal\";\n"));
        // The compiled code follows the import untouched apart from the
        // export rebinding.
        assert!(code.contains("/* generated by the component compiler */"));
        assert!(code.contains("class Hello {"));
    }

    #[test]
    fn test_one_binding_per_declared_prop() {
        let compiler = MockCompiler::new(HELLO_JS);
        let code = generate_story_module(&compiler, HELLO_SOURCE, None).unwrap();
        assert_eq!(code.matches("svelteBind(component, \"name\"").count(), 1);
        assert!(code.contains("props[\"name\"] = value;"));
    }

    #[test]
    fn test_bindings_emitted_in_declaration_order() {
        let source = "<script>export let first = 1;\nexport let second = 2;</script>";
        let compiler = MockCompiler::new(HELLO_JS);
        let code = generate_story_module(&compiler, source, None).unwrap();
        let first = code.find("svelteBind(component, \"first\"").unwrap();
        let second = code.find("svelteBind(component, \"second\"").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_mount_instantiates_against_target() {
        let compiler = MockCompiler::new(HELLO_JS);
        let code = generate_story_module(&compiler, HELLO_SOURCE, None).unwrap();
        assert!(code.contains("export function mount(target, sync) {"));
        assert!(code.contains("const props = {};"));
        assert!(code.contains("const component = new StoryComponent({ target, props });"));
    }

    #[test]
    fn test_sync_stream_drives_component_updates() {
        let compiler = MockCompiler::new(HELLO_JS);
        let code = generate_story_module(&compiler, HELLO_SOURCE, None).unwrap();
        assert!(code.contains("const unsubscribe = sync(props).subscribe((newProps) => {"));
        assert!(code.contains("component.$set(newProps);"));
    }

    #[test]
    fn test_teardown_unsubscribes_before_destroy() {
        let compiler = MockCompiler::new(HELLO_JS);
        let code = generate_story_module(&compiler, HELLO_SOURCE, None).unwrap();
        let unsubscribe = code.rfind("unsubscribe();").unwrap();
        let destroy = code.rfind("component.$destroy();").unwrap();
        assert!(unsubscribe < destroy);
    }

    #[test]
    fn test_teardown_is_guarded_against_repeat_calls() {
        let compiler = MockCompiler::new(HELLO_JS);
        let code = generate_story_module(&compiler, HELLO_SOURCE, None).unwrap();
        assert!(code.contains("let destroyed = false;"));
        assert!(code.contains("if (destroyed) {"));
        assert!(code.contains("destroyed = true;"));
    }

    #[test]
    fn test_css_forced_to_injected() {
        let compiler = MockCompiler::new(HELLO_JS);
        let options = CompileOptions {
            filename: Some("Hello.svelte".to_string()),
            css: CssMode::External,
        };
        generate_story_module(&compiler, HELLO_SOURCE, Some(&options)).unwrap();
        let seen = compiler.seen_options.borrow().clone().unwrap();
        assert_eq!(seen.css, CssMode::Injected);
        assert_eq!(seen.filename.as_deref(), Some("Hello.svelte"));
    }

    #[test]
    fn test_component_without_props_gets_bare_mount() {
        let source = "<script>let internal = 0;</script>\n<p>{internal}</p>";
        let compiler = MockCompiler::new(HELLO_JS);
        let code = generate_story_module(&compiler, source, None).unwrap();
        assert!(!code.contains("svelteBind(component,"));
        assert!(code.contains("export function mount(target, sync) {"));
    }

    #[test]
    fn test_unmatched_export_shape_passes_through() {
        let output = CompiledOutput {
            ast: ComponentAst::default(),
            js: JsOutput {
                code: "module.exports = Hello;".to_string(),
            },
        };
        let code = generate_from_compiled(&output, &ExtractOptions::default());
        assert!(code.contains("module.exports = Hello;"));
        assert!(!code.contains("const StoryComponent ="));
        // Mount is still appended; the mismatch is a logged no-op.
        assert!(code.contains("export function mount(target, sync) {"));
    }

    #[test]
    fn test_compile_error_propagates_unchanged() {
        let options = CompileOptions {
            filename: Some("Broken.svelte".to_string()),
            ..Default::default()
        };
        let err = generate_story_module(&FailingCompiler, "whatever", Some(&options)).unwrap_err();
        assert_eq!(err.code, "parse-error");
        assert_eq!(err.filename.as_deref(), Some("Broken.svelte"));
    }

    #[test]
    fn test_syntax_error_from_front_end_propagates() {
        let compiler = MockCompiler::new(HELLO_JS);
        let err = generate_story_module(&compiler, "<script>export let = ;</script>", None)
            .unwrap_err();
        assert_eq!(err.code, "parse-error");
    }
}
