//! Compiled templates and rendering.

use minijinja::{Environment, Value};

use crate::context::RenderContext;
use crate::error::EngineError;

/// Content type for rendered output, for the HTTP adapter to attach to its
/// response.
pub const TEXT_HTML: &str = "text/html; charset=utf-8";

/// The parsed, executable form of one or more named template fragments.
///
/// A compiled template owns its own environment: nothing is shared with
/// other compilations, so request-local instances never observe each
/// other's state. The type is `Send + Sync` and rendering takes `&self`,
/// which makes caller-side caching an explicit opt-in — keep the handle
/// (e.g. behind an `Arc`) and render it from any number of threads, or drop
/// it at the end of the request like the engine's default usage expects.
///
/// Output is HTML with auto-escaping applied to substituted values.
/// Stringification follows the backend's display rules: integers render
/// without decoration (`1`), floats in their shortest form, strings
/// verbatim apart from HTML escaping, booleans as `true`/`false`.
pub struct CompiledTemplate {
    env: Environment<'static>,
    names: Vec<String>,
    entry: Option<String>,
}

impl CompiledTemplate {
    pub(crate) fn new(env: Environment<'static>, names: Vec<String>, entry: Option<String>) -> Self {
        Self { env, names, entry }
    }

    /// Names of every template fragment in this compilation, in
    /// registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Whether a fragment with the given name exists.
    pub fn has_template(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// The entry point set by composition, if any.
    pub fn entry(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    /// Evaluates the named fragment against `ctx` and returns the HTML.
    ///
    /// The output is built in a private buffer and only returned on
    /// success; a failed render never exposes partial output. The context
    /// is borrowed and never mutated, so it can be reused across renders.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Composition`] when `entry` (or a sub-template it
    ///   references) is not defined
    /// - [`EngineError::Render`] on execution failure: a missing field in
    ///   strict mode, an unknown helper function, or an arity mismatch
    pub fn render(&self, entry: &str, ctx: &RenderContext) -> Result<String, EngineError> {
        let template = self.env.get_template(entry)?;
        let output = template.render(Value::from_serialize(ctx))?;
        Ok(output)
    }

    /// Renders starting at the entry point recorded by
    /// [`Engine::compose`](crate::Engine::compose).
    ///
    /// # Errors
    ///
    /// [`EngineError::Composition`] when this compilation has no entry
    /// point (it came from `parse`, not `compose`), plus any
    /// [`render`](Self::render) error.
    pub fn render_entry(&self, ctx: &RenderContext) -> Result<String, EngineError> {
        let entry = self.entry.as_deref().ok_or_else(|| {
            EngineError::Composition(
                "no entry template recorded; render by name instead".to_string(),
            )
        })?;
        self.render(entry, ctx)
    }
}

impl std::fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledTemplate")
            .field("names", &self.names)
            .field("entry", &self.entry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::functions::FunctionRegistry;
    use crate::source::TemplateSource;
    use std::sync::Arc;

    fn compile(name: &str, source: &str) -> CompiledTemplate {
        Engine::new(Arc::new(FunctionRegistry::with_defaults()))
            .parse(&TemplateSource::inline(name, source))
            .unwrap()
    }

    #[test]
    fn test_render_static_text_is_verbatim() {
        let tmpl = compile("static", "<p>no fields here</p>");
        let out = tmpl.render("static", &RenderContext::new()).unwrap();
        assert_eq!(out, "<p>no fields here</p>");
    }

    #[test]
    fn test_render_unknown_entry_is_composition_error() {
        let tmpl = compile("index", "hi");
        let result = tmpl.render("other", &RenderContext::new());
        assert!(matches!(result, Err(EngineError::Composition(_))));
    }

    #[test]
    fn test_render_entry_without_entry() {
        let tmpl = compile("index", "hi");
        let result = tmpl.render_entry(&RenderContext::new());
        assert!(matches!(result, Err(EngineError::Composition(_))));
    }

    #[test]
    fn test_render_unknown_function() {
        let tmpl = compile("index", "{{ shout(Name) }}");
        let result = tmpl.render("index", &RenderContext::new().set("Name", "x"));
        assert!(matches!(result, Err(EngineError::Render(_))));
    }

    #[test]
    fn test_render_arity_mismatch() {
        let tmpl = compile("index", "{{ add(1, 2, 3) }}");
        let result = tmpl.render("index", &RenderContext::new());
        match result {
            Err(EngineError::Render(msg)) => assert!(msg.contains("expects 2 argument(s)")),
            other => panic!("expected a render error, got {other:?}"),
        }
    }

    #[test]
    fn test_html_escaping_applied_to_values() {
        let tmpl = compile("index", "{{ Snippet }}");
        let out = tmpl
            .render("index", &RenderContext::new().set("Snippet", "<b>bold</b>"))
            .unwrap();
        assert!(out.contains("&lt;b&gt;"));
        assert!(!out.contains("<b>"));
    }

    #[test]
    fn test_context_reusable_after_render() {
        let tmpl = compile("index", "{{ Count }}");
        let ctx = RenderContext::new().set("Count", 3);
        assert_eq!(tmpl.render("index", &ctx).unwrap(), "3");
        assert_eq!(tmpl.render("index", &ctx).unwrap(), "3");
        assert_eq!(ctx.get("Count"), Some(&serde_json::json!(3)));
    }
}
