//! Parse and compose entry points.
//!
//! The [`Engine`] carries the configuration every compilation shares: the
//! helper [`FunctionRegistry`](crate::FunctionRegistry) and the field
//! resolution mode. It is cheap to share behind the server's handler and
//! safe to use from concurrent requests — each [`parse`](Engine::parse) or
//! [`compose`](Engine::compose) call builds a fresh, request-local
//! [`CompiledTemplate`].
//!
//! The engine keeps no template cache. Callers that want reuse hold on to
//! the returned `CompiledTemplate` (it is `Send + Sync`); everyone else
//! re-parses per request.

use std::fs;
use std::sync::Arc;

use minijinja::value::ValueKind;
use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};

use crate::compiled::CompiledTemplate;
use crate::error::EngineError;
use crate::functions::FunctionRegistry;
use crate::source::TemplateSource;

/// How field references that are absent from the context behave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldResolution {
    /// A missing field renders as empty output. This is the default,
    /// matching permissive template semantics.
    #[default]
    Permissive,

    /// A missing field fails the render with [`EngineError::Render`].
    Strict,
}

/// Compiles template sources into executable form.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use veneer_render::{Engine, FunctionRegistry, RenderContext, TemplateSource};
///
/// let engine = Engine::new(Arc::new(FunctionRegistry::with_defaults()));
/// let tmpl = engine
///     .parse(&TemplateSource::inline("index", "{{ Count }}"))
///     .unwrap();
/// let out = tmpl
///     .render("index", &RenderContext::new().set("Count", 1))
///     .unwrap();
/// assert_eq!(out, "1");
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Arc<FunctionRegistry>,
    fields: FieldResolution,
}

impl Engine {
    /// Creates an engine with permissive field resolution.
    pub fn new(registry: Arc<FunctionRegistry>) -> Self {
        Self::with_field_resolution(registry, FieldResolution::Permissive)
    }

    /// Creates an engine with an explicit field resolution mode.
    pub fn with_field_resolution(
        registry: Arc<FunctionRegistry>,
        fields: FieldResolution,
    ) -> Self {
        Self { registry, fields }
    }

    /// The configured field resolution mode.
    pub fn field_resolution(&self) -> FieldResolution {
        self.fields
    }

    /// Compiles a single source into a [`CompiledTemplate`].
    ///
    /// An inline source registers one template under its given name. A file
    /// source registers one template per file, named by file stem, all in a
    /// shared namespace with mutual visibility — later files may reference
    /// templates from earlier files and vice versa.
    ///
    /// Helper function references are resolved at render time, not here;
    /// only syntax is checked during compilation.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Parse`] on invalid syntax or an empty file set
    /// - [`EngineError::Io`] when a file does not exist or cannot be read
    pub fn parse(&self, source: &TemplateSource) -> Result<CompiledTemplate, EngineError> {
        let mut env = self.environment();
        let mut names = Vec::new();
        add_source(&mut env, source, &mut names)?;
        Ok(CompiledTemplate::new(env, names, None))
    }

    /// Compiles several sources into one [`CompiledTemplate`] whose
    /// execution starts at `entry`.
    ///
    /// This is the layout path: one source supplies the base template with
    /// its named slots (`{% block %}`s), the others supply content templates
    /// that fill them (via `{% extends %}`). Definition order does not
    /// matter; the sources only have to define `entry` between them.
    ///
    /// A slot or layout reference that no source defines is reported when
    /// the template is rendered, as [`EngineError::Composition`] — never as
    /// a silently blank section.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Composition`] when no source defines `entry`,
    ///   or when no sources are supplied at all
    /// - any [`Engine::parse`] error for the individual sources
    pub fn compose(
        &self,
        sources: &[TemplateSource],
        entry: &str,
    ) -> Result<CompiledTemplate, EngineError> {
        if sources.is_empty() {
            return Err(EngineError::Composition(format!(
                "no sources supplied for entry template {entry:?}"
            )));
        }

        let mut env = self.environment();
        let mut names = Vec::new();
        for source in sources {
            add_source(&mut env, source, &mut names)?;
        }

        if !names.iter().any(|name| name == entry) {
            return Err(EngineError::Composition(format!(
                "entry template {entry:?} is not defined by any source (have: {})",
                names.join(", ")
            )));
        }

        Ok(CompiledTemplate::new(env, names, Some(entry.to_string())))
    }

    /// Builds a fresh environment carrying the engine's configuration.
    fn environment(&self) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        // A template's final newline is part of its literal text.
        env.set_keep_trailing_newline(true);
        // Booleans stringify as `true`/`false`.
        env.set_formatter(|out, state, value| {
            if value.kind() == ValueKind::Bool {
                let text = if value.is_true() { "true" } else { "false" };
                return minijinja::escape_formatter(out, state, &Value::from(text));
            }
            minijinja::escape_formatter(out, state, value)
        });
        env.set_undefined_behavior(match self.fields {
            FieldResolution::Permissive => UndefinedBehavior::Lenient,
            FieldResolution::Strict => UndefinedBehavior::Strict,
        });
        self.registry.install(&mut env);
        env
    }
}

/// Registers every template a source defines into `env`, appending the
/// registered names to `names`.
fn add_source(
    env: &mut Environment<'static>,
    source: &TemplateSource,
    names: &mut Vec<String>,
) -> Result<(), EngineError> {
    match source {
        TemplateSource::Inline { name, source } => {
            env.add_template_owned(name.clone(), source.clone())?;
            names.push(name.clone());
        }
        TemplateSource::Files(paths) => {
            if paths.is_empty() {
                return Err(EngineError::Parse("empty template file set".to_string()));
            }
            for path in paths {
                let name = TemplateSource::template_name(path)?;
                let body = fs::read_to_string(path).map_err(|source| EngineError::Io {
                    path: path.clone(),
                    source,
                })?;
                env.add_template_owned(name.clone(), body)?;
                names.push(name);
            }
        }
    }
    Ok(())
}
