//! # Veneer Render - HTML Template Composition & Rendering
//!
//! `veneer-render` compiles named template fragments, binds a context of
//! values to them, resolves control constructs (conditionals, iteration,
//! helper function calls), composes base layouts with page content blocks,
//! and produces HTML output.
//!
//! ## Core Concepts
//!
//! - [`TemplateSource`]: raw input, an inline string or a set of files
//! - [`Engine`]: compiles sources; carries the helper registry and the
//!   field resolution mode
//! - [`CompiledTemplate`]: the executable form; request-local unless the
//!   caller explicitly keeps it
//! - [`RenderContext`]: the per-request data bound to field references
//! - [`FunctionRegistry`]: write-once table of helpers callable from
//!   template bodies
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use veneer_render::{Engine, FunctionRegistry, RenderContext, TemplateSource};
//!
//! let engine = Engine::new(Arc::new(FunctionRegistry::with_defaults()));
//!
//! let tmpl = engine
//!     .parse(&TemplateSource::inline("hello", "Hello, {{ name }}!"))
//!     .unwrap();
//! let out = tmpl
//!     .render("hello", &RenderContext::new().set("name", "World"))
//!     .unwrap();
//! assert_eq!(out, "Hello, World!");
//! ```
//!
//! ## Layout Composition
//!
//! A layout defines named slots as blocks; content templates fill them via
//! `{% extends %}`. [`Engine::compose`] parses every source into one
//! namespace and pins the execution entry point:
//!
//! ```rust
//! use std::sync::Arc;
//! use veneer_render::{Engine, FunctionRegistry, RenderContext, TemplateSource};
//!
//! let engine = Engine::new(Arc::new(FunctionRegistry::new()));
//! let sources = [
//!     TemplateSource::inline(
//!         "base",
//!         "<main>{% block content %}{% endblock %}</main>",
//!     ),
//!     TemplateSource::inline(
//!         "about",
//!         "{% extends \"base\" %}{% block content %}<p>{{ Company }}</p>{% endblock %}",
//!     ),
//! ];
//!
//! let tmpl = engine.compose(&sources, "about").unwrap();
//! let out = tmpl
//!     .render_entry(&RenderContext::new().set("Company", "Go Corp"))
//!     .unwrap();
//! assert_eq!(out, "<main><p>Go Corp</p></main>");
//! ```
//!
//! ## Semantics
//!
//! - **Field access** is permissive by default (a missing field renders as
//!   empty); [`FieldResolution::Strict`] turns a missing field into a
//!   [`EngineError::Render`].
//! - **Truthiness** for conditionals: `false`, `0`, `""`, an empty
//!   sequence, and a missing field are false; everything else is true.
//! - **Iteration** renders the loop body once per element, in sequence
//!   order; an empty sequence renders zero times.
//! - **Errors** are typed ([`EngineError`]) and propagate synchronously;
//!   the engine never logs, and a failed render never exposes partial
//!   output.
//! - **Caching** is opt-in: the engine holds no cache, and re-parsing per
//!   request is the default usage. A caller that wants reuse keeps the
//!   `CompiledTemplate` handle, which is `Send + Sync`.

mod compiled;
mod context;
mod engine;
mod error;
mod functions;
mod source;

pub use compiled::{CompiledTemplate, TEXT_HTML};
pub use context::RenderContext;
pub use engine::{Engine, FieldResolution};
pub use error::EngineError;
pub use functions::FunctionRegistry;
pub use source::TemplateSource;
