//! Template demo endpoints: the HTTP adapter around the rendering engine.
//!
//! Each handler builds a request-local context, invokes the engine, and
//! maps the result onto an HTTP response: 200 on success, 400 when an
//! inline template source fails to parse, 500 for composition or file
//! errors. The engine never logs; failures are logged here.

use std::path::PathBuf;

use rouille::{Request, Response};
use serde::Serialize;
use tracing::error;
use veneer_render::{
    CompiledTemplate, Engine, EngineError, RenderContext, TemplateSource, TEXT_HTML,
};

/// Shared, read-only state for the template routes.
///
/// `cached_page` is the one explicitly cached compilation: it is built
/// once at startup and rendered per request from the `/template/engine`
/// route. Every other route re-parses its sources per request.
pub struct App {
    engine: Engine,
    template_dir: PathBuf,
    cached_page: CompiledTemplate,
}

impl App {
    /// Builds the shared state, compiling the cached page up front.
    pub fn new(engine: Engine, template_dir: PathBuf) -> Result<Self, EngineError> {
        let cached_page = engine.parse(&TemplateSource::file(template_dir.join("page.html")))?;
        Ok(Self {
            engine,
            template_dir,
            cached_page,
        })
    }

    fn template(&self, relative: &str) -> TemplateSource {
        TemplateSource::file(self.template_dir.join(relative))
    }
}

#[derive(Serialize)]
struct User {
    id: u32,
    name: &'static str,
}

/// Routes `/template` requests. Returns `None` when the request is for
/// another module.
pub fn route(app: &App, request: &Request) -> Option<Response> {
    if request.method() != "GET" {
        return None;
    }

    let response = match request.url().as_str() {
        "/template" | "/template/" => inline_index(app),
        "/template/file" => from_file(app),
        "/template/engine" => with_cached_engine(app),
        "/template/ifelse" => if_else(app),
        "/template/range" => range_demo(app),
        "/template/funcs" => funcs_demo(app),
        "/template/compose" => compose(app, "compose/home.html", "home", home_context()),
        "/template/compose/about" => compose(app, "compose/about.html", "about", about_context()),
        _ => return None,
    };
    Some(response)
}

/// Parses an inline template per request and substitutes a single field.
fn inline_index(app: &App) -> Response {
    let source = TemplateSource::inline("index", "{{ Count }}");
    let ctx = RenderContext::new().set("Count", 1);
    respond(
        app.engine
            .parse(&source)
            .and_then(|tmpl| tmpl.render("index", &ctx)),
        SourceKind::Inline,
    )
}

/// Re-parses `page.html` from disk per request.
fn from_file(app: &App) -> Response {
    let ctx = RenderContext::new().set("Count", 5);
    respond(
        app.engine
            .parse(&app.template("page.html"))
            .and_then(|tmpl| tmpl.render("page", &ctx)),
        SourceKind::File,
    )
}

/// Renders the startup-compiled handle: the opt-in caching path.
fn with_cached_engine(app: &App) -> Response {
    let ctx = RenderContext::new().set("Count", 5);
    respond(app.cached_page.render("page", &ctx), SourceKind::File)
}

fn if_else(app: &App) -> Response {
    let ctx = RenderContext::new()
        .set("IsAdmin", true)
        .set("IsLoggedIn", true)
        .set("Username", "John")
        .set("Count", 7)
        .set("Status", "active")
        .set("IsModerator", false)
        .set("IsBlocked", false);
    respond(
        app.engine
            .parse(&app.template("ifelse.html"))
            .and_then(|tmpl| tmpl.render("ifelse", &ctx)),
        SourceKind::File,
    )
}

fn range_demo(app: &App) -> Response {
    let users = vec![
        User { id: 1, name: "Anton" },
        User { id: 2, name: "Vasia" },
        User { id: 3, name: "Maria" },
    ];

    let result = RenderContext::new()
        .set("Names", vec!["Anton", "Vasia", "Maria"])
        .set("Empty", Vec::<String>::new())
        .try_set("Users", &users)
        .and_then(|ctx| {
            app.engine
                .parse(&app.template("range.html"))
                .and_then(|tmpl| tmpl.render("range", &ctx))
        });
    respond(result, SourceKind::File)
}

fn funcs_demo(app: &App) -> Response {
    let ctx = RenderContext::new()
        .set("Username", "John")
        .set("Age", 25)
        .set("Items", vec!["apple", "banana", "cherry"])
        .set("LowerText", "hello world");
    respond(
        app.engine
            .parse(&app.template("funcs.html"))
            .and_then(|tmpl| tmpl.render("funcs", &ctx)),
        SourceKind::File,
    )
}

/// Composes the base layout with a page content template and renders
/// from the page entry.
fn compose(app: &App, page: &str, entry: &str, ctx: RenderContext) -> Response {
    let sources = [app.template("layouts/base.html"), app.template(page)];
    respond(
        app.engine
            .compose(&sources, entry)
            .and_then(|tmpl| tmpl.render_entry(&ctx)),
        SourceKind::File,
    )
}

fn home_context() -> RenderContext {
    RenderContext::new().set("Username", "John")
}

fn about_context() -> RenderContext {
    RenderContext::new().set("Company", "Go Corp")
}

/// Where the template source came from, for status code selection.
#[derive(Clone, Copy)]
enum SourceKind {
    Inline,
    File,
}

/// Maps an engine result onto an HTTP response.
fn respond(result: Result<String, EngineError>, kind: SourceKind) -> Response {
    match result {
        Ok(body) => Response::from_data(TEXT_HTML, body.into_bytes()),
        Err(err) => {
            error!(%err, "render failed");
            let status = match (&err, kind) {
                (EngineError::Parse(_), SourceKind::Inline) => 400,
                _ => 500,
            };
            Response::text(err.to_string()).with_status_code(status)
        }
    }
}
