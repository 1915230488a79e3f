//! Demo HTTP server for the `veneer-render` template engine.
//!
//! Startup order matters: configuration, then logging, then the
//! write-once function registry, then the listener. Everything request
//! scoped (template compilations, render contexts) is built inside the
//! handler and dropped with the response.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use rouille::Response;
use tracing::info;
use veneer_render::{Engine, FunctionRegistry};

mod config;
mod home;
mod pages;

fn main() -> anyhow::Result<()> {
    let cfg = config::Config::from_env();

    tracing_subscriber::fmt()
        .with_max_level(cfg.log.level)
        .init();

    info!(debug = cfg.server.debug, "debug mode");
    info!(dir = %cfg.server.template_dir.display(), "template directory");

    // Registered once before the listener starts; read-only afterwards.
    let registry = Arc::new(FunctionRegistry::with_defaults());
    let engine = Engine::new(registry);

    let app = pages::App::new(engine, cfg.server.template_dir.clone())
        .context("failed to compile startup templates")?;

    let addr = format!("0.0.0.0:{}", cfg.server.port);
    info!(%addr, "listening");

    // Thread-per-request; rouille recovers from handler panics with a 500.
    rouille::start_server(addr, move |request| {
        let start = Instant::now();
        let response = home::route(request)
            .or_else(|| pages::route(&app, request))
            .unwrap_or_else(|| Response::empty_404());
        info!(
            method = request.method(),
            url = %request.url(),
            status = response.status_code,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request"
        );
        response
    });
}
