//! Error types for the rendering engine.
//!
//! This module provides [`EngineError`], the typed result of every parse,
//! compose, and render operation. It abstracts over the underlying template
//! engine's errors, providing a stable public API: callers match on the
//! variant to decide presentation (the engine itself never logs).

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all engine operations.
///
/// The variant tells the caller which phase failed:
///
/// - [`Parse`](Self::Parse): malformed template syntax, or an empty source set
/// - [`Io`](Self::Io): a template file could not be read
/// - [`Composition`](Self::Composition): a missing entry point or a reference
///   to a sub-template that no source defines
/// - [`Render`](Self::Render): execution failure — an undefined field in
///   strict mode, an unknown helper function, an arity mismatch, or a nested
///   evaluation error
///
/// Template errors are deterministic, so no variant is worth retrying.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Template syntax is invalid or the source set is unusable.
    #[error("parse error: {0}")]
    Parse(String),

    /// A template file does not exist or cannot be read.
    #[error("cannot read template {path}: {source}")]
    Io {
        /// Path of the file that failed to load.
        path: PathBuf,
        /// Underlying filesystem error.
        source: std::io::Error,
    },

    /// The entry template is absent, or a referenced sub-template is undefined.
    #[error("composition error: {0}")]
    Composition(String),

    /// Template execution failed.
    #[error("render error: {0}")]
    Render(String),
}

// Maps the backend's error kinds onto the engine's phases. An unresolved
// template reference surfaces during execution but is a composition defect,
// so `TemplateNotFound` maps there rather than to `Render`.
impl From<minijinja::Error> for EngineError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => EngineError::Composition(err.to_string()),
            ErrorKind::SyntaxError | ErrorKind::BadEscape => EngineError::Parse(err.to_string()),
            _ => EngineError::Render(err.to_string()),
        }
    }
}
