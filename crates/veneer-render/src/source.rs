//! Template input descriptors.
//!
//! A [`TemplateSource`] is the raw input handed to the engine: either an
//! inline string with an explicit name, or an ordered set of file paths.
//! Sources are immutable once supplied; the engine reads file contents at
//! parse time and never writes them.

use std::path::{Path, PathBuf};

use crate::error::EngineError;

/// Raw template input, inline or file-based.
///
/// File-based templates are addressed by their file stem: parsing
/// `layouts/base.html` registers a template named `"base"`. Inline
/// templates carry their name explicitly.
///
/// # Example
///
/// ```rust
/// use veneer_render::TemplateSource;
///
/// let inline = TemplateSource::inline("greeting", "Hello, {{ name }}!");
/// let files = TemplateSource::files(["layouts/base.html", "pages/about.html"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A named template supplied as a string.
    Inline {
        /// Name the template is registered and rendered under.
        name: String,
        /// Template body.
        source: String,
    },

    /// One or more template files, parsed into a shared namespace in order.
    Files(Vec<PathBuf>),
}

impl TemplateSource {
    /// Creates an inline source with the given registration name.
    pub fn inline(name: impl Into<String>, source: impl Into<String>) -> Self {
        TemplateSource::Inline {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Creates a source for a single template file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        TemplateSource::Files(vec![path.into()])
    }

    /// Creates a source for an ordered set of template files.
    ///
    /// All files end up in one namespace, so any file may reference
    /// templates defined by any other regardless of order.
    pub fn files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        TemplateSource::Files(paths.into_iter().map(Into::into).collect())
    }

    /// Derives the registration name for a template file (its stem).
    pub(crate) fn template_name(path: &Path) -> Result<String, EngineError> {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                EngineError::Parse(format!(
                    "cannot derive a template name from path {}",
                    path.display()
                ))
            })
    }
}
