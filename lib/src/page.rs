use std::path::PathBuf;

use serde::Serialize;

/// A documentation page as seen by templates (`page.*`).
#[derive(Debug, Default, Clone, Serialize)]
pub struct Page {
    /// Source path relative to the docs directory.
    pub path: PathBuf,
    /// Front matter.
    pub meta: toml::Table,
    pub title: Option<String>,
    /// Rendered HTML, once available.
    pub content: Option<String>,
}

impl Page {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Page { path: path.into(), ..Page::default() }
    }

    /// The title from the front matter, if it has one.
    pub fn meta_title(&self) -> Option<&str> {
        self.meta.get("title").and_then(|v| v.as_str())
    }
}
