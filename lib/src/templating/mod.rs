use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::macros::MacroEnv;
use crate::page::Page;

pub mod minijinja;

pub trait EngineInit {
    type Engine: Engine + 'static;

    /// Builds an engine that loads named templates from `templates`, if any,
    /// with the documentation helpers of `macros` registered.
    fn init(templates: Option<&Path>, macros: Arc<MacroEnv>) -> Self::Engine;
}

/// Renders templates with a page as context. The context exposes `page`,
/// `title` and `content` alongside the engine's globals.
pub trait Engine: Send + Sync + Debug {
    /// Renders the template named `name` from the templates directory.
    fn render(&self, name: &str, page: &Page) -> Result<String>;

    /// Renders `template_str` itself. `name`, if given, is used in errors.
    fn render_str(&self, name: Option<&str>, template_str: &str, page: &Page) -> Result<String>;
}
