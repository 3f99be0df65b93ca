//! Template macros and a markdown pipeline for documentation sites.
//!
//! # Overview
//!
//! Documentation pages are markdown files that may contain template syntax.
//! Before a page is parsed as markdown, its text is rendered as a template in
//! an environment that carries a handful of documentation helpers:
//!
//!   * `version`, the configured version, with `dev` meaning `master`;
//!   * `raw_github_url(path)`, a link to the raw file at that version;
//!   * `import_file(path)`, the contents of another file in the docs;
//!   * `value | urlencode`, the value encoded for a URL query.
//!
//! The helpers live in [`macros::MacroEnv`], built from a [`config::Config`]
//! and registered into the engine by [`macros::MacroEnv::register()`].
//!
//! ## Rendering
//!
//! A page is typically rendered via the following set of operations:
//!
//! 1. Front matter (`+++` TOML) is moved into the page's metadata.
//! 2. The remaining text is rendered as a template, expanding the helpers.
//! 3. The result is rendered from markdown into HTML.
//! 4. The HTML is placed into a layout template, if there is one.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use herald::config::Config;
//! use herald::macros::MacroEnv;
//! use herald::markdown::{FrontMatter, Markdown, Templatize};
//! use herald::page::Page;
//! use herald::templating::{Engine, EngineInit};
//! use herald::templating::minijinja::MiniJinjaEngine;
//!
//! let config = Config::parse(r#"
//!     [extra]
//!     version = "dev"
//!     raw_url_tpl = "https://raw.githubusercontent.com/org/repo/{version}/{path}"
//! "#, "/site").unwrap();
//!
//! let macros = Arc::new(MacroEnv::new(&config));
//! let engine: Arc<dyn Engine> = Arc::new(MiniJinjaEngine::init(None, macros));
//!
//! let mut page = Page::new("install.md");
//! let html = Markdown::new()
//!     .plugin(FrontMatter)
//!     .plugin(Templatize::with(engine))
//!     .run("[manifest]({{ raw_github_url('deploy/all.yaml') }})", &mut page)
//!     .unwrap();
//!
//! assert_eq!(html, "<p><a href=\"https://raw.githubusercontent.com/org/repo/master/deploy/all.yaml\">manifest</a></p>\n");
//! ```

#[macro_use]
pub mod error;
pub mod util;
pub mod url;
pub mod format;
pub mod config;
pub mod page;
pub mod macros;
pub mod templating;
pub mod markdown;
