use std::path::{Path, PathBuf};
use std::sync::Arc;

use herald::{err, error};
use herald::config::Config;
use herald::error::{Error, Result, Chainable};
use herald::macros::MacroEnv;
use herald::templating::{Engine, EngineInit};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Markdown, rendered to HTML.
    Page,
    /// Anything else, copied as-is.
    Asset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doc {
    pub path: PathBuf,
    /// `path` relative to the docs directory.
    pub relative: PathBuf,
    pub kind: Kind,
}

impl Doc {
    fn new(docs_dir: &Path, relative: PathBuf) -> Self {
        const PAGE_EXTS: &[&str] = &["md", "mdown", "markdown"];

        let kind = match relative.extension().and_then(|e| e.to_str()) {
            Some(ext) if PAGE_EXTS.contains(&ext) => Kind::Page,
            _ => Kind::Asset,
        };

        Doc { path: docs_dir.join(&relative), relative, kind }
    }
}

#[derive(Debug)]
pub struct Quill {
    pub config: Config,
    pub engine: Arc<dyn Engine>,
    pub layout: bool,
}

impl Quill {
    pub fn new<E: EngineInit>(config: Config) -> Result<Self> {
        if !config.docs_dir.is_dir() {
            return err! {
                "docs_dir must point to an existing directory",
                "path" => config.docs_dir.display(),
            };
        }

        let macros = Arc::new(MacroEnv::new(&config));
        let templates = config.templates_dir.as_deref();
        let layout = templates.map_or(false, |dir| dir.join(crate::LAYOUT).is_file());
        let engine = Arc::new(E::init(templates, macros));
        Ok(Quill { config, engine, layout })
    }

    /// Every non-hidden file under the docs directory, in path order.
    pub fn discover(&self) -> Result<Vec<Doc>> {
        let root = &self.config.docs_dir;
        let walker = jwalk::WalkDir::new(root)
            .follow_links(true)
            .skip_hidden(true)
            .sort(true);

        let mut docs = vec![];
        for entry in walker {
            let entry = entry.map_err(Error::from_std).chain_with(|| error! {
                "failed to read docs directory",
                "docs_dir" => root.display(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            docs.push(Doc::new(root, relative));
        }

        tracing::debug!(
            pages = docs.iter().filter(|d| d.kind == Kind::Page).count(),
            assets = docs.iter().filter(|d| d.kind == Kind::Asset).count(),
            "discovered docs"
        );

        Ok(docs)
    }

    /// The page at `relative`, which must exist under the docs directory.
    pub fn doc(&self, relative: &Path) -> Result<Doc> {
        let doc = Doc::new(&self.config.docs_dir, relative.to_path_buf());
        match (doc.path.is_file(), doc.kind) {
            (true, Kind::Page) => Ok(doc),
            (false, _) => err! {
                "page does not exist",
                "path" => doc.path.display(),
            },
            (true, Kind::Asset) => err! {
                "not a markdown page",
                "path" => doc.path.display(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        let root = Path::new("/docs");
        assert_eq!(Doc::new(root, "a/index.md".into()).kind, Kind::Page);
        assert_eq!(Doc::new(root, "notes.markdown".into()).kind, Kind::Page);
        assert_eq!(Doc::new(root, "img/logo.png".into()).kind, Kind::Asset);
        assert_eq!(Doc::new(root, "Makefile".into()).kind, Kind::Asset);
        assert_eq!(Doc::new(root, "a/index.md".into()).path, Path::new("/docs/a/index.md"));
    }
}
