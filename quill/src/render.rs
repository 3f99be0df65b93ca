use std::fs;
use std::path::Path;

use rayon::prelude::*;

use herald::error;
use herald::error::{Result, Chainable};
use herald::markdown::{FrontMatter, Markdown, Templatize};
use herald::page::Page;

use crate::discover::{Doc, Kind, Quill};

impl Quill {
    /// Renders every page and copies every asset in `docs` into `output`.
    pub fn render_site(&self, docs: &[Doc], output: &Path) -> Result<()> {
        docs.par_iter().map(|doc| -> Result<()> {
            let (target, contents) = match doc.kind {
                Kind::Page => {
                    let html = self.render_page(doc)?;
                    (output.join(doc.relative.with_extension("html")), html.into_bytes())
                }
                Kind::Asset => {
                    let bytes = fs::read(&doc.path).chain_with(|| error! {
                        "failed to read asset",
                        "path" => doc.path.display(),
                    })?;

                    (output.join(&doc.relative), bytes)
                }
            };

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }

            tracing::debug!(source = %doc.relative.display(), target = %target.display(), "writing");
            fs::write(&target, contents).chain_with(|| error! {
                "failed to write output file",
                "path" => target.display(),
            })
        }).collect()
    }

    /// Renders a single markdown page to HTML, wrapped in the layout if the
    /// templates directory has one.
    pub fn render_page(&self, doc: &Doc) -> Result<String> {
        let input = fs::read_to_string(&doc.path).chain_with(|| error! {
            "failed to read page",
            "path" => doc.path.display(),
        })?;

        let mut page = Page::new(&doc.relative);
        let html = Markdown::new()
            .plugin(FrontMatter)
            .plugin(Templatize::with(self.engine.clone()))
            .run(&input, &mut page)
            .chain_with(|| error! {
                "failed to render page",
                "path" => doc.relative.display(),
            })?;

        if !self.layout {
            return Ok(html);
        }

        self.engine.render(crate::LAYOUT, &page).chain_with(|| error! {
            "failed to render page layout",
            "path" => doc.relative.display(),
            "template used" => crate::LAYOUT,
        })
    }
}
