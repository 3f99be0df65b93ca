use std::borrow::Cow;
use std::sync::Arc;

use crate::markdown::Plugin;
use crate::page::Page;
use crate::templating::Engine;
use crate::error::{Result, Chainable};

/// Expands template syntax in the page text before markdown parsing.
pub struct Templatize {
    engine: Arc<dyn Engine>,
}

impl Templatize {
    pub fn with(engine: Arc<dyn Engine>) -> Self {
        Self { engine }
    }
}

impl Plugin for Templatize {
    fn preprocess<'a>(&self, input: &'a str, page: &mut Page) -> Result<Cow<'a, str>> {
        if !crate::util::is_template(input) {
            return Ok(Cow::Borrowed(input));
        }

        let name = page.path.to_string_lossy();
        tracing::trace!(page = %name, "expanding page template");
        self.engine.render_str(Some(&name), input, page)
            .chain(error!("markdown templatization failed"))
            .map(Cow::Owned)
    }
}
