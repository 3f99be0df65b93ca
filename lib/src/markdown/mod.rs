//! Markdown to HTML, with text preprocessing plugins run first.

mod frontmatter;
mod templatize;

pub use frontmatter::FrontMatter;
pub use templatize::Templatize;

use std::borrow::Cow;

use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::error::{Chainable, Result};
use crate::page::Page;

pub trait Plugin {
    /// Transforms the raw page text before it is parsed as markdown.
    fn preprocess<'a>(&self, input: &'a str, page: &mut Page) -> Result<Cow<'a, str>>;
}

pub struct Markdown<'p> {
    options: Options,
    plugins: Vec<Box<dyn Plugin + 'p>>,
}

impl<'p> Markdown<'p> {
    pub fn new() -> Self {
        Markdown {
            options: Options::all()
                - Options::ENABLE_SMART_PUNCTUATION
                - Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
                - Options::ENABLE_PLUSES_DELIMITED_METADATA_BLOCKS,
            plugins: vec![],
        }
    }

    /// Appends `plugin`. Plugins run in the order they were added.
    pub fn plugin<P: Plugin + 'p>(mut self, plugin: P) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Runs the plugins over `input`, then renders the result to HTML.
    ///
    /// Sets `page.title` if unset: the front matter `title`, else the first
    /// level-one heading, else the file stem. Sets `page.content` to the HTML,
    /// which is also returned.
    pub fn run(&self, input: &str, page: &mut Page) -> Result<String> {
        let mut text = Cow::Borrowed(input);
        for plugin in &self.plugins {
            text = match text {
                Cow::Borrowed(s) => plugin.preprocess(s, page),
                Cow::Owned(s) => plugin.preprocess(&s, page).map(|o| Cow::Owned(o.into_owned())),
            }.chain(error!("markdown plugin failed", "page" => page.path.display()))?;
        }

        let mut heading: Option<String> = None;
        let mut in_title = false;
        let events = Parser::new_ext(&text, self.options).inspect(|event| match event {
            Event::Start(Tag::Heading { level: HeadingLevel::H1, .. }) if heading.is_none() => {
                in_title = true;
                heading = Some(String::new());
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => in_title = false,
            Event::Text(s) | Event::Code(s) if in_title => {
                if let Some(heading) = heading.as_mut() {
                    heading.push_str(s);
                }
            }
            _ => {}
        });

        let mut rendered = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut rendered, events);

        if page.title.is_none() {
            page.title = page.meta_title()
                .map(String::from)
                .or(heading.filter(|h| !h.is_empty()))
                .or_else(|| page.path.file_stem().map(|s| s.to_string_lossy().into_owned()));
        }

        page.content = Some(rendered.clone());
        Ok(rendered)
    }
}

impl Default for Markdown<'_> {
    fn default() -> Self {
        Self::new()
    }
}
