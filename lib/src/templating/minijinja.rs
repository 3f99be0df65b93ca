use std::path::Path;
use std::sync::Arc;

use minijinja::{context, path_loader, Environment};
use minijinja::value::Value;

use crate::error::Result;
use crate::macros::MacroEnv;
use crate::page::Page;
use crate::templating::{Engine, EngineInit};

#[derive(Debug)]
pub struct MiniJinjaEngine {
    env: Result<Environment<'static>>,
}

fn try_init(templates: Option<&Path>, macros: Arc<MacroEnv>) -> Result<Environment<'static>> {
    let mut env = Environment::new();
    if let Some(dir) = templates {
        if !dir.is_dir() {
            return err! {
                "templates directory does not exist",
                "path" => dir.display(),
            };
        }

        env.set_loader(path_loader(dir));
    }

    macros.register(&mut env);
    Ok(env)
}

fn page_context(page: &Page) -> Value {
    context! {
        page => Value::from_serialize(page),
        title => page.title.as_deref(),
        content => page.content.clone().map(Value::from_safe_string),
    }
}

impl EngineInit for MiniJinjaEngine {
    type Engine = Self;

    fn init(templates: Option<&Path>, macros: Arc<MacroEnv>) -> Self::Engine {
        MiniJinjaEngine { env: try_init(templates, macros) }
    }
}

impl Engine for MiniJinjaEngine {
    fn render(&self, name: &str, page: &Page) -> Result<String> {
        let env = self.env.as_ref().map_err(|e| e.clone())?;
        let template = env.get_template(name)?;
        Ok(template.render(page_context(page))?)
    }

    fn render_str(&self, name: Option<&str>, template_str: &str, page: &Page) -> Result<String> {
        let env = self.env.as_ref().map_err(|e| e.clone())?;
        let context = page_context(page);
        let string = match name {
            Some(name) => env.render_named_str(name, template_str, context)?,
            None => env.render_str(template_str, context)?,
        };

        Ok(string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn engine(docs: &Path, templates: Option<&Path>) -> MiniJinjaEngine {
        let config = Config::parse(&format!(r#"
            docs_dir = "{}"
            site_name = "Hermes"

            [extra]
            version = "v0.9.0"
            raw_url_tpl = "https://raw.example.com/{{version}}/{{path}}"
        "#, docs.display()), "").unwrap();

        MiniJinjaEngine::init(templates, Arc::new(MacroEnv::new(&config)))
    }

    #[test]
    fn renders_inline_templates_with_page_context() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path(), None);
        let mut page = Page::new("guide/setup.md");
        page.meta.insert("owner".into(), "platform".into());
        page.title = Some("Setup".into());

        let out = engine.render_str(
            Some("guide/setup.md"),
            "{{ title }} / {{ page.meta.owner }} / {{ page.path }} / {{ config.site_name }} @ {{ version }}",
            &page,
        ).unwrap();

        assert_eq!(out, "Setup / platform / guide/setup.md / Hermes @ v0.9.0");
        assert_eq!(
            engine.render_str(None, "{{ raw_github_url('x.yaml') }}", &page).unwrap(),
            "https://raw.example.com/v0.9.0/x.yaml"
        );
    }

    #[test]
    fn layouts_do_not_escape_content() {
        let docs = tempfile::tempdir().unwrap();
        let templates = tempfile::tempdir().unwrap();
        std::fs::write(
            templates.path().join("page.html"),
            "<title>{{ title }}</title><main>{{ content }}</main>",
        ).unwrap();

        let engine = engine(docs.path(), Some(templates.path()));
        let mut page = Page::new("index.md");
        page.title = Some("A & B".into());
        page.content = Some("<p>hi</p>".into());

        let out = engine.render("page.html", &page).unwrap();
        assert_eq!(out, "<title>A &amp; B</title><main><p>hi</p></main>");
    }

    #[test]
    fn missing_templates_dir_is_reported_on_use() {
        let docs = tempfile::tempdir().unwrap();
        let missing = docs.path().join("no-such-dir");
        let engine = engine(docs.path(), Some(&missing));

        let error = engine.render_str(None, "x", &Page::default()).unwrap_err();
        assert_eq!(error.message(), "templates directory does not exist");
    }

    #[test]
    fn only_documentation_helpers_are_installed() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path(), None);
        let error = engine.render_str(None, "{{ 'a-b' | deslug }}", &Page::default()).unwrap_err();
        assert!(error.to_string().contains("unknown filter"));
        assert_eq!(engine.render_str(None, "{{ 'a b' | urlencode }}", &Page::default()).unwrap(), "a+b");
    }
}
