use std::borrow::Cow;

use crate::error::{Chainable, Result};
use crate::markdown::Plugin;
use crate::page::Page;

/// Moves a leading `+++`-delimited TOML block into `page.meta`.
#[derive(Default, Debug, Clone, Copy)]
pub struct FrontMatter;

impl Plugin for FrontMatter {
    fn preprocess<'a>(&self, input: &'a str, page: &mut Page) -> Result<Cow<'a, str>> {
        let Some(body) = input.strip_prefix("+++").and_then(strip_newline) else {
            return Ok(Cow::Borrowed(input));
        };

        let closing = body.match_indices("\n+++").find_map(|(i, delim)| {
            let content = strip_newline(&body[i + delim.len()..])?;
            let front_matter = &body[..i];
            Some((front_matter.strip_suffix('\r').unwrap_or(front_matter), content))
        });

        let Some((front_matter, content)) = closing else {
            return Ok(Cow::Borrowed(input));
        };

        let table: toml::Table = toml::from_str(front_matter).chain(error! {
            "invalid front matter",
            "page" => page.path.display(),
        })?;

        page.meta.extend(table);
        Ok(Cow::Borrowed(content))
    }
}

fn strip_newline(s: &str) -> Option<&str> {
    s.strip_prefix('\n').or_else(|| s.strip_prefix("\r\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_front_matter_into_meta() {
        let mut page = Page::new("index.md");
        let input = "+++\ntitle = \"Home\"\ntags = [\"a\", \"b\"]\n+++\n# Body\n";
        let rest = FrontMatter.preprocess(input, &mut page).unwrap();

        assert_eq!(rest, "# Body\n");
        assert_eq!(page.meta_title(), Some("Home"));
        assert_eq!(page.meta["tags"].as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn accepts_crlf_delimiters() {
        let mut page = Page::new("windows.md");
        let rest = FrontMatter.preprocess("+++\r\ntitle = \"T\"\r\n+++\r\nbody", &mut page).unwrap();
        assert_eq!(rest, "body");
        assert_eq!(page.meta_title(), Some("T"));

        let mut page = Page::default();
        let rest = FrontMatter.preprocess("+++\nweight = 2\n+++\r\n\r\n# Mixed\r\n", &mut page).unwrap();
        assert_eq!(rest, "\r\n# Mixed\r\n");
        assert_eq!(page.meta["weight"].as_integer(), Some(2));
    }

    #[test]
    fn leaves_other_input_alone() {
        let mut page = Page::default();
        for input in ["# No front matter\n", "+++\nunterminated = 1\n", "text\n+++\nx = 1\n+++\n"] {
            let rest = FrontMatter.preprocess(input, &mut page).unwrap();
            assert!(matches!(rest, Cow::Borrowed(s) if s == input));
        }

        assert!(page.meta.is_empty());
    }

    #[test]
    fn rejects_invalid_toml() {
        let mut page = Page::new("bad.md");
        let error = FrontMatter.preprocess("+++\ntitle = \n+++\nbody", &mut page).unwrap_err();
        assert_eq!(error.message(), "invalid front matter");
    }
}
