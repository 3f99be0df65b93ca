//! Named-placeholder string formatting.
//!
//! Templates use `{name}` placeholders and `{{`/`}}` for literal braces.
//! Positional placeholders, conversions (`{x!r}`), format specs (`{x:>8}`)
//! and attribute access (`{x.y}`) are rejected.

use crate::error::Result;

/// Substitutes every `{name}` in `template` with the value paired with `name`
/// in `args`. Entries of `args` that the template doesn't mention are ignored.
///
/// ```rust
/// use herald::format::format_named;
///
/// let url = format_named("https://host/{version}/{path}", &[
///     ("version", "v1.2.0"),
///     ("path", "docs/index.md"),
/// ]).unwrap();
///
/// assert_eq!(url, "https://host/v1.2.0/docs/index.md");
/// ```
pub fn format_named(template: &str, args: &[(&str, &str)]) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(i) = rest.find(['{', '}']) {
        output.push_str(&rest[..i]);
        let (brace, tail) = rest[i..].split_at(1);
        if tail.starts_with(brace) {
            output.push_str(brace);
            rest = &tail[1..];
            continue;
        }

        if brace == "}" {
            return err! {
                "single '}' encountered in format string",
                "template" => template,
                "offset" => template.len() - rest.len() + i,
            };
        }

        let end = tail.find('}').ok_or_else(|| error! {
            "expected '}' before end of string",
            "template" => template,
        })?;

        output.push_str(field(template, &tail[..end], args)?);
        rest = &tail[end + 1..];
    }

    output.push_str(rest);
    Ok(output)
}

fn field<'a>(template: &str, name: &str, args: &[(&str, &'a str)]) -> Result<&'a str> {
    if name.is_empty() || name.bytes().all(|b| b.is_ascii_digit()) {
        return err! {
            "positional placeholders are not supported",
            "template" => template,
            "placeholder" => format!("{{{name}}}"),
        };
    }

    if name.contains(['{', ':', '!', '.', '[']) {
        return err! {
            "placeholder must be a plain name",
            "template" => template,
            "placeholder" => format!("{{{name}}}"),
        };
    }

    args.iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
        .ok_or_else(|| error! {
            "unknown placeholder in format string",
            "template" => template,
            "placeholder" => format!("{{{name}}}"),
            "known placeholders" => args.iter()
                .map(|(key, _)| format!("{{{key}}}"))
                .collect::<Vec<_>>()
                .join(", "),
        })
}
