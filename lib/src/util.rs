/// Returns `true` if `input` is likely to contain a template.
pub fn is_template(input: &str) -> bool {
    let mut slice = input.as_bytes();
    while let Some(i) = memchr::memchr(b'{', slice) {
        match slice.get(i + 1) {
            Some(b'{') | Some(b'%') => return true,
            Some(_) => slice = &slice[(i + 1)..],
            None => return false,
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::is_template;

    #[test]
    fn detects_template_syntax() {
        assert!(is_template("{{ version }}"));
        assert!(is_template("text {% if x %}y{% endif %}"));
        assert!(is_template("{ {{x}}"));
        assert!(!is_template("plain { braces } and {x}"));
        assert!(!is_template("trailing {"));
        assert!(!is_template(""));
    }
}
