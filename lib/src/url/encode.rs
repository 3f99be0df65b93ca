use std::borrow::Cow;

/// Percent-encodes the UTF-8 bytes of `input` for use in a query component.
///
/// ASCII letters, digits and `_.-~` are kept, a space becomes `+` and every
/// other byte becomes `%XX` with uppercase hex digits.
///
/// ```rust
/// use herald::url::encode_plus;
///
/// assert_eq!(encode_plus("a b/c"), "a+b%2Fc");
/// assert_eq!(encode_plus("ünïcode"), "%C3%BCn%C3%AFcode");
/// ```
pub fn encode_plus(input: &str) -> String {
    // `%` is itself escaped, so `%20` in the output only ever stands for a space.
    match urlencoding::encode(input) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s.replace("%20", "+"),
    }
}

/// Reverses [`encode_plus()`]: `+` becomes a space and `%XX` sequences are
/// decoded. Malformed escapes are kept verbatim; invalid UTF-8 in the decoded
/// bytes is replaced with U+FFFD.
pub fn decode_plus(input: &str) -> String {
    let input = input.replace('+', " ");
    let bytes = urlencoding::decode_binary(input.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn encodes_like_a_form_query() {
        assert_eq!(encode_plus(""), "");
        assert_eq!(encode_plus("hello world"), "hello+world");
        assert_eq!(encode_plus("a+b=c&d"), "a%2Bb%3Dc%26d");
        assert_eq!(encode_plus("path/to/file.yaml"), "path%2Fto%2Ffile.yaml");
        assert_eq!(encode_plus("keep_-.~"), "keep_-.~");
        assert_eq!(encode_plus("100%"), "100%25");
        assert_eq!(encode_plus("*'()"), "%2A%27%28%29");
        assert_eq!(encode_plus("line\nbreak"), "line%0Abreak");
        assert_eq!(encode_plus("日本"), "%E6%97%A5%E6%9C%AC");
    }

    #[test]
    fn decode_inverts_encode() {
        let inputs = [
            "",
            "plain",
            "a b  c",
            "+already+plus+",
            "%41 is not decoded twice",
            "query?x=1&y=[2]",
            "tabs\tand\r\nnewlines",
            "emoji 🦀 and ünïcode",
            "{{ template }}",
        ];

        for input in inputs {
            assert_eq!(decode_plus(&encode_plus(input)), input, "input: {input:?}");
        }
    }

    #[test]
    fn reencoding_is_not_identity() {
        let once = encode_plus("a b%");
        let twice = encode_plus(&once);
        assert_eq!(once, "a+b%25");
        assert_eq!(twice, "a%2Bb%2525");
        assert_ne!(once, twice);
    }

    #[test]
    fn decode_keeps_malformed_escapes() {
        assert_eq!(decode_plus("100%"), "100%");
        assert_eq!(decode_plus("%zz%4"), "%zz%4");
        assert_eq!(decode_plus("%e2%9C%93"), "✓");
        assert_eq!(decode_plus("%FF"), "\u{FFFD}");
    }

    proptest! {
        #[test]
        fn decode_inverts_encode_for_any_string(input in any::<String>()) {
            prop_assert_eq!(decode_plus(&encode_plus(&input)), input);
        }

        #[test]
        fn encoded_output_is_query_safe(input in any::<String>()) {
            let encoded = encode_plus(&input);
            prop_assert!(encoded.bytes().all(|b| b.is_ascii_alphanumeric() || b"_.-~+%".contains(&b)));
            prop_assert_eq!(encoded.contains('+'), input.contains(' '));
        }
    }
}
