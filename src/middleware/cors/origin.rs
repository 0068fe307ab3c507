//! Origin canonicalization.
//!
//! Browsers send `Origin` without a trailing slash, but configured values are
//! typed by humans (`https://app.example.com/`, ` https://a.com `). Both sides
//! go through [`normalize`] before they are compared.

/// Canonicalize an origin string.
///
/// - `None` / empty → `""`
/// - surrounding whitespace trimmed, every trailing `/` removed
/// - no scheme/host/port validation
///
/// Whitespace exposed by stripping slashes is trimmed too, so
/// `normalize(normalize(x)) == normalize(x)` for every input.
pub fn normalize(origin: Option<&str>) -> String {
    match origin {
        Some(raw) => raw
            .trim_start()
            .trim_end_matches(|c: char| c == '/' || c.is_whitespace())
            .to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_and_empty_become_empty() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
        assert_eq!(normalize(Some("   ")), "");
        assert_eq!(normalize(Some(" /// ")), "");
    }

    #[test]
    fn strips_trailing_slashes_and_whitespace() {
        assert_eq!(normalize(Some("https://a.com///")), "https://a.com");
        assert_eq!(normalize(Some("  https://a.com/ ")), "https://a.com");
        assert_eq!(normalize(Some("https://a.com:8443")), "https://a.com:8443");
    }

    #[test]
    fn keeps_inner_content_verbatim() {
        assert_eq!(normalize(Some("HTTPS://A.com")), "HTTPS://A.com");
        assert_eq!(normalize(Some("not an origin")), "not an origin");
        assert_eq!(normalize(Some("https://a.com/path/")), "https://a.com/path");
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "",
            "https://a.com",
            "https://a.com/",
            " https://a.com/ / ",
            "a/ /",
            "///",
            "\thttps://b.com\n",
        ];
        for input in inputs {
            let once = normalize(Some(input));
            assert_eq!(normalize(Some(once.as_str())), once, "input: {input:?}");
        }
    }
}
