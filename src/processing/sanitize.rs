//! Input sanitation applied before ranking and chunking.
//!
//! The pipeline only ever sees text that has passed through [`sanitize`]: URLs stripped,
//! characters restricted to a small ASCII set, whitespace collapsed. The function is total
//! and idempotent.

use regex::Regex;
use std::sync::OnceLock;

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"http\S+").expect("URL pattern compiles"))
}

/// Strip URLs, drop characters outside `[a-zA-Z0-9.,!? ]`, and collapse whitespace.
pub fn sanitize(text: &str) -> String {
    let without_urls = url_pattern().replace_all(text, "");
    let filtered: String = without_urls
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | ',' | '!' | '?' | ' '))
        .collect();
    // Newlines and tabs were dropped by the filter above, so collapsing runs of spaces
    // and trimming the ends is all that remains.
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::sanitize;

    #[test]
    fn removes_urls_up_to_whitespace() {
        let input = "See https://example.org/page?id=1 for details.";
        assert_eq!(sanitize(input), "See for details.");
    }

    #[test]
    fn removes_url_tail_glued_to_a_word() {
        // The pattern starts at `http` even mid-token, mirroring `http\S+`.
        let input = "readhttp://x.org/path next";
        assert_eq!(sanitize(input), "read next");
    }

    #[test]
    fn drops_characters_outside_allowed_set() {
        let input = "Price: $100 (approx.) — fine, right?";
        assert_eq!(sanitize(input), "Price 100 approx. fine, right?");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        let input = "  a\t b \n  c  ";
        assert_eq!(sanitize(input), "a b c");
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "Visit http://a.b now!!",
            "plain text already",
            "  spaced \t out\nlines ",
            "",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn output_stays_within_allowed_set() {
        let input = "Mixed: émojis 🎉, quotes \"x\", and http://u.rl plus tabs\t!";
        let output = sanitize(input);
        assert!(
            output
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | ',' | '!' | '?' | ' '))
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("🎉🎉🎉"), "");
    }
}
