//! Text safety and normalization helpers.
//!
//! Everything that ends up inside a shell command or a URL path segment goes
//! through this module. The external site CLI derives URL slugs from page
//! titles, so titles are restricted to letters, digits, and single spaces;
//! generated prose is collapsed to one line and quote-escaped before being
//! interpolated into a double-quoted command argument.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Restricts a title to letters, digits, and single spaces.
///
/// The site CLI turns titles into URL path segments and most punctuation
/// breaks navigation. The same normalization is applied to parent-reference
/// lookups so generated cross-references always match. Idempotent.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    WHITESPACE_RUN.replace_all(kept.trim(), " ").into_owned()
}

/// Prepares generated prose for interpolation into a double-quoted shell
/// argument.
///
/// Collapses newlines and whitespace runs to single spaces (the target
/// command line is single-line) and escapes backslash, double quote, and `$`.
/// One convention for every generated argument; no handler quotes on its own.
pub fn escape_for_shell(text: &str) -> String {
    let single_line = WHITESPACE_RUN.replace_all(text.trim(), " ");
    let mut out = String::with_capacity(single_line.len());
    for c in single_line.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

/// Strips HTML tags and decodes the handful of entities the page bodies use.
pub fn strip_html(html: &str) -> String {
    let text = HTML_TAG.replace_all(html, " ");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Splits text into sentences on `.`, `!`, `?` boundaries.
///
/// Keeps the terminator attached; drops empty fragments. A trailing fragment
/// without a terminator is kept as its own sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let trimmed = current.trim();
            if !trimmed.is_empty() && trimmed.chars().any(|c| c.is_alphanumeric()) {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }
    let trimmed = current.trim();
    if !trimmed.is_empty() && trimmed.chars().any(|c| c.is_alphanumeric()) {
        sentences.push(trimmed.to_string());
    }
    sentences
}

/// Lowercase, hyphen-separated slug, matching the site CLI's slug rule.
pub fn slugify(title: &str) -> String {
    sanitize_title(title).to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sanitize_strips_punctuation() {
        assert_eq!(sanitize_title("Hello, World!"), "Hello World");
        assert_eq!(sanitize_title("C++ & Rust: a tale"), "C Rust a tale");
    }

    #[test]
    fn sanitize_collapses_whitespace() {
        assert_eq!(sanitize_title("  a \t b\n\nc  "), "a b c");
    }

    #[test]
    fn sanitize_keeps_digits() {
        assert_eq!(sanitize_title("Chapter 12 (draft)"), "Chapter 12 draft");
    }

    #[test]
    fn sanitize_empty_input() {
        assert_eq!(sanitize_title(""), "");
        assert_eq!(sanitize_title("!!!"), "");
    }

    #[test]
    fn escape_collapses_newlines() {
        assert_eq!(
            escape_for_shell("line one\nline two\n\nline three"),
            "line one line two line three"
        );
    }

    #[test]
    fn escape_quotes_and_dollars() {
        assert_eq!(escape_for_shell(r#"say "hi" for $5"#), r#"say \"hi\" for \$5"#);
        assert_eq!(escape_for_shell(r"a\b"), r"a\\b");
    }

    #[test]
    fn strip_html_removes_tags() {
        assert_eq!(
            strip_html("<p>Hello <b>world</b></p><p>Bye</p>"),
            "Hello world Bye"
        );
    }

    #[test]
    fn strip_html_decodes_entities() {
        assert_eq!(strip_html("fish &amp; chips&nbsp;now"), "fish & chips now");
    }

    #[test]
    fn split_sentences_basic() {
        let s = split_sentences("First. Second! Third? Fourth");
        assert_eq!(s, vec!["First.", "Second!", "Third?", "Fourth"]);
    }

    #[test]
    fn split_sentences_ignores_empty_fragments() {
        let s = split_sentences("One... Two.");
        assert_eq!(s, vec!["One.", "Two."]);
    }

    #[test]
    fn split_sentences_empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("My First Page!"), "my-first-page");
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(s in ".{0,200}") {
            let once = sanitize_title(&s);
            prop_assert_eq!(sanitize_title(&once), once);
        }

        #[test]
        fn sanitize_output_alphabet(s in ".{0,200}") {
            let out = sanitize_title(&s);
            prop_assert!(out.chars().all(|c| c.is_alphanumeric() || c == ' '));
            prop_assert!(!out.contains("  "));
            prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
        }

        #[test]
        fn escape_output_is_single_line(s in ".{0,200}") {
            let out = escape_for_shell(&s);
            prop_assert!(!out.contains('\n'));
            prop_assert!(!out.contains('\r'));
        }
    }
}
