//! Parameter extraction from raw request text.
//!
//! Staged regex cascades, most specific phrasing first. Every function
//! returns `Option`; a missing parameter is a normal conversational outcome
//! (the handler asks for it), never an error.

use once_cell::sync::Lazy;
use regex::Regex;

use super::text::sanitize_title;

/// Per-intent bag of optional extracted strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedParameters {
    pub site_name: Option<String>,
    pub page_title: Option<String>,
    pub parent_page_title: Option<String>,
    pub topic: Option<String>,
    pub domain: Option<String>,
    pub source_url: Option<String>,
    pub new_site_name: Option<String>,
}

static P_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)"|'([^']+)'"#).expect("valid regex"));
static P_CALLED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:called|named)\s+(?:"([^"]+)"|'([^']+)'|([A-Za-z0-9_-]+))"#)
        .expect("valid regex")
});
static P_TITLED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)\b(?:page|article|section|slidedeck|slide deck|presentation|deck)\s+(?:called|named|titled)\s+(?:"([^"]+)"|'([^']+)'|([A-Za-z0-9][A-Za-z0-9 _-]*))"#,
    )
    .expect("valid regex")
});
static P_ABOUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\babout\s+(.+)$").expect("valid regex"));
static P_UNDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bunder\s+(?:the\s+)?(.+?)(?:\s+page)?\s*$").expect("valid regex")
});
static P_CHILD_OF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bas\s+a\s+(?:child|sub-?page)\s+of\s+(?:the\s+)?(.+?)(?:\s+page)?\s*$")
        .expect("valid regex")
});
static P_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s"']+"#).expect("valid regex"));
static P_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:domain|at)\s+([a-z0-9][a-z0-9-]*(?:\.[a-z0-9-]+)+)").expect("valid regex")
});
static P_TARGET_PAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:to|on|onto|into)\s+(?:the\s+)?(?:"([^"]+)"|'([^']+)'|([A-Za-z0-9][A-Za-z0-9 _-]*?))\s+page\b"#)
        .expect("valid regex")
});
static P_CUSTOMIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:customi[sz]e|adapt|personalize|tailor)\s+(?:the\s+)?(.+?)(?:\s+page)?\s+for\s+(.+)$",
    )
    .expect("valid regex")
});
static P_PAGES_CALLED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bpages\s+(?:called|named|titled)\s+(.+)$").expect("valid regex")
});
static P_PAGES_ABOUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bpages\s+(?:about|on|covering)\s+(.+)$").expect("valid regex")
});

/// Words that end a free-running capture ("Intro about history under Home").
const CLAUSE_BREAKS: &[&str] = &[" about ", " under ", " with ", " as a ", " using "];

fn cut_at_clause(text: &str) -> &str {
    // ASCII lowering keeps byte offsets aligned with the original text.
    let lc = text.to_ascii_lowercase();
    let mut end = text.len();
    for brk in CLAUSE_BREAKS {
        if let Some(pos) = lc.find(brk) {
            end = end.min(pos);
        }
    }
    text[..end].trim_end_matches(['.', '!', '?', ',']).trim()
}

fn first_group(caps: &regex::Captures<'_>) -> Option<String> {
    (1..caps.len())
        .filter_map(|i| caps.get(i))
        .map(|m| m.as_str().trim().to_string())
        .find(|s| !s.is_empty())
}

/// First quoted string in the input.
pub fn quoted(text: &str) -> Option<String> {
    P_QUOTED.captures(text).and_then(|c| first_group(&c))
}

/// Site name from naming patterns: quoted string, "called X", "named X".
pub fn site_name(text: &str) -> Option<String> {
    P_CALLED
        .captures(text)
        .and_then(|c| first_group(&c))
        .or_else(|| quoted(text))
        .map(|s| s.trim().to_string())
}

/// Allow-list check for site names: letters, digits, hyphen, underscore.
pub fn is_valid_site_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Page title, most specific phrasing first: "page called/titled X", any
/// quoted string, else the topic text promoted to a title.
pub fn page_title(text: &str) -> Option<String> {
    if let Some(caps) = P_TITLED.captures(text) {
        if let Some(raw) = first_group(&caps) {
            let cut = cut_at_clause(&raw);
            if !cut.is_empty() {
                return Some(cut.to_string());
            }
        }
    }
    if let Some(q) = quoted(text) {
        return Some(q);
    }
    topic(text).map(|t| title_case(&t))
}

/// Content topic from an "about X" clause, clipped before any trailing
/// structural clause ("under Y").
pub fn topic(text: &str) -> Option<String> {
    P_ABOUT.captures(text).and_then(|caps| {
        let raw = caps.get(1)?.as_str();
        let cut = cut_at_clause(raw);
        if cut.is_empty() {
            None
        } else {
            Some(cut.to_string())
        }
    })
}

/// Parent page reference: "under X" or "as a child of X".
pub fn parent_reference(text: &str) -> Option<String> {
    P_CHILD_OF
        .captures(text)
        .or_else(|| P_UNDER.captures(text))
        .and_then(|caps| {
            let raw = caps.get(1)?.as_str();
            let cleaned = sanitize_title(raw);
            if cleaned.is_empty() {
                None
            } else {
                Some(cleaned)
            }
        })
}

/// First URL in the input.
pub fn url(text: &str) -> Option<String> {
    P_URL
        .find(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ')']).to_string())
}

/// Deployment domain: "domain X" or "at X".
pub fn domain(text: &str) -> Option<String> {
    P_DOMAIN
        .captures(&text.to_lowercase())
        .and_then(|c| c.get(1).map(|m| m.as_str().to_string()))
}

/// Target page for a component: "to/on the X page" or a quoted reference.
pub fn component_target(text: &str) -> Option<String> {
    P_TARGET_PAGE
        .captures(text)
        .and_then(|c| first_group(&c))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Customization request: (source page reference, stated purpose).
pub fn customization(text: &str) -> Option<(String, String)> {
    P_CUSTOMIZE.captures(text).and_then(|caps| {
        let page = caps.get(1)?.as_str().trim();
        let purpose = caps.get(2)?.as_str().trim_end_matches(['.', '!']).trim();
        if page.is_empty() || purpose.is_empty() {
            None
        } else {
            Some((page.to_string(), purpose.to_string()))
        }
    })
}

/// A page title paired with an optional per-page topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    pub title: String,
    pub topic: Option<String>,
}

/// Two-or-more page titles joined by "and"/commas.
///
/// Staged: "pages called A and B" first, then "pages about A and B", then a
/// generic split of the about-clause. Returns `None` unless at least two
/// titles survive.
pub fn multiple_pages(text: &str) -> Option<Vec<PageSpec>> {
    let raw = P_PAGES_CALLED
        .captures(text)
        .or_else(|| P_PAGES_ABOUT.captures(text))
        .or_else(|| P_ABOUT.captures(text))
        .and_then(|c| c.get(1).map(|m| m.as_str().to_string()))?;
    let list = clip_structural_clauses(&raw)?;

    let specs: Vec<PageSpec> = split_conjunction(&list)
        .into_iter()
        .filter_map(|segment| parse_page_spec(&segment))
        .collect();

    if specs.len() >= 2 {
        Some(specs)
    } else {
        None
    }
}

/// Clips trailing structural clauses from a title list without cutting at
/// inner " about " markers, so per-title topics in "a page about X and one
/// about Y" survive.
fn clip_structural_clauses(raw: &str) -> Option<String> {
    let lc = raw.to_ascii_lowercase();
    let mut end = raw.len();
    for brk in [" under ", " with ", " as a ", " using "] {
        if let Some(pos) = lc.find(brk) {
            end = end.min(pos);
        }
    }
    let cut = raw[..end].trim_end_matches(['.', '!', '?', ',']).trim();
    if cut.is_empty() {
        None
    } else {
        Some(cut.to_string())
    }
}

fn split_conjunction(list: &str) -> Vec<String> {
    list.split(',')
        .flat_map(|part| {
            let lc = part.to_ascii_lowercase();
            if lc.contains(" and ") {
                let mut out = Vec::new();
                let mut rest = part;
                while let Some(pos) = rest.to_ascii_lowercase().find(" and ") {
                    out.push(rest[..pos].to_string());
                    rest = &rest[pos + 5..];
                }
                out.push(rest.to_string());
                out
            } else {
                vec![part.to_string()]
            }
        })
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_page_spec(segment: &str) -> Option<PageSpec> {
    let mut segment = segment.trim();
    for prefix in ["a page ", "another ", "one ", "about "] {
        segment = segment.strip_prefix(prefix).unwrap_or(segment).trim();
    }
    let lc = segment.to_ascii_lowercase();
    let (title, topic) = if let Some(pos) = lc.find(" about ") {
        let title = segment[..pos].trim();
        let topic = segment[pos + 7..].trim();
        (title.to_string(), Some(topic.to_string()))
    } else {
        (segment.to_string(), None)
    };
    let title = title.trim_matches(['"', '\'']).trim();
    if title.is_empty() {
        return None;
    }
    Some(PageSpec {
        title: title_case(title),
        topic,
    })
}

/// Uppercases the first letter of each word; used when a topic is promoted
/// to a title.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Deterministic site name for a cloned URL: host with separators stripped
/// plus a timestamp suffix for uniqueness.
pub fn derive_site_name(source_url: &str, timestamp: i64) -> String {
    let host = source_url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .split(['/', '?', '#'])
        .next()
        .unwrap_or("site");
    let host: String = host
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    let host = if host.is_empty() { "site".to_string() } else { host };
    format!("{}-{}", host, timestamp)
}

/// Default deployment domain: site name plus a timestamp.
pub fn derive_domain(site: &str, timestamp: i64) -> String {
    let base: String = site
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("{}-{}", base.trim_matches('-'), timestamp)
}
