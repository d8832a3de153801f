//! Intent classification rule cascade.
//!
//! An ordered list of predicate rules evaluated top to bottom; the first
//! match wins. Each rule is a conjunction of "any action word present" AND
//! ("any object word present" OR the object set is empty), with an optional
//! exclusion set that vetoes the rule.
//!
//! Order encodes precedence. The component rule sits above the page rules so
//! "add a multiple-choice quiz" classifies as AddComponent before the generic
//! add-page rule can fire, and the create-site rule carries page-type nouns
//! in its exclusion set so "add a page to my site" lands on AddPage. Rules
//! with no object constraint carry exclusions for the same reason: a bare
//! action word inside a page request ("a page about the launch") must not
//! capture the input before the page rules see it.

use once_cell::sync::Lazy;

use super::intent::Intent;

/// One entry in the classification cascade.
#[derive(Debug)]
pub struct IntentRule {
    pub intent: Intent,
    /// Any of these must appear.
    pub actions: &'static [&'static str],
    /// Any of these must appear; empty means no object constraint.
    pub objects: &'static [&'static str],
    /// None of these may appear.
    pub exclusions: &'static [&'static str],
}

impl IntentRule {
    fn matches(&self, normalized: &str) -> bool {
        if self.exclusions.iter().any(|w| contains_phrase(normalized, w)) {
            return false;
        }
        if !self.actions.iter().any(|w| contains_phrase(normalized, w)) {
            return false;
        }
        self.objects.is_empty() || self.objects.iter().any(|w| contains_phrase(normalized, w))
    }
}

/// The cascade, most specific rules first.
pub static RULES: Lazy<Vec<IntentRule>> = Lazy::new(|| {
    vec![
        IntentRule {
            intent: Intent::AddComponent,
            actions: &["add", "insert", "put", "create", "include"],
            // Mirrors the vocabulary `ComponentKind::detect` understands.
            objects: &[
                "quiz",
                "question",
                "questions",
                "carousel",
                "slideshow",
                "gallery",
                "timeline",
                "code sample",
                "code example",
                "snippet",
                "quote",
                "component",
            ],
            exclusions: &[],
        },
        IntentRule {
            intent: Intent::CreateSlidedeck,
            actions: &["make", "create", "build", "add", "generate"],
            objects: &["slidedeck", "slide deck", "slides", "presentation", "deck"],
            exclusions: &[],
        },
        IntentRule {
            intent: Intent::CloneSite,
            actions: &["clone", "copy", "import", "duplicate"],
            objects: &["site", "website", "http", "https", "www"],
            exclusions: &[],
        },
        IntentRule {
            intent: Intent::Publish,
            actions: &["deploy", "publish", "ship", "go live", "launch"],
            objects: &[],
            // "add a page about the launch" is a page request.
            exclusions: &["page", "pages", "article", "section"],
        },
        IntentRule {
            intent: Intent::Preview,
            actions: &["preview", "serve", "run locally", "see my site"],
            objects: &[],
            exclusions: &["page", "pages", "article", "section"],
        },
        IntentRule {
            intent: Intent::Customize,
            actions: &["customize", "customise", "adapt", "personalize", "tailor"],
            objects: &[],
            // Page-creation verbs veto: "add a page about how species adapt"
            // routes to the page rules. Plain "customize the X page" carries
            // none of them and still lands here.
            exclusions: &["add", "create", "make", "write"],
        },
        IntentRule {
            intent: Intent::AddMultiplePages,
            actions: &["add", "create", "make", "write"],
            objects: &["pages"],
            exclusions: &[],
        },
        IntentRule {
            intent: Intent::AddPage,
            actions: &["add", "create", "make", "write"],
            objects: &["page", "article", "section"],
            exclusions: &[],
        },
        IntentRule {
            intent: Intent::CreateSite,
            actions: &["create", "make", "build", "new", "start"],
            objects: &["site", "website", "blog", "portfolio"],
            // Page-type nouns veto create-site; AddPage already matched them
            // above, and mixed inputs must route to the page workflow.
            exclusions: &["page", "pages", "quiz", "slide", "deck", "presentation"],
        },
        IntentRule {
            intent: Intent::ListContent,
            actions: &["list", "show", "what pages", "what is on"],
            objects: &["pages", "content", "structure", "site", "manifest"],
            exclusions: &[],
        },
        IntentRule {
            intent: Intent::Edit,
            actions: &["edit", "change", "modify", "update", "open"],
            objects: &["page", "site", "content", "title", "text"],
            exclusions: &[],
        },
        IntentRule {
            intent: Intent::Help,
            actions: &["help", "how do i", "what can you", "what can i"],
            objects: &[],
            exclusions: &[],
        },
    ]
});

/// Classifies raw input text into an [`Intent`].
///
/// Deterministic; same input always yields the same intent. Inputs matching
/// no rule classify as [`Intent::Unknown`] and fall through to the generative
/// fallback when one is configured.
pub fn classify(text: &str) -> Intent {
    let normalized = normalize(text);
    for rule in RULES.iter() {
        if rule.matches(&normalized) {
            return rule.intent;
        }
    }
    Intent::Unknown
}

/// Lowercases and collapses whitespace so multi-word phrases match.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole-word/phrase containment check.
///
/// "add" must not match inside "address", so boundaries are any non
/// alphanumeric character or the ends of the string.
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(phrase) {
        let abs = start + pos;
        let end = abs + phrase.len();
        let left_ok = abs == 0
            || !haystack[..abs]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
        let right_ok = end == haystack.len()
            || !haystack[end..].chars().next().is_some_and(|c| c.is_alphanumeric());
        if left_ok && right_ok {
            return true;
        }
        start = abs + 1;
        if start >= haystack.len() {
            break;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_create_site() {
        assert_eq!(classify("Create a site called my-blog"), Intent::CreateSite);
        assert_eq!(classify("make me a new website"), Intent::CreateSite);
    }

    #[test]
    fn classifies_add_page() {
        assert_eq!(classify("add a page about photosynthesis"), Intent::AddPage);
        assert_eq!(classify("create an article on Rust"), Intent::AddPage);
    }

    #[test]
    fn add_page_beats_create_site_on_mixed_input() {
        // "add", "page", and "site" all present; page workflow must win.
        assert_eq!(classify("add a page to my site"), Intent::AddPage);
        assert_eq!(classify("create a page on the site"), Intent::AddPage);
    }

    #[test]
    fn component_beats_add_page() {
        assert_eq!(
            classify("add a multiple-choice quiz to the intro page"),
            Intent::AddComponent
        );
        assert_eq!(classify("put a timeline on the history page"), Intent::AddComponent);
    }

    #[test]
    fn slidedeck_beats_add_page() {
        assert_eq!(
            classify("make a slidedeck about the French Revolution"),
            Intent::CreateSlidedeck
        );
        assert_eq!(classify("create a presentation on biology"), Intent::CreateSlidedeck);
    }

    #[test]
    fn page_requests_beat_bare_action_rules() {
        // Action words of the object-less rules appearing inside a page
        // request must not capture it.
        assert_eq!(classify("add a page about the launch"), Intent::AddPage);
        assert_eq!(classify("add a page about what we serve"), Intent::AddPage);
        assert_eq!(
            classify("add a page about how species adapt"),
            Intent::AddPage
        );
        assert_eq!(
            classify("create pages about launch day and recovery"),
            Intent::AddMultiplePages
        );
    }

    #[test]
    fn component_rule_covers_detector_vocabulary() {
        assert_eq!(
            classify("add an image gallery to the intro page"),
            Intent::AddComponent
        );
        assert_eq!(
            classify("insert a slideshow on the trips page"),
            Intent::AddComponent
        );
        assert_eq!(
            classify("add a code snippet to the rust page"),
            Intent::AddComponent
        );
        assert_eq!(
            classify("add a practice question to the biology page"),
            Intent::AddComponent
        );
    }

    #[test]
    fn classifies_multiple_pages() {
        assert_eq!(
            classify("add pages called Intro and Outro"),
            Intent::AddMultiplePages
        );
    }

    #[test]
    fn classifies_clone() {
        assert_eq!(
            classify("clone the site at https://example.com"),
            Intent::CloneSite
        );
        assert_eq!(classify("import https://www.example.org please"), Intent::CloneSite);
    }

    #[test]
    fn classifies_publish() {
        assert_eq!(classify("deploy my site"), Intent::Publish);
        assert_eq!(classify("publish it"), Intent::Publish);
        assert_eq!(classify("time to go live"), Intent::Publish);
    }

    #[test]
    fn classifies_preview_list_edit_help() {
        assert_eq!(classify("preview please"), Intent::Preview);
        assert_eq!(classify("list the pages"), Intent::ListContent);
        assert_eq!(classify("edit the About page"), Intent::Edit);
        assert_eq!(classify("help"), Intent::Help);
    }

    #[test]
    fn classifies_customize() {
        assert_eq!(
            classify("customize the Dutch recipes page for a French audience"),
            Intent::Customize
        );
    }

    #[test]
    fn unmatched_input_is_unknown() {
        assert_eq!(classify("the weather is nice today"), Intent::Unknown);
        assert_eq!(classify(""), Intent::Unknown);
    }

    #[test]
    fn word_boundaries_respected() {
        // "add" inside "address" must not trigger the page rules.
        assert_eq!(classify("my address page number"), Intent::Unknown);
        assert!(contains_phrase("add a page", "add"));
        assert!(!contains_phrase("address", "add"));
        assert!(contains_phrase("go live now", "go live"));
    }

    #[test]
    fn classification_is_deterministic() {
        let input = "add a quiz about biology";
        let first = classify(input);
        for _ in 0..5 {
            assert_eq!(classify(input), first);
        }
    }
}
