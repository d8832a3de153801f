//! Intent classification types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a user request is asking the engine to do.
///
/// Closed enumeration; new intents require a new cascade rule in
/// [`crate::domain::rules`] and a handler in `application::handlers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    CreateSite,
    AddPage,
    AddMultiplePages,
    AddComponent,
    CreateSlidedeck,
    Customize,
    CloneSite,
    ListContent,
    Preview,
    Publish,
    Edit,
    Help,
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::CreateSite => "create-site",
            Intent::AddPage => "add-page",
            Intent::AddMultiplePages => "add-multiple-pages",
            Intent::AddComponent => "add-component",
            Intent::CreateSlidedeck => "create-slidedeck",
            Intent::Customize => "customize",
            Intent::CloneSite => "clone-site",
            Intent::ListContent => "list-content",
            Intent::Preview => "preview",
            Intent::Publish => "publish",
            Intent::Edit => "edit",
            Intent::Help => "help",
            Intent::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Kinds of page components the engine can generate.
///
/// Components attach to existing pages; they cannot stand alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Quiz,
    Carousel,
    Timeline,
    CodeSample,
    Quote,
    Generic,
}

impl ComponentKind {
    /// Detects the component kind named in the input text, if any.
    pub fn detect(text: &str) -> Option<Self> {
        let lc = text.to_lowercase();
        if lc.contains("quiz") || lc.contains("question") {
            Some(ComponentKind::Quiz)
        } else if lc.contains("carousel") || lc.contains("slideshow") || lc.contains("gallery") {
            Some(ComponentKind::Carousel)
        } else if lc.contains("timeline") {
            Some(ComponentKind::Timeline)
        } else if lc.contains("code sample") || lc.contains("code example") || lc.contains("snippet")
        {
            Some(ComponentKind::CodeSample)
        } else if lc.contains("quote") {
            Some(ComponentKind::Quote)
        } else if lc.contains("component") {
            Some(ComponentKind::Generic)
        } else {
            None
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComponentKind::Quiz => "quiz",
            ComponentKind::Carousel => "carousel",
            ComponentKind::Timeline => "timeline",
            ComponentKind::CodeSample => "code-sample",
            ComponentKind::Quote => "quote",
            ComponentKind::Generic => "component",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_serializes_kebab_case() {
        let json = serde_json::to_string(&Intent::AddMultiplePages).unwrap();
        assert_eq!(json, "\"add-multiple-pages\"");
        let json = serde_json::to_string(&Intent::CreateSite).unwrap();
        assert_eq!(json, "\"create-site\"");
    }

    #[test]
    fn display_matches_serialization() {
        assert_eq!(Intent::CreateSlidedeck.to_string(), "create-slidedeck");
        assert_eq!(Intent::Unknown.to_string(), "unknown");
    }

    #[test]
    fn component_kind_detection() {
        assert_eq!(ComponentKind::detect("add a quiz here"), Some(ComponentKind::Quiz));
        assert_eq!(
            ComponentKind::detect("insert an image carousel"),
            Some(ComponentKind::Carousel)
        );
        assert_eq!(
            ComponentKind::detect("put a timeline on the page"),
            Some(ComponentKind::Timeline)
        );
        assert_eq!(
            ComponentKind::detect("add a code sample"),
            Some(ComponentKind::CodeSample)
        );
        assert_eq!(ComponentKind::detect("add a pull quote"), Some(ComponentKind::Quote));
        assert_eq!(ComponentKind::detect("just some text"), None);
    }
}
