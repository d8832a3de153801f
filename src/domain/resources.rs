//! Resource grounding summary.
//!
//! The bounded digest of a site's uploaded course materials that biases
//! generation toward user-supplied sources instead of generic model
//! knowledge. Rebuilt per request; never cached past one `process()` call.

use serde::{Deserialize, Serialize};

/// A reference URL from the site's materials record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUrl {
    pub url: String,
    #[serde(default)]
    pub description: String,
}

/// Bounded grounding digest handed to generation prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub urls: Vec<ResourceUrl>,
    pub notes: String,
    /// Bounded-length text excerpts extracted from uploaded documents.
    pub snippets: Vec<String>,
}

impl ResourceSummary {
    /// True when there is nothing to ground on. An empty summary is valid;
    /// grounding is strictly additive and optional.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.notes.trim().is_empty() && self.snippets.is_empty()
    }

    /// Renders the summary as a prompt preamble block.
    pub fn as_prompt_block(&self) -> String {
        let mut block = String::new();
        if !self.notes.trim().is_empty() {
            block.push_str("Course notes: ");
            block.push_str(self.notes.trim());
            block.push('\n');
        }
        for url in &self.urls {
            if url.description.is_empty() {
                block.push_str(&format!("Reference: {}\n", url.url));
            } else {
                block.push_str(&format!("Reference: {} ({})\n", url.url, url.description));
            }
        }
        for (i, snippet) in self.snippets.iter().enumerate() {
            block.push_str(&format!("Source excerpt {}: {}\n", i + 1, snippet));
        }
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_is_empty() {
        assert!(ResourceSummary::default().is_empty());
    }

    #[test]
    fn summary_with_notes_is_not_empty() {
        let summary = ResourceSummary {
            notes: "week one covers cells".to_string(),
            ..Default::default()
        };
        assert!(!summary.is_empty());
    }

    #[test]
    fn prompt_block_includes_everything() {
        let summary = ResourceSummary {
            urls: vec![ResourceUrl {
                url: "https://example.com/syllabus".to_string(),
                description: "syllabus".to_string(),
            }],
            notes: "intro course".to_string(),
            snippets: vec!["Cells are the unit of life.".to_string()],
        };
        let block = summary.as_prompt_block();
        assert!(block.contains("Course notes: intro course"));
        assert!(block.contains("https://example.com/syllabus (syllabus)"));
        assert!(block.contains("Source excerpt 1: Cells are the unit of life."));
    }
}
