//! Resource-grounding limits.
//!
//! Size limits for the resource-first content extractor. These bound how much
//! user-supplied material is folded into a generation prompt, and are tunable
//! rather than hard-coded.

use serde::Deserialize;

use super::error::ValidationError;

/// Limits applied when summarizing a site's uploaded materials.
#[derive(Debug, Clone, Deserialize)]
pub struct GroundingConfig {
    /// Maximum characters kept per extracted document
    #[serde(default = "default_per_doc_chars")]
    pub per_doc_chars: usize,

    /// Maximum number of documents scanned per request
    #[serde(default = "default_max_docs")]
    pub max_docs: usize,

    /// Maximum URL entries carried over from the materials record
    #[serde(default = "default_max_url_entries")]
    pub max_url_entries: usize,
}

impl GroundingConfig {
    /// Validate grounding limits
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.per_doc_chars == 0 {
            return Err(ValidationError::InvalidPerDocCap);
        }
        if self.max_docs == 0 {
            return Err(ValidationError::InvalidMaxDocs);
        }
        Ok(())
    }
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            per_doc_chars: default_per_doc_chars(),
            max_docs: default_max_docs(),
            max_url_entries: default_max_url_entries(),
        }
    }
}

fn default_per_doc_chars() -> usize {
    2000
}

fn default_max_docs() -> usize {
    5
}

fn default_max_url_entries() -> usize {
    10
}
