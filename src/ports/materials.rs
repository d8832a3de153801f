//! Material Store Port - access to a site's uploaded course materials.
//!
//! Materials are optional: a site with no materials folder yields an empty
//! listing, not an error. The resource-first extractor in the application
//! layer turns listings into a bounded grounding summary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::ResourceUrl;

/// How a document's bytes should be turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Plain text, read directly (.txt).
    PlainText,
    /// Markup stripped before use (.md, .html).
    Markup,
    /// Paginated binary format; goes through the printable-run scan (.pdf).
    Paginated,
}

impl MaterialKind {
    /// Maps a file extension to a kind; unsupported extensions are `None`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::PlainText),
            "md" | "markdown" | "html" | "htm" => Some(Self::Markup),
            "pdf" => Some(Self::Paginated),
            _ => None,
        }
    }
}

/// One document in a site's materials folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialDoc {
    pub name: String,
    pub kind: MaterialKind,
}

/// The optional per-site materials record: reference URLs plus free notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRecord {
    #[serde(default)]
    pub urls: Vec<ResourceUrl>,
    #[serde(default)]
    pub notes: String,
}

/// Port for listing and reading a site's materials.
#[async_trait]
pub trait MaterialStore: Send + Sync {
    /// Lists supported documents for `site`. Missing folder means empty.
    async fn list(&self, site: &str) -> Result<Vec<MaterialDoc>, MaterialError>;

    /// Reads one document's raw bytes.
    async fn read(&self, site: &str, name: &str) -> Result<Vec<u8>, MaterialError>;

    /// Loads the materials record, when one exists.
    async fn record(&self, site: &str) -> Result<Option<MaterialRecord>, MaterialError>;
}

/// Material access errors.
#[derive(Debug, thiserror::Error)]
pub enum MaterialError {
    #[error("document '{0}' not found")]
    DocNotFound(String),

    #[error("io error reading materials: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_mapping() {
        assert_eq!(MaterialKind::from_extension("txt"), Some(MaterialKind::PlainText));
        assert_eq!(MaterialKind::from_extension("MD"), Some(MaterialKind::Markup));
        assert_eq!(MaterialKind::from_extension("html"), Some(MaterialKind::Markup));
        assert_eq!(MaterialKind::from_extension("pdf"), Some(MaterialKind::Paginated));
        assert_eq!(MaterialKind::from_extension("exe"), None);
    }

    #[test]
    fn record_deserializes_with_defaults() {
        let record: MaterialRecord = serde_json::from_str("{}").unwrap();
        assert!(record.urls.is_empty());
        assert!(record.notes.is_empty());
    }
}
