//! Manifest Reader Port - read-only access to a site's structural manifest.
//!
//! Handlers resolve page titles, parents, and component targets against the
//! manifest. Writes happen only through the manifest-patch commands the
//! engine emits; this port never mutates anything.

use async_trait::async_trait;

use crate::domain::SiteManifest;

/// Port for loading a site's manifest.
#[async_trait]
pub trait ManifestReader: Send + Sync {
    /// Loads the manifest for `site`, including page bodies when available.
    async fn load(&self, site: &str) -> Result<SiteManifest, ManifestError>;
}

/// Manifest access errors.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("site '{0}' not found")]
    SiteNotFound(String),

    #[error("manifest for '{site}' is malformed: {reason}")]
    Malformed { site: String, reason: String },

    #[error("io error reading manifest: {0}")]
    Io(String),
}

impl ManifestError {
    pub fn malformed(site: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            site: site.into(),
            reason: reason.into(),
        }
    }
}
