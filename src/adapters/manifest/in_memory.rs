//! In-memory manifest reader for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::SiteManifest;
use crate::ports::{ManifestError, ManifestReader};

/// Test double holding manifests keyed by site name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryManifestReader {
    sites: Arc<Mutex<HashMap<String, SiteManifest>>>,
}

impl InMemoryManifestReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_site(self, site: impl Into<String>, manifest: SiteManifest) -> Self {
        self.sites.lock().unwrap().insert(site.into(), manifest);
        self
    }
}

#[async_trait]
impl ManifestReader for InMemoryManifestReader {
    async fn load(&self, site: &str) -> Result<SiteManifest, ManifestError> {
        self.sites
            .lock()
            .unwrap()
            .get(site)
            .cloned()
            .ok_or_else(|| ManifestError::SiteNotFound(site.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ManifestPage;

    #[tokio::test]
    async fn returns_seeded_manifest() {
        let manifest = SiteManifest {
            pages: vec![ManifestPage::new("Intro")],
        };
        let reader = InMemoryManifestReader::new().with_site("biology", manifest);
        let loaded = reader.load("biology").await.unwrap();
        assert_eq!(loaded.pages[0].title, "Intro");
        assert!(reader.load("other").await.is_err());
    }
}
