//! Filesystem manifest reader.
//!
//! Reads `<root>/<site>/manifest.json` as written by the site CLI and fills
//! page bodies from `<root>/<site>/pages/<slug>.html` when those files exist.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::SiteManifest;
use crate::ports::{ManifestError, ManifestReader};

/// Reads site manifests from a storage root on disk.
#[derive(Debug, Clone)]
pub struct FilesystemManifestReader {
    root: PathBuf,
}

impl FilesystemManifestReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn site_dir(&self, site: &str) -> PathBuf {
        self.root.join(site)
    }
}

#[async_trait]
impl ManifestReader for FilesystemManifestReader {
    async fn load(&self, site: &str) -> Result<SiteManifest, ManifestError> {
        let dir = self.site_dir(site);
        if !dir.is_dir() {
            return Err(ManifestError::SiteNotFound(site.to_string()));
        }

        let manifest_path = dir.join("manifest.json");
        let raw = tokio::fs::read_to_string(&manifest_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ManifestError::SiteNotFound(site.to_string())
            } else {
                ManifestError::Io(e.to_string())
            }
        })?;

        let mut manifest: SiteManifest = serde_json::from_str(&raw)
            .map_err(|e| ManifestError::malformed(site, e.to_string()))?;

        for page in &mut manifest.pages {
            page.body = read_body(&dir, &page.slug).await;
        }

        tracing::debug!(site, pages = manifest.pages.len(), "loaded manifest");
        Ok(manifest)
    }
}

async fn read_body(site_dir: &Path, slug: &str) -> Option<String> {
    let path = site_dir.join("pages").join(format!("{}.html", slug));
    tokio::fs::read_to_string(path).await.ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn write_site(root: &Path, site: &str, manifest_json: &str) {
        let dir = root.join(site);
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("manifest.json"), manifest_json)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn loads_manifest_with_bodies() {
        let tmp = tempfile::tempdir().unwrap();
        write_site(
            tmp.path(),
            "biology",
            r#"{"pages":[{"title":"Intro","slug":"intro"}]}"#,
        )
        .await;
        let pages_dir = tmp.path().join("biology").join("pages");
        tokio::fs::create_dir_all(&pages_dir).await.unwrap();
        tokio::fs::write(pages_dir.join("intro.html"), "<p>Hello</p>")
            .await
            .unwrap();

        let reader = FilesystemManifestReader::new(tmp.path());
        let manifest = reader.load("biology").await.unwrap();
        assert_eq!(manifest.pages.len(), 1);
        assert_eq!(manifest.pages[0].body.as_deref(), Some("<p>Hello</p>"));
    }

    #[tokio::test]
    async fn missing_site_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let reader = FilesystemManifestReader::new(tmp.path());
        let err = reader.load("ghost").await.unwrap_err();
        assert!(matches!(err, ManifestError::SiteNotFound(_)));
    }

    #[tokio::test]
    async fn missing_body_file_leaves_body_none() {
        let tmp = tempfile::tempdir().unwrap();
        write_site(
            tmp.path(),
            "biology",
            r#"{"pages":[{"title":"Intro","slug":"intro"}]}"#,
        )
        .await;

        let reader = FilesystemManifestReader::new(tmp.path());
        let manifest = reader.load("biology").await.unwrap();
        assert!(manifest.pages[0].body.is_none());
    }

    #[tokio::test]
    async fn malformed_json_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        write_site(tmp.path(), "biology", "{not json").await;

        let reader = FilesystemManifestReader::new(tmp.path());
        let err = reader.load("biology").await.unwrap_err();
        assert!(matches!(err, ManifestError::Malformed { .. }));
    }
}
