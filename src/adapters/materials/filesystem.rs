//! Filesystem material store.
//!
//! Materials live under `<root>/<site>/materials/`; the optional record of
//! reference URLs and notes is `<root>/<site>/materials.json`. A missing
//! materials folder means "no materials", never an error.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::ports::{MaterialDoc, MaterialError, MaterialKind, MaterialRecord, MaterialStore};

/// Reads uploaded course materials from a storage root on disk.
#[derive(Debug, Clone)]
pub struct FilesystemMaterialStore {
    root: PathBuf,
}

impl FilesystemMaterialStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn materials_dir(&self, site: &str) -> PathBuf {
        self.root.join(site).join("materials")
    }

    fn record_path(&self, site: &str) -> PathBuf {
        self.root.join(site).join("materials.json")
    }
}

#[async_trait]
impl MaterialStore for FilesystemMaterialStore {
    async fn list(&self, site: &str) -> Result<Vec<MaterialDoc>, MaterialError> {
        let dir = self.materials_dir(site);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(MaterialError::Io(e.to_string())),
        };

        let mut docs = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| MaterialError::Io(e.to_string()))?
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(kind) = path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(MaterialKind::from_extension)
            else {
                continue;
            };
            docs.push(MaterialDoc {
                name: name.to_string(),
                kind,
            });
        }
        // Directory order is platform-dependent; keep listings stable.
        docs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(docs)
    }

    async fn read(&self, site: &str, name: &str) -> Result<Vec<u8>, MaterialError> {
        let path = self.materials_dir(site).join(name);
        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MaterialError::DocNotFound(name.to_string())
            } else {
                MaterialError::Io(e.to_string())
            }
        })
    }

    async fn record(&self, site: &str) -> Result<Option<MaterialRecord>, MaterialError> {
        let raw = match tokio::fs::read_to_string(self.record_path(site)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(MaterialError::Io(e.to_string())),
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                // A broken record must not block the request; grounding is optional.
                tracing::warn!(site, error = %e, "materials record unreadable, ignoring");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    async fn seed_materials(root: &Path, site: &str) {
        let dir = root.join(site).join("materials");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("syllabus.txt"), "Week 1: cells")
            .await
            .unwrap();
        tokio::fs::write(dir.join("notes.md"), "# Notes").await.unwrap();
        tokio::fs::write(dir.join("photo.png"), [0u8; 4]).await.unwrap();
    }

    #[tokio::test]
    async fn lists_supported_docs_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        seed_materials(tmp.path(), "biology").await;

        let store = FilesystemMaterialStore::new(tmp.path());
        let docs = store.list("biology").await.unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["notes.md", "syllabus.txt"]);
        assert_eq!(docs[1].kind, MaterialKind::PlainText);
    }

    #[tokio::test]
    async fn missing_folder_lists_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FilesystemMaterialStore::new(tmp.path());
        assert!(store.list("ghost").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_doc_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        seed_materials(tmp.path(), "biology").await;

        let store = FilesystemMaterialStore::new(tmp.path());
        let bytes = store.read("biology", "syllabus.txt").await.unwrap();
        assert_eq!(bytes, b"Week 1: cells");

        let err = store.read("biology", "missing.txt").await.unwrap_err();
        assert!(matches!(err, MaterialError::DocNotFound(_)));
    }

    #[tokio::test]
    async fn record_is_optional_and_tolerant() {
        let tmp = tempfile::tempdir().unwrap();
        let site_dir = tmp.path().join("biology");
        tokio::fs::create_dir_all(&site_dir).await.unwrap();

        let store = FilesystemMaterialStore::new(tmp.path());
        assert!(store.record("biology").await.unwrap().is_none());

        tokio::fs::write(site_dir.join("materials.json"), "{broken")
            .await
            .unwrap();
        assert!(store.record("biology").await.unwrap().is_none());

        tokio::fs::write(
            site_dir.join("materials.json"),
            r#"{"urls":[{"url":"https://example.com"}],"notes":"intro"}"#,
        )
        .await
        .unwrap();
        let record = store.record("biology").await.unwrap().unwrap();
        assert_eq!(record.urls[0].url, "https://example.com");
        assert_eq!(record.notes, "intro");
    }
}
