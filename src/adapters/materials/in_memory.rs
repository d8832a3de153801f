//! In-memory material store for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::ports::{MaterialDoc, MaterialError, MaterialKind, MaterialRecord, MaterialStore};

#[derive(Debug, Default)]
struct SiteMaterials {
    docs: Vec<(MaterialDoc, Vec<u8>)>,
    record: Option<MaterialRecord>,
}

/// Test double holding materials keyed by site name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMaterialStore {
    sites: Arc<Mutex<HashMap<String, SiteMaterials>>>,
}

impl InMemoryMaterialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc(
        self,
        site: impl Into<String>,
        name: impl Into<String>,
        kind: MaterialKind,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let name = name.into();
        self.sites
            .lock()
            .unwrap()
            .entry(site.into())
            .or_default()
            .docs
            .push((MaterialDoc { name, kind }, bytes.into()));
        self
    }

    pub fn with_record(self, site: impl Into<String>, record: MaterialRecord) -> Self {
        self.sites
            .lock()
            .unwrap()
            .entry(site.into())
            .or_default()
            .record = Some(record);
        self
    }
}

#[async_trait]
impl MaterialStore for InMemoryMaterialStore {
    async fn list(&self, site: &str) -> Result<Vec<MaterialDoc>, MaterialError> {
        Ok(self
            .sites
            .lock()
            .unwrap()
            .get(site)
            .map(|s| s.docs.iter().map(|(doc, _)| doc.clone()).collect())
            .unwrap_or_default())
    }

    async fn read(&self, site: &str, name: &str) -> Result<Vec<u8>, MaterialError> {
        self.sites
            .lock()
            .unwrap()
            .get(site)
            .and_then(|s| {
                s.docs
                    .iter()
                    .find(|(doc, _)| doc.name == name)
                    .map(|(_, bytes)| bytes.clone())
            })
            .ok_or_else(|| MaterialError::DocNotFound(name.to_string()))
    }

    async fn record(&self, site: &str) -> Result<Option<MaterialRecord>, MaterialError> {
        Ok(self
            .sites
            .lock()
            .unwrap()
            .get(site)
            .and_then(|s| s.record.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_and_reads_seeded_docs() {
        let store = InMemoryMaterialStore::new().with_doc(
            "biology",
            "syllabus.txt",
            MaterialKind::PlainText,
            "Week 1",
        );
        let docs = store.list("biology").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(store.read("biology", "syllabus.txt").await.unwrap(), b"Week 1");
        assert!(store.list("other").await.unwrap().is_empty());
    }
}
