//! Per-request context.

use std::path::PathBuf;

use super::resources::ResourceSummary;

/// Facts the outer layer hands the engine for one `process()` call.
///
/// Immutable per request and constructed fresh each call. The engine never
/// enumerates the filesystem for the site list; it is handed here.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Site identifiers known to the outer layer, in presentation order.
    pub available_sites: Vec<String>,
    /// The site the conversation is currently about, if one is selected.
    pub current_site: Option<String>,
    /// Root directory under which each site's files live.
    pub storage_root: PathBuf,
    /// Pre-computed grounding summary; when absent, handlers that need one
    /// build it from the material store.
    pub resource_summary: Option<ResourceSummary>,
}

impl RequestContext {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
            ..Default::default()
        }
    }

    pub fn with_sites(mut self, sites: Vec<String>) -> Self {
        self.available_sites = sites;
        self
    }

    pub fn with_current_site(mut self, site: impl Into<String>) -> Self {
        self.current_site = Some(site.into());
        self
    }

    pub fn with_resource_summary(mut self, summary: ResourceSummary) -> Self {
        self.resource_summary = Some(summary);
        self
    }

    /// True when `name` is one of the known sites (case-insensitive).
    pub fn has_site(&self, name: &str) -> bool {
        self.available_sites
            .iter()
            .any(|s| s.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_site_is_case_insensitive() {
        let ctx = RequestContext::new("/tmp/sites")
            .with_sites(vec!["my-blog".to_string(), "Course".to_string()]);
        assert!(ctx.has_site("my-blog"));
        assert!(ctx.has_site("COURSE"));
        assert!(!ctx.has_site("other"));
    }

    #[test]
    fn builder_sets_fields() {
        let ctx = RequestContext::new("/srv/sites")
            .with_sites(vec!["a".into()])
            .with_current_site("a");
        assert_eq!(ctx.current_site.as_deref(), Some("a"));
        assert_eq!(ctx.storage_root, PathBuf::from("/srv/sites"));
    }
}
