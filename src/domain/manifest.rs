//! Site structural manifest.
//!
//! The external site CLI keeps a `manifest.json` per site describing its
//! pages (title, slug, parent link, nesting depth). The engine reads it to
//! resolve titles and parents; it rewrites it only indirectly, through the
//! manifest-patch commands it emits.

use serde::{Deserialize, Serialize};

use super::text::{sanitize_title, slugify};

/// One page entry in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestPage {
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub indent: u8,
    /// Page body HTML when the reader loaded it; used for content-grounded
    /// component generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ManifestPage {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let slug = slugify(&title);
        Self {
            title,
            slug,
            parent: None,
            indent: 0,
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A site's structural description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteManifest {
    #[serde(default)]
    pub pages: Vec<ManifestPage>,
}

impl SiteManifest {
    /// Resolves a page by title or slug.
    ///
    /// Resolution order: exact case-insensitive title, exact slug, sanitized
    /// title match, then substring containment either way ("intro page"
    /// resolves a page titled "Intro").
    pub fn find_page(&self, reference: &str) -> Option<&ManifestPage> {
        let query = reference.trim();
        if query.is_empty() {
            return None;
        }
        let query_lc = query.to_lowercase();
        let query_slug = slugify(query);
        let query_sanitized = sanitize_title(query).to_lowercase();

        self.pages
            .iter()
            .find(|p| p.title.to_lowercase() == query_lc)
            .or_else(|| self.pages.iter().find(|p| p.slug == query_slug))
            .or_else(|| {
                self.pages
                    .iter()
                    .find(|p| sanitize_title(&p.title).to_lowercase() == query_sanitized)
            })
            .or_else(|| {
                self.pages.iter().find(|p| {
                    let title_lc = p.title.to_lowercase();
                    query_lc.contains(&title_lc) || title_lc.contains(query_sanitized.as_str())
                })
            })
    }

    /// Titles closest to `reference`, for not-found suggestions. Cheap
    /// heuristic: shared-word overlap, best first, at most `limit`. Pages
    /// sharing no word with the reference are never suggested.
    pub fn closest_titles(&self, reference: &str, limit: usize) -> Vec<String> {
        let query_words: Vec<String> = sanitize_title(reference)
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let mut scored: Vec<(usize, &ManifestPage)> = self
            .pages
            .iter()
            .filter_map(|p| {
                let title_lc = sanitize_title(&p.title).to_lowercase();
                let score = query_words
                    .iter()
                    .filter(|w| title_lc.split_whitespace().any(|t| t == w.as_str()))
                    .count();
                (score > 0).then_some((score, p))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, p)| p.title.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SiteManifest {
        SiteManifest {
            pages: vec![
                ManifestPage::new("Intro"),
                ManifestPage::new("Dutch Recipes"),
                ManifestPage::new("Course Home"),
            ],
        }
    }

    #[test]
    fn finds_by_exact_title_case_insensitive() {
        let m = sample();
        assert_eq!(m.find_page("intro").unwrap().title, "Intro");
        assert_eq!(m.find_page("DUTCH RECIPES").unwrap().title, "Dutch Recipes");
    }

    #[test]
    fn finds_by_slug() {
        let m = sample();
        assert_eq!(m.find_page("dutch-recipes").unwrap().title, "Dutch Recipes");
    }

    #[test]
    fn finds_by_containment() {
        let m = sample();
        // "the intro page" contains the title "intro"
        assert_eq!(m.find_page("the intro page").unwrap().title, "Intro");
    }

    #[test]
    fn missing_page_is_none() {
        let m = sample();
        assert!(m.find_page("Conclusion").is_none());
        assert!(m.find_page("").is_none());
    }

    #[test]
    fn closest_titles_ranks_by_word_overlap() {
        let m = sample();
        let suggestions = m.closest_titles("recipes page", 2);
        assert_eq!(suggestions.first().map(String::as_str), Some("Dutch Recipes"));
    }

    #[test]
    fn closest_titles_omits_unrelated_pages() {
        let m = sample();
        assert!(m.closest_titles("zebras", 3).is_empty());
        let suggestions = m.closest_titles("recipes page", 3);
        assert_eq!(suggestions, vec!["Dutch Recipes".to_string()]);
    }

    #[test]
    fn new_page_derives_slug() {
        let page = ManifestPage::new("My First Page!");
        assert_eq!(page.slug, "my-first-page");
        assert_eq!(page.indent, 0);
    }

    #[test]
    fn manifest_round_trips_json() {
        let m = sample();
        let json = serde_json::to_string(&m).unwrap();
        let back: SiteManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
