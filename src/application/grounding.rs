//! Resource-first content extraction.
//!
//! Builds the bounded [`ResourceSummary`] that biases generation toward the
//! user's uploaded course materials. Everything here is best-effort: a
//! missing folder, an unreadable document, or a broken record reduces the
//! summary instead of failing the request.

use crate::config::GroundingConfig;
use crate::domain::text::strip_html;
use crate::domain::ResourceSummary;
use crate::ports::{MaterialKind, MaterialStore};

/// Summarizes a site's materials under the configured caps.
pub async fn summarize(
    site: &str,
    store: &dyn MaterialStore,
    config: &GroundingConfig,
) -> ResourceSummary {
    let mut summary = ResourceSummary::default();

    match store.record(site).await {
        Ok(Some(record)) => {
            summary.urls = record
                .urls
                .into_iter()
                .take(config.max_url_entries)
                .collect();
            summary.notes = record.notes;
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(site, error = %e, "materials record unavailable"),
    }

    let docs = match store.list(site).await {
        Ok(docs) => docs,
        Err(e) => {
            tracing::warn!(site, error = %e, "materials listing failed");
            return summary;
        }
    };

    for doc in docs.iter().take(config.max_docs) {
        let bytes = match store.read(site, &doc.name).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(site, doc = %doc.name, error = %e, "skipping unreadable document");
                continue;
            }
        };
        let text = extract_text(&bytes, doc.kind);
        let snippet: String = text.chars().take(config.per_doc_chars).collect();
        let snippet = snippet.trim().to_string();
        if !snippet.is_empty() {
            summary.snippets.push(snippet);
        }
    }

    tracing::debug!(
        site,
        urls = summary.urls.len(),
        snippets = summary.snippets.len(),
        "grounding summary built"
    );
    summary
}

fn extract_text(bytes: &[u8], kind: MaterialKind) -> String {
    match kind {
        MaterialKind::PlainText => String::from_utf8_lossy(bytes).into_owned(),
        MaterialKind::Markup => strip_html(&String::from_utf8_lossy(bytes)),
        MaterialKind::Paginated => scan_printable_runs(bytes),
    }
}

/// Crude text recovery from a paginated binary document.
///
/// Collects runs of printable ASCII and keeps the ones that look like prose:
/// long enough, containing spaces, mostly letters. No structure is recovered;
/// the output only has to be good enough to ground a prompt.
fn scan_printable_runs(bytes: &[u8]) -> String {
    let mut out = String::new();
    let mut run = String::new();
    for &b in bytes {
        if (0x20..0x7f).contains(&b) {
            run.push(b as char);
        } else {
            flush_run(&mut out, &mut run);
        }
    }
    flush_run(&mut out, &mut run);
    out
}

fn flush_run(out: &mut String, run: &mut String) {
    let trimmed = run.trim();
    let letters = trimmed.chars().filter(|c| c.is_ascii_alphabetic()).count();
    if trimmed.len() >= 12 && trimmed.contains(' ') && letters * 2 >= trimmed.len() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(trimmed);
    }
    run.clear();
}
