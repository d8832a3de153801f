//! Open a page for editing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::text::sanitize_title;
use crate::domain::{extract, Command, CommandPlan, Intent, RequestContext};

use super::{resolve_site, HandlerDeps};

static P_EDIT_TARGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:edit|change|modify|update|open)\s+(?:the\s+)?(.+?)(?:\s+page)?\s*[.!?]?\s*$")
        .expect("valid regex")
});

/// Words that name the site as a whole rather than a page.
const NON_PAGE_WORDS: &[&str] = &["site", "my site", "content", "page", "text", "title", "it"];

fn edit_target(text: &str) -> Option<String> {
    let raw = extract::quoted(text).or_else(|| {
        P_EDIT_TARGET
            .captures(text)
            .and_then(|c| c.get(1).map(|m| m.as_str().trim().to_string()))
    })?;
    let cleaned = sanitize_title(&raw);
    if cleaned.is_empty() || NON_PAGE_WORDS.contains(&cleaned.to_lowercase().as_str()) {
        None
    } else {
        Some(cleaned)
    }
}

pub(crate) async fn handle(text: &str, ctx: &RequestContext, deps: &HandlerDeps<'_>) -> CommandPlan {
    let site = match resolve_site(Intent::Edit, ctx) {
        Ok(site) => site,
        Err(plan) => return plan,
    };

    let Some(reference) = edit_target(text) else {
        return CommandPlan::clarification(
            Intent::Edit,
            "Which page should be opened for editing?",
            "Try: edit the About page",
        );
    };

    match deps.manifests.load(&site).await {
        Ok(manifest) => match manifest.find_page(&reference) {
            Some(page) => CommandPlan::success(
                Intent::Edit,
                format!("Opening \"{}\" for editing.", page.title),
            )
            .with_site(&site)
            .with_page_title(&page.title)
            .run_from_site_dir(true)
            .with_command(Command::shell(format!("sitegen open {}", page.slug))),
            None => {
                let suggestions = manifest.closest_titles(&reference, 3);
                let mut plan = CommandPlan::failure(
                    Intent::Edit,
                    format!("No page matches \"{}\".", reference),
                );
                if !suggestions.is_empty() {
                    plan = plan.with_next_steps(format!("Did you mean: {}?", suggestions.join(", ")));
                }
                plan
            }
        },
        Err(e) => {
            tracing::warn!(%site, error = %e, "manifest unavailable");
            CommandPlan::failure(
                Intent::Edit,
                format!("The structure of \"{}\" could not be read: {}.", site, e),
            )
        }
    }
}
