//! Add a single page, optionally nested under a parent.

use crate::domain::text::{escape_for_shell, sanitize_title};
use crate::domain::{extract, Command, CommandPlan, Intent, RequestContext};

use super::{add_multiple_pages, grounding_summary, resolve_site, HandlerDeps};

pub(crate) async fn handle(text: &str, ctx: &RequestContext, deps: &HandlerDeps<'_>) -> CommandPlan {
    // "a page about X and Y" classifies as single-page; the extraction tells
    // us the user actually listed several titles.
    if extract::multiple_pages(text).is_some() {
        return add_multiple_pages::handle(text, ctx, deps).await;
    }

    let site = match resolve_site(Intent::AddPage, ctx) {
        Ok(site) => site,
        Err(plan) => return plan,
    };

    let title = extract::page_title(text).map(|t| sanitize_title(&t)).unwrap_or_default();
    if title.is_empty() {
        return CommandPlan::clarification(
            Intent::AddPage,
            "What should the page be called, or what should it be about?",
            "Try: add a page called Field Trips, or: add a page about photosynthesis",
        );
    }

    let mut parent: Option<(String, u8)> = None;
    if let Some(reference) = extract::parent_reference(text) {
        match deps.manifests.load(&site).await {
            Ok(manifest) => match manifest.find_page(&reference) {
                Some(page) => parent = Some((page.title.clone(), page.indent.saturating_add(1))),
                None => {
                    let suggestions = manifest.closest_titles(&reference, 3);
                    let mut plan = CommandPlan::failure(
                        Intent::AddPage,
                        format!("There is no page matching \"{}\" to nest under.", reference),
                    );
                    if !suggestions.is_empty() {
                        plan = plan.with_next_steps(format!(
                            "Did you mean one of: {}?",
                            suggestions.join(", ")
                        ));
                    }
                    return plan;
                }
            },
            Err(e) => {
                // Manifest unavailable; emit the patch anyway and let the
                // rendered script no-op if the parent never existed.
                tracing::debug!(%site, error = %e, "manifest unavailable for parent check");
                parent = Some((reference, 1));
            }
        }
    }

    let topic = extract::topic(text).unwrap_or_else(|| title.clone());
    let summary = grounding_summary(&site, ctx, deps).await;
    let (content, ai_generated) = super::super::generation::page_content(
        deps.provider,
        &summary,
        &topic,
    )
    .await;

    let mut plan = CommandPlan::success(
        Intent::AddPage,
        match &parent {
            Some((parent_title, _)) => {
                format!("Adding a page called \"{}\" under \"{}\".", title, parent_title)
            }
            None => format!("Adding a page called \"{}\".", title),
        },
    )
    .with_site(&site)
    .with_page_title(&title)
    .with_ai_generated(ai_generated)
    .run_from_site_dir(true)
    .with_command(Command::shell(format!(
        "sitegen page add \"{}\" --content \"{}\"",
        title,
        escape_for_shell(&content)
    )));

    if let Some((parent_title, depth)) = parent {
        plan = plan.with_command(Command::manifest_patch(&parent_title, &title, depth));
    }
    plan
}
