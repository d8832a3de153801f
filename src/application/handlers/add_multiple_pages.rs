//! Add several pages in one request.

use crate::domain::text::{escape_for_shell, sanitize_title};
use crate::domain::{extract, Command, CommandPlan, Intent, RequestContext};

use super::{grounding_summary, resolve_site, HandlerDeps};

pub(crate) async fn handle(text: &str, ctx: &RequestContext, deps: &HandlerDeps<'_>) -> CommandPlan {
    let Some(specs) = extract::multiple_pages(text) else {
        return CommandPlan::clarification(
            Intent::AddMultiplePages,
            "Which pages should be added? List at least two titles.",
            "Try: add pages called Intro and Outro, or: create pages about volcanoes, earthquakes and tsunamis",
        );
    };

    let site = match resolve_site(Intent::AddMultiplePages, ctx) {
        Ok(site) => site,
        Err(plan) => return plan,
    };

    let summary = grounding_summary(&site, ctx, deps).await;

    let mut titles = Vec::new();
    let mut any_ai = false;
    let mut plan = CommandPlan::success(Intent::AddMultiplePages, String::new())
        .with_site(&site)
        .run_from_site_dir(true);

    for spec in &specs {
        let title = sanitize_title(&spec.title);
        if title.is_empty() {
            continue;
        }
        // Content is generated per page, independently; one page failing
        // over to the fallback does not affect the others.
        let topic = spec.topic.clone().unwrap_or_else(|| title.clone());
        let (content, ai_generated) = super::super::generation::page_content(
            deps.provider,
            &summary,
            &topic,
        )
        .await;
        any_ai |= ai_generated;

        plan = plan.with_command(Command::shell(format!(
            "sitegen page add \"{}\" --content \"{}\"",
            title,
            escape_for_shell(&content)
        )));
        titles.push(title);
    }

    if titles.len() < 2 {
        return CommandPlan::clarification(
            Intent::AddMultiplePages,
            "Fewer than two usable page titles were found in that request.",
            "Try: add pages called Intro and Outro",
        );
    }

    plan.explanation = format!("Adding {} pages: {}.", titles.len(), titles.join(", "));
    plan.with_ai_generated(any_ai)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ctx_with_site, TestDeps};
    use super::*;
    use crate::adapters::ai::MockAiProvider;
    use std::sync::Arc;

    #[tokio::test]
    async fn one_creation_command_per_page() {
        let td = TestDeps::new();
        let plan = handle(
            "create pages about volcanoes, earthquakes and tsunamis",
            &ctx_with_site("geo"),
            &td.deps(),
        )
        .await;
        assert!(plan.is_success());
        let rendered = plan.rendered_commands();
        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].contains("\"Volcanoes\""));
        assert!(rendered[2].contains("\"Tsunamis\""));
    }

    #[tokio::test]
    async fn content_generated_per_page() {
        let mut td = TestDeps::new();
        td.provider = Some(Arc::new(
            MockAiProvider::new()
                .with_response("i1\n\ni2\n\ni3")
                .with_response("o1\n\no2\n\no3"),
        ));
        let plan = handle(
            "add pages called Intro and Outro",
            &ctx_with_site("bio"),
            &td.deps(),
        )
        .await;
        assert!(plan.metadata.ai_generated);
        assert_eq!(td.provider.as_ref().unwrap().call_count(), 2);
        let rendered = plan.rendered_commands();
        assert!(rendered[0].contains("i1"));
        assert!(rendered[1].contains("o1"));
    }

    #[tokio::test]
    async fn no_titles_asks_for_a_list() {
        let td = TestDeps::new();
        let plan = handle("add pages", &ctx_with_site("bio"), &td.deps()).await;
        assert!(plan.is_success());
        assert!(plan.commands().is_empty());
        assert!(plan.next_steps.is_some());
    }
}
