//! Add a component to an existing page.
//!
//! Components attach to pages; without a resolvable target page this is a
//! hard failure, not a clarification. The emitted command replaces the page
//! body with the existing body plus the new component markup.

use crate::domain::text::{escape_for_shell, strip_html};
use crate::domain::{extract, Command, CommandPlan, ComponentKind, Intent, RequestContext};

use super::{resolve_site, HandlerDeps};

pub(crate) async fn handle(text: &str, ctx: &RequestContext, deps: &HandlerDeps<'_>) -> CommandPlan {
    let kind = ComponentKind::detect(text).unwrap_or(ComponentKind::Generic);

    let site = match resolve_site(Intent::AddComponent, ctx) {
        Ok(site) => site,
        Err(plan) => return plan,
    };

    let manifest = match deps.manifests.load(&site).await {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::warn!(%site, error = %e, "manifest unavailable");
            return CommandPlan::failure(
                Intent::AddComponent,
                format!("The structure of \"{}\" could not be read: {}.", site, e),
            );
        }
    };

    let reference = extract::component_target(text).or_else(|| extract::quoted(text));
    let Some(reference) = reference else {
        let mut plan = CommandPlan::failure(
            Intent::AddComponent,
            format!("A {} has to go on an existing page, and none was named.", kind),
        );
        if !manifest.pages.is_empty() {
            let titles: Vec<&str> = manifest.pages.iter().map(|p| p.title.as_str()).collect();
            plan = plan.with_next_steps(format!(
                "Name a target page, for example: add a {} to the {} page. Pages: {}",
                kind,
                titles[0],
                titles.join(", ")
            ));
        }
        return plan;
    };

    let Some(page) = manifest.find_page(&reference) else {
        let suggestions = manifest.closest_titles(&reference, 3);
        let mut plan = CommandPlan::failure(
            Intent::AddComponent,
            format!("No page matches \"{}\".", reference),
        );
        if !suggestions.is_empty() {
            plan = plan.with_next_steps(format!("Did you mean: {}?", suggestions.join(", ")));
        }
        return plan;
    };

    let body = page.body.clone().unwrap_or_default();
    let topic = extract::topic(text).unwrap_or_else(|| page.title.clone());

    let (component_html, ai_generated) = match kind {
        ComponentKind::Quiz => {
            // Ground the question in what the page actually says.
            let source = strip_html(&body);
            super::super::generation::quiz_html(deps.provider, &source, &topic).await
        }
        other => (super::super::generation::component_skeleton(other, &topic), false),
    };

    let combined = format!("{}{}", body, component_html);

    CommandPlan::success(
        Intent::AddComponent,
        format!("Adding a {} to the \"{}\" page.", kind, page.title),
    )
    .with_site(&site)
    .with_page_title(&page.title)
    .with_ai_generated(ai_generated)
    .run_from_site_dir(true)
    .with_command(Command::shell(format!(
        "sitegen page update \"{}\" --content \"{}\"",
        page.title,
        escape_for_shell(&combined)
    )))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ctx_with_site, TestDeps};
    use super::*;
    use crate::adapters::ai::MockAiProvider;
    use crate::adapters::manifest::InMemoryManifestReader;
    use crate::domain::{ManifestPage, SiteManifest};
    use std::sync::Arc;

    fn seeded() -> TestDeps {
        let mut td = TestDeps::new();
        td.manifests = InMemoryManifestReader::new().with_site(
            "bio",
            SiteManifest {
                pages: vec![
                    ManifestPage::new("Intro").with_body("<p>Cells divide.</p>"),
                    ManifestPage::new("Labs"),
                ],
            },
        );
        td
    }

    #[tokio::test]
    async fn quiz_appends_to_existing_body() {
        let td = seeded();
        let plan = handle("add a quiz to the Intro page", &ctx_with_site("bio"), &td.deps()).await;
        assert!(plan.is_success());
        let rendered = plan.rendered_commands();
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].starts_with("sitegen page update \"Intro\""));
        assert!(rendered[0].contains("Cells divide."));
        assert!(rendered[0].contains("quiz"));
    }

    #[tokio::test]
    async fn missing_target_is_hard_failure() {
        let td = seeded();
        let plan = handle("add a quiz about biology", &ctx_with_site("bio"), &td.deps()).await;
        assert!(!plan.is_success());
        assert!(plan.commands().is_empty());
        assert!(plan.next_steps.as_deref().unwrap().contains("Intro"));
    }

    #[tokio::test]
    async fn unknown_target_fails_with_suggestions() {
        let td = seeded();
        let plan = handle(
            "add a quiz to the Overview page",
            &ctx_with_site("bio"),
            &td.deps(),
        )
        .await;
        assert!(!plan.is_success());
        assert!(plan.commands().is_empty());
    }

    #[tokio::test]
    async fn grounds_quiz_in_page_body() {
        let mut td = seeded();
        td.provider = Some(Arc::new(MockAiProvider::new().with_response(
            "Q: What divides?\nA) Cells *\nB) Rocks\nC) Stars\nD) Roads",
        )));
        let plan = handle("add a quiz to the Intro page", &ctx_with_site("bio"), &td.deps()).await;
        assert!(plan.metadata.ai_generated);
        let calls = td.provider.as_ref().unwrap().get_calls();
        assert!(calls[0].messages[0].content.contains("Cells divide."));
        assert!(plan.rendered_commands()[0].contains("What divides?"));
    }

    #[tokio::test]
    async fn non_quiz_kinds_use_skeletons() {
        let td = seeded();
        let plan = handle(
            "put a timeline on the Labs page",
            &ctx_with_site("bio"),
            &td.deps(),
        )
        .await;
        assert!(plan.is_success());
        assert!(plan.rendered_commands()[0].contains("timeline"));
        assert!(!plan.metadata.ai_generated);
    }
}
