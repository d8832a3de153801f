//! Customize an existing page for a stated purpose.
//!
//! The source page stays untouched; a rewritten copy is created and linked
//! under it. The new title is derived lexically when the purpose swaps an
//! audience adjective ("Dutch Recipes" for a French audience becomes "French
//! Recipes"), otherwise the purpose is appended.

use crate::domain::text::{escape_for_shell, sanitize_title, strip_html};
use crate::domain::{extract, Command, CommandPlan, Intent, RequestContext};
use crate::ports::{AiProvider, CompletionRequest, Message};

use super::{resolve_site, HandlerDeps};

/// Audience adjectives recognized by the title-substitution rule.
const AUDIENCE_ADJECTIVES: &[&str] = &[
    "dutch", "french", "german", "spanish", "italian", "english", "american", "british",
    "japanese", "chinese", "mexican", "indian", "greek", "brazilian", "canadian",
    "beginner", "advanced", "novice", "expert",
];

pub(crate) async fn handle(text: &str, ctx: &RequestContext, deps: &HandlerDeps<'_>) -> CommandPlan {
    let Some((reference, purpose)) = extract::customization(text) else {
        return CommandPlan::clarification(
            Intent::Customize,
            "Which page should be adapted, and for what audience or purpose?",
            "Try: customize the Dutch Recipes page for a French audience",
        );
    };

    let site = match resolve_site(Intent::Customize, ctx) {
        Ok(site) => site,
        Err(plan) => return plan,
    };

    let manifest = match deps.manifests.load(&site).await {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::warn!(%site, error = %e, "manifest unavailable");
            return CommandPlan::failure(
                Intent::Customize,
                format!("The structure of \"{}\" could not be read: {}.", site, e),
            );
        }
    };

    let Some(source) = manifest.find_page(&reference) else {
        let suggestions = manifest.closest_titles(&reference, 3);
        let mut plan = CommandPlan::failure(
            Intent::Customize,
            format!("No page matches \"{}\".", reference),
        );
        if !suggestions.is_empty() {
            plan = plan.with_next_steps(format!("Did you mean: {}?", suggestions.join(", ")));
        }
        return plan;
    };

    let plain = strip_html(source.body.as_deref().unwrap_or_default());
    let (content, ai_generated) = rewrite(deps.provider, &plain, &purpose).await;
    let content = if content.is_empty() {
        format!("<p>An adaptation of {} for {}.</p>", source.title, purpose)
    } else {
        content
    };

    let new_title = derive_title(&source.title, &purpose);
    let parent_title = source.title.clone();
    let depth = source.indent.saturating_add(1);

    CommandPlan::success(
        Intent::Customize,
        format!(
            "Creating \"{}\", an adaptation of \"{}\" for {}.",
            new_title, parent_title, purpose
        ),
    )
    .with_site(&site)
    .with_page_title(&new_title)
    .with_ai_generated(ai_generated)
    .run_from_site_dir(true)
    .with_command(Command::shell(format!(
        "sitegen page add \"{}\" --content \"{}\"",
        new_title,
        escape_for_shell(&content)
    )))
    .with_command(Command::manifest_patch(&parent_title, &new_title, depth))
}

async fn rewrite(
    provider: Option<&dyn AiProvider>,
    plain: &str,
    purpose: &str,
) -> (String, bool) {
    let Some(provider) = provider else {
        return (wrap_plain(plain), false);
    };
    if plain.trim().is_empty() {
        return (String::new(), false);
    }

    let prompt = format!(
        "Rewrite the following text for {}. Keep the same structure, length, \
         and tone; change only what the new audience needs changed. \
         Plain text only, paragraphs separated by blank lines.\n\n{}",
        purpose, plain
    );
    let request = CompletionRequest::new()
        .with_message(Message::user(prompt))
        .with_max_tokens(2048);

    match provider.complete(request).await {
        Ok(response) => (wrap_plain(&response.content), true),
        Err(e) => {
            tracing::warn!(error = %e, "rewrite failed, keeping source text");
            (wrap_plain(plain), false)
        }
    }
}

fn wrap_plain(text: &str) -> String {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", p))
        .collect()
}

/// New page title: swap the audience adjective when both the source title and
/// the purpose carry one, otherwise append the purpose.
fn derive_title(original: &str, purpose: &str) -> String {
    let purpose_adj = find_adjective(purpose);
    let original_adj = find_adjective(original);

    if let (Some(from), Some(to)) = (original_adj, purpose_adj) {
        if from != to {
            let swapped: Vec<String> = original
                .split_whitespace()
                .map(|word| {
                    if word.to_lowercase() == from {
                        extract::title_case(to)
                    } else {
                        word.to_string()
                    }
                })
                .collect();
            return swapped.join(" ");
        }
    }
    sanitize_title(&format!("{} - {}", original, extract::title_case(purpose)))
}

fn find_adjective(text: &str) -> Option<&'static str> {
    let lc = text.to_lowercase();
    AUDIENCE_ADJECTIVES
        .iter()
        .find(|adj| lc.split(|c: char| !c.is_alphanumeric()).any(|w| w == **adj))
        .copied()
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
            "cooking",
            SiteManifest {
                pages: vec![ManifestPage::new("Dutch Recipes")
                    .with_body("<p>Stamppot is a classic.</p>")],
            },
        );
        td
    }

    #[test]
    fn adjective_swap_derives_title() {
        assert_eq!(
            derive_title("Dutch Recipes", "a French audience"),
            "French Recipes"
        );
        assert_eq!(
            derive_title("Beginner Guide", "advanced readers"),
            "Advanced Guide"
        );
    }

    #[test]
    fn no_adjective_appends_purpose() {
        assert_eq!(
            derive_title("Recipes", "vegetarians"),
            "Recipes Vegetarians"
        );
    }

    #[tokio::test]
    async fn emits_creation_and_link_under_source() {
        let td = seeded();
        let plan = handle(
            "customize the Dutch Recipes page for a French audience",
            &ctx_with_site("cooking"),
            &td.deps(),
        )
        .await;
        assert!(plan.is_success());
        let rendered = plan.rendered_commands();
        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].starts_with("sitegen page add \"French Recipes\""));
        assert!(rendered[1].contains("'dutch recipes'"));
        assert!(rendered[1].contains("'french recipes'"));
    }

    #[tokio::test]
    async fn provider_rewrite_is_used() {
        let mut td = seeded();
        td.provider = Some(Arc::new(
            MockAiProvider::new().with_response("Cassoulet is a classic."),
        ));
        let plan = handle(
            "customize the Dutch Recipes page for a French audience",
            &ctx_with_site("cooking"),
            &td.deps(),
        )
        .await;
        assert!(plan.metadata.ai_generated);
        assert!(plan.rendered_commands()[0].contains("Cassoulet"));
        let calls = td.provider.as_ref().unwrap().get_calls();
        assert!(calls[0].messages[0].content.contains("Stamppot is a classic."));
    }

    #[tokio::test]
    async fn unknown_source_page_fails() {
        let td = seeded();
        let plan = handle(
            "customize the Desserts page for kids",
            &ctx_with_site("cooking"),
            &td.deps(),
        )
        .await;
        assert!(!plan.is_success());
        assert!(plan.commands().is_empty());
    }

    #[tokio::test]
    async fn vague_request_asks_for_details() {
        let td = seeded();
        let plan = handle("customize it", &ctx_with_site("cooking"), &td.deps()).await;
        assert!(plan.is_success());
        assert!(plan.commands().is_empty());
    }
}
