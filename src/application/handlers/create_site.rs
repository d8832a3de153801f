//! Create a new site.

use crate::domain::{extract, Command, CommandPlan, Intent, RequestContext};

use super::HandlerDeps;

/// Theme names the site CLI ships with.
const KNOWN_THEMES: &[&str] = &["minimal", "dark", "classic", "modern", "playful"];

pub(crate) async fn handle(
    text: &str,
    ctx: &RequestContext,
    _deps: &HandlerDeps<'_>,
) -> CommandPlan {
    let Some(name) = extract::site_name(text) else {
        return CommandPlan::clarification(
            Intent::CreateSite,
            "What should the new site be called?",
            "Try: create a site called my-course, or: make a website named \"history-101\"",
        );
    };

    if !extract::is_valid_site_name(&name) {
        return CommandPlan::failure(
            Intent::CreateSite,
            format!(
                "\"{}\" is not a usable site name. Names may only contain letters, \
                 digits, hyphens, and underscores.",
                name
            ),
        )
        .with_next_steps(format!(
            "Try: create a site called {}",
            suggest_name(&name)
        ));
    }

    if ctx.has_site(&name) {
        return CommandPlan::failure(
            Intent::CreateSite,
            format!("A site called \"{}\" already exists.", name),
        );
    }

    let mut plan = CommandPlan::success(
        Intent::CreateSite,
        format!("Creating a new site called \"{}\".", name),
    )
    .with_site(&name)
    .with_command(Command::shell(format!("sitegen new {}", name)));

    if let Some(theme) = detect_theme(text) {
        plan = plan.with_command(Command::shell(format!("sitegen theme set {}", theme)));
        plan.explanation = format!(
            "Creating a new site called \"{}\" with the {} theme.",
            name, theme
        );
    }

    plan.with_next_steps("Next you can add pages, for example: add a page about your topic")
}

fn detect_theme(text: &str) -> Option<&'static str> {
    let lc = text.to_lowercase();
    KNOWN_THEMES
        .iter()
        .find(|theme| {
            lc.split(|c: char| !c.is_ascii_alphanumeric())
                .any(|word| word == **theme)
        })
        .copied()
}

fn suggest_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('-').to_string();
    if cleaned.is_empty() {
        "my-site".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::TestDeps;
    use super::*;

    fn ctx() -> RequestContext {
        RequestContext::new("/tmp/sites")
    }

    #[tokio::test]
    async fn creates_named_site() {
        let td = TestDeps::new();
        let plan = handle("create a site called my-course", &ctx(), &td.deps()).await;
        assert!(plan.is_success());
        assert_eq!(plan.rendered_commands(), vec!["sitegen new my-course"]);
        assert_eq!(plan.metadata.site_name.as_deref(), Some("my-course"));
    }

    #[tokio::test]
    async fn missing_name_asks_for_one() {
        let td = TestDeps::new();
        let plan = handle("create a site", &ctx(), &td.deps()).await;
        assert!(plan.is_success());
        assert!(plan.commands().is_empty());
        assert!(plan.next_steps.is_some());
    }

    #[tokio::test]
    async fn invalid_name_is_rejected_with_suggestion() {
        let td = TestDeps::new();
        let plan = handle("create a site called \"My Blog!\"", &ctx(), &td.deps()).await;
        assert!(!plan.is_success());
        assert!(plan.commands().is_empty());
        assert!(plan.next_steps.as_deref().unwrap().contains("my-blog"));
    }

    #[tokio::test]
    async fn existing_site_is_a_failure() {
        let td = TestDeps::new();
        let ctx = RequestContext::new("/tmp").with_sites(vec!["my-course".into()]);
        let plan = handle("create a site called my-course", &ctx, &td.deps()).await;
        assert!(!plan.is_success());
    }

    #[tokio::test]
    async fn theme_keyword_adds_theme_command() {
        let td = TestDeps::new();
        let plan = handle(
            "create a site called my-course with the dark theme",
            &ctx(),
            &td.deps(),
        )
        .await;
        let rendered = plan.rendered_commands();
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[1], "sitegen theme set dark");
    }
}
