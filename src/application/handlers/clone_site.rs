//! Clone an existing website by URL.

use crate::domain::{extract, Command, CommandPlan, Intent, RequestContext};

use super::HandlerDeps;

pub(crate) async fn handle(
    text: &str,
    ctx: &RequestContext,
    _deps: &HandlerDeps<'_>,
) -> CommandPlan {
    let Some(url) = extract::url(text) else {
        return CommandPlan::clarification(
            Intent::CloneSite,
            "Which site should be cloned? A full URL is needed.",
            "Try: clone https://example.com called my-copy",
        );
    };

    let name = extract::site_name(text)
        .unwrap_or_else(|| extract::derive_site_name(&url, chrono::Utc::now().timestamp()));

    if !extract::is_valid_site_name(&name) {
        return CommandPlan::failure(
            Intent::CloneSite,
            format!(
                "\"{}\" is not a usable site name. Names may only contain letters, \
                 digits, hyphens, and underscores.",
                name
            ),
        );
    }

    if ctx.has_site(&name) {
        return CommandPlan::failure(
            Intent::CloneSite,
            format!("A site called \"{}\" already exists, so the clone would overwrite it.", name),
        )
        .with_next_steps(format!("Try: clone {} as a site called {}-copy", url, name));
    }

    CommandPlan::success(
        Intent::CloneSite,
        format!("Cloning {} into a new site called \"{}\".", url, name),
    )
    .with_site(&name)
    .with_command(Command::shell(format!(
        "sitegen import {} --name {}",
        url, name
    )))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::TestDeps;
    use super::*;

    #[tokio::test]
    async fn clones_with_explicit_name() {
        let td = TestDeps::new();
        let ctx = RequestContext::new("/tmp");
        let plan = handle(
            "clone https://example.com/course called my-copy",
            &ctx,
            &td.deps(),
        )
        .await;
        assert!(plan.is_success());
        assert_eq!(
            plan.rendered_commands(),
            vec!["sitegen import https://example.com/course --name my-copy"]
        );
    }

    #[tokio::test]
    async fn derives_name_from_host_when_absent() {
        let td = TestDeps::new();
        let ctx = RequestContext::new("/tmp");
        let plan = handle("import https://www.example.org please", &ctx, &td.deps()).await;
        assert!(plan.is_success());
        let rendered = plan.rendered_commands();
        assert!(rendered[0].contains("--name wwwexampleorg-"));
    }

    #[tokio::test]
    async fn missing_url_asks_for_one() {
        let td = TestDeps::new();
        let ctx = RequestContext::new("/tmp");
        let plan = handle("clone that cool website", &ctx, &td.deps()).await;
        assert!(plan.is_success());
        assert!(plan.commands().is_empty());
    }

    #[tokio::test]
    async fn clarification_example_phrasing_is_honored() {
        let td = TestDeps::new();
        let ctx = RequestContext::new("/tmp");
        let ask = handle("clone that cool website", &ctx, &td.deps()).await;
        // Following the suggested phrasing must use the name it shows.
        let example = ask
            .next_steps
            .as_deref()
            .unwrap()
            .trim_start_matches("Try: ")
            .to_string();
        let plan = handle(&example, &ctx, &td.deps()).await;
        assert_eq!(
            plan.rendered_commands(),
            vec!["sitegen import https://example.com --name my-copy"]
        );
    }

    #[tokio::test]
    async fn name_collision_is_a_failure() {
        let td = TestDeps::new();
        let ctx = RequestContext::new("/tmp").with_sites(vec!["my-copy".into()]);
        let plan = handle(
            "clone https://example.com called my-copy",
            &ctx,
            &td.deps(),
        )
        .await;
        assert!(!plan.is_success());
        assert!(plan.commands().is_empty());
    }
}
