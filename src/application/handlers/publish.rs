//! Build and deploy a site.
//!
//! Deployment has an authentication precondition checked through the probe
//! port. The engine never authenticates anybody and never emits auth
//! commands; an unauthenticated user gets instructions, not commands.

use crate::domain::{extract, Command, CommandPlan, Intent, RequestContext};

use super::{resolve_site, HandlerDeps};

pub(crate) async fn handle(text: &str, ctx: &RequestContext, deps: &HandlerDeps<'_>) -> CommandPlan {
    let site = match resolve_site(Intent::Publish, ctx) {
        Ok(site) => site,
        Err(plan) => return plan,
    };

    let account = match deps.deploy_auth.whoami().await {
        Ok(account) => account,
        Err(e) => {
            tracing::warn!(error = %e, "deploy auth probe failed");
            None
        }
    };
    let Some(account) = account else {
        return CommandPlan::failure(
            Intent::Publish,
            "The deployment tool is not logged in, so nothing can be deployed.",
        )
        .with_next_steps(
            "Log in with the deployment tool first (deployctl login in your own terminal), \
             then ask again.",
        );
    };

    let domain = extract::domain(text)
        .unwrap_or_else(|| extract::derive_domain(&site, chrono::Utc::now().timestamp()));

    tracing::info!(%site, %account, %domain, "deploying");

    CommandPlan::success(
        Intent::Publish,
        format!("Building \"{}\" and deploying it to {} as {}.", site, domain, account),
    )
    .with_site(&site)
    .with_domain(&domain)
    .run_from_site_dir(true)
    .with_command(Command::shell("sitegen build"))
    .with_command(Command::shell(format!("deployctl deploy --domain {}", domain)))
}
