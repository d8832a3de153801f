//! Preview a site locally.

use crate::domain::{Command, CommandPlan, Intent, RequestContext};

use super::{resolve_site, HandlerDeps};

pub(crate) async fn handle(
    _text: &str,
    ctx: &RequestContext,
    _deps: &HandlerDeps<'_>,
) -> CommandPlan {
    let site = match resolve_site(Intent::Preview, ctx) {
        Ok(site) => site,
        Err(plan) => return plan,
    };

    CommandPlan::success(
        Intent::Preview,
        format!("Starting a local preview of \"{}\".", site),
    )
    .with_site(&site)
    .run_from_site_dir(true)
    .with_command(Command::shell("sitegen serve"))
    .with_next_steps("Stop the preview with Ctrl-C when you are done.")
}
