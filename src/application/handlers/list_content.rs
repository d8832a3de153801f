//! List a site's pages.

use crate::domain::{Command, CommandPlan, Intent, RequestContext};

use super::{resolve_site, HandlerDeps};

pub(crate) async fn handle(
    _text: &str,
    ctx: &RequestContext,
    _deps: &HandlerDeps<'_>,
) -> CommandPlan {
    let site = match resolve_site(Intent::ListContent, ctx) {
        Ok(site) => site,
        Err(plan) => return plan,
    };

    CommandPlan::success(
        Intent::ListContent,
        format!("Listing the structure of \"{}\".", site),
    )
    .with_site(&site)
    .run_from_site_dir(true)
    .with_command(Command::shell("sitegen manifest"))
}
