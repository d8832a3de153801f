//! Capability summary.

use crate::domain::{CommandPlan, Intent, RequestContext};

use super::HandlerDeps;

pub(crate) async fn handle(
    _text: &str,
    ctx: &RequestContext,
    _deps: &HandlerDeps<'_>,
) -> CommandPlan {
    let mut explanation = String::from(
        "I turn plain requests into site commands. I can create sites, add pages \
         (single or several at once), nest pages under a parent, add components \
         like quizzes and timelines, build slidedecks, adapt a page for a new \
         audience, clone an existing website, list pages, preview locally, and \
         build and deploy.",
    );
    if !ctx.available_sites.is_empty() {
        explanation.push_str(&format!(
            " Your sites: {}.",
            ctx.available_sites.join(", ")
        ));
    }

    CommandPlan::success(Intent::Help, explanation).with_next_steps(
        "Try: create a site called my-course / add a page about photosynthesis / \
         add a quiz to the Intro page / make a slidedeck about the French Revolution / \
         deploy my site",
    )
}
