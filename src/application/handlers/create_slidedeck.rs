//! Create a slidedeck: one index page plus one page per slide.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::text::escape_for_shell;
use crate::domain::{extract, Command, CommandPlan, Intent, RequestContext, SlideOutline};

use super::{resolve_site, HandlerDeps};

static P_DECK_TOPIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:about|on|covering)\s+(.+?)\s*[.!?]?\s*$").expect("valid regex")
});

fn deck_topic(text: &str) -> Option<String> {
    extract::topic(text)
        .or_else(|| {
            P_DECK_TOPIC
                .captures(text)
                .and_then(|c| c.get(1).map(|m| m.as_str().trim().to_string()))
        })
        .or_else(|| extract::quoted(text))
        .filter(|t| !t.is_empty())
}

pub(crate) async fn handle(text: &str, ctx: &RequestContext, deps: &HandlerDeps<'_>) -> CommandPlan {
    let site = match resolve_site(Intent::CreateSlidedeck, ctx) {
        Ok(site) => site,
        Err(plan) => return plan,
    };

    let Some(topic) = deck_topic(text) else {
        return CommandPlan::clarification(
            Intent::CreateSlidedeck,
            "What should the slidedeck be about?",
            "Try: make a slidedeck about the French Revolution",
        );
    };

    // Phase one: the outline. A rejected or missing model outline falls back
    // to the fixed six-slide structure.
    let model_outline = super::super::generation::slide_outline(deps.provider, &topic).await;
    let outline_generated = model_outline.is_some();
    let outline = model_outline.unwrap_or_else(|| SlideOutline::fallback(&topic));

    let mut any_ai = outline_generated;

    let mut plan = CommandPlan::success(
        Intent::CreateSlidedeck,
        format!(
            "Creating a slidedeck \"{}\" with {} slides.",
            outline.title,
            outline.slides.len()
        ),
    )
    .with_site(&site)
    .with_page_title(&outline.title)
    .run_from_site_dir(true)
    .with_command(Command::shell(format!(
        "sitegen page add \"{}\" --content \"{}\"",
        outline.title,
        escape_for_shell(&deck_index_html(&outline))
    )));

    // Phase two: one body per slide, sequentially, each linked under the
    // index page.
    for slide in &outline.slides {
        let (body, ai_generated) =
            super::super::generation::slide_body(deps.provider, &outline.title, slide).await;
        any_ai |= ai_generated;

        plan = plan
            .with_command(Command::shell(format!(
                "sitegen page add \"{}\" --content \"{}\"",
                slide.title,
                escape_for_shell(&body)
            )))
            .with_command(Command::manifest_patch(&outline.title, &slide.title, 1));
    }

    plan.with_ai_generated(any_ai)
}

fn deck_index_html(outline: &SlideOutline) -> String {
    let mut html = format!(
        "<section class=\"slidedeck\"><h1>{}</h1><ol class=\"deck-index\">",
        outline.title
    );
    for slide in &outline.slides {
        html.push_str(&format!("<li>{}</li>", slide.title));
    }
    html.push_str("</ol></section>");
    html
}
