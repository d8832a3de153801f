//! Generative fallback for requests no rule matched.
//!
//! With a provider configured, the conversation (history plus the new
//! request) is handed to the model with instructions to answer in a JSON
//! envelope; the reply goes through the staged response parser and only
//! recognized CLI invocations survive. Without a provider, or when the
//! provider fails, the user gets suggestions instead.

use crate::domain::{Command, CommandPlan, Intent, RequestContext};
use crate::ports::{CompletionRequest, Message};

use super::super::response_parser;
use super::HandlerDeps;

const SYSTEM_PROMPT: &str = "You convert website-authoring requests into commands for two CLIs. \
sitegen: new <site>, page add \"<Title>\" --content \"<html>\", page update \"<Title>\" --content \"<html>\", \
theme set <theme>, import <url> --name <site>, build, serve, manifest, open <page>. \
deployctl: deploy --domain <domain>. \
Respond with only a JSON object: {\"explanation\": \"...\", \"commands\": [\"...\"], \"next_steps\": \"...\"}. \
Use an empty commands array when no command applies. Never invent other tools.";

pub(crate) async fn handle(text: &str, ctx: &RequestContext, deps: &HandlerDeps<'_>) -> CommandPlan {
    let Some(provider) = deps.provider else {
        return suggestions(ctx);
    };

    let request = CompletionRequest::new()
        .with_system_prompt(SYSTEM_PROMPT)
        .with_history(deps.history)
        .with_message(Message::user(text))
        .with_max_tokens(1024);

    let response = match provider.complete(request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "fallback generation failed");
            return suggestions(ctx);
        }
    };

    let parsed = response_parser::parse_fallback_response(&response.content);
    tracing::info!(commands = parsed.commands.len(), "fallback reply parsed");

    let mut plan = CommandPlan::success(Intent::Unknown, parsed.explanation)
        .with_ai_generated(!parsed.commands.is_empty());
    for command in parsed.commands {
        plan = plan.with_command(Command::shell(command));
    }
    if let Some(next) = parsed.next_steps {
        plan = plan.with_next_steps(next);
    }
    if let Some(site) = &ctx.current_site {
        plan = plan.with_site(site).run_from_site_dir(true);
    }
    plan
}

fn suggestions(ctx: &RequestContext) -> CommandPlan {
    let mut explanation =
        String::from("I could not map that request onto anything I know how to do.");
    if !ctx.available_sites.is_empty() {
        explanation.push_str(&format!(" Your sites: {}.", ctx.available_sites.join(", ")));
    }
    CommandPlan::success(Intent::Unknown, explanation).with_next_steps(
        "Try: create a site called my-course / add a page about photosynthesis / \
         add a quiz to the Intro page / deploy my site",
    )
}
