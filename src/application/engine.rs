//! The engine: one entry point from request text to command plan.

use std::sync::{Arc, Mutex, PoisonError};

use crate::config::{AppConfig, GroundingConfig};
use crate::domain::{
    classify, CommandPlan, ConversationHistory, ConversationTurn, Intent, RequestContext,
};
use crate::ports::{AiProvider, DeployAuth, ManifestReader, MaterialStore};

use super::handlers::{self, HandlerDeps};

/// Intent resolution and command synthesis engine.
///
/// Construct once, call [`Engine::process`] per request. `process` never
/// returns an error: every problem becomes a failure or clarification plan.
/// The generative provider is optional; without one the engine still handles
/// every intent through its deterministic paths.
pub struct Engine {
    provider: Option<Arc<dyn AiProvider>>,
    manifests: Arc<dyn ManifestReader>,
    materials: Arc<dyn MaterialStore>,
    deploy_auth: Arc<dyn DeployAuth>,
    grounding: GroundingConfig,
    history: Mutex<ConversationHistory>,
}

impl Engine {
    pub fn new(
        config: &AppConfig,
        manifests: Arc<dyn ManifestReader>,
        materials: Arc<dyn MaterialStore>,
        deploy_auth: Arc<dyn DeployAuth>,
        provider: Option<Arc<dyn AiProvider>>,
    ) -> Self {
        if let Some(provider) = &provider {
            let info = provider.provider_info();
            tracing::info!(provider = %info.name, model = %info.model, "engine has a generative provider");
        } else {
            tracing::info!("engine running without a generative provider");
        }
        Self {
            provider,
            manifests,
            materials,
            deploy_auth,
            grounding: config.grounding.clone(),
            history: Mutex::new(ConversationHistory::new(config.history_limit)),
        }
    }

    /// Resolves one request into a command plan.
    ///
    /// Calls are serialized by contract; each runs to completion before the
    /// next begins.
    pub async fn process(&self, input: &str, ctx: RequestContext) -> CommandPlan {
        let input = input.trim();
        if input.is_empty() {
            return CommandPlan::clarification(
                Intent::Unknown,
                "The request was empty.",
                "Tell me what to do, for example: add a page about photosynthesis",
            );
        }

        let intent = classify(input);
        tracing::info!(%intent, "classified request");

        // Snapshot before recording this turn, so the fallback prompt sees
        // only prior exchanges.
        let prior_turns = {
            let mut history = self.lock_history();
            let turns = history.turns();
            history.push(ConversationTurn::user(input));
            turns
        };

        let deps = HandlerDeps {
            provider: self.provider.as_deref(),
            manifests: self.manifests.as_ref(),
            materials: self.materials.as_ref(),
            deploy_auth: self.deploy_auth.as_ref(),
            grounding: &self.grounding,
            history: &prior_turns,
        };

        let plan = match intent {
            Intent::CreateSite => handlers::create_site::handle(input, &ctx, &deps).await,
            Intent::AddPage => handlers::add_page::handle(input, &ctx, &deps).await,
            Intent::AddMultiplePages => {
                handlers::add_multiple_pages::handle(input, &ctx, &deps).await
            }
            Intent::AddComponent => handlers::add_component::handle(input, &ctx, &deps).await,
            Intent::CreateSlidedeck => handlers::create_slidedeck::handle(input, &ctx, &deps).await,
            Intent::Customize => handlers::customize::handle(input, &ctx, &deps).await,
            Intent::CloneSite => handlers::clone_site::handle(input, &ctx, &deps).await,
            Intent::ListContent => handlers::list_content::handle(input, &ctx, &deps).await,
            Intent::Preview => handlers::preview::handle(input, &ctx, &deps).await,
            Intent::Publish => handlers::publish::handle(input, &ctx, &deps).await,
            Intent::Edit => handlers::edit::handle(input, &ctx, &deps).await,
            Intent::Help => handlers::help::handle(input, &ctx, &deps).await,
            Intent::Unknown => handlers::fallback::handle(input, &ctx, &deps).await,
        };

        self.lock_history()
            .push(ConversationTurn::assistant(plan.explanation.clone()));

        tracing::info!(
            action = %plan.action,
            success = plan.is_success(),
            commands = plan.commands().len(),
            "plan emitted"
        );
        plan
    }

    /// Drops all retained conversation turns.
    pub fn clear_history(&self) {
        self.lock_history().clear();
        tracing::debug!("conversation history cleared");
    }

    fn lock_history(&self) -> std::sync::MutexGuard<'_, ConversationHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
