//! Workflow handlers, one module per intent.
//!
//! A handler converts input text plus request context into a [`CommandPlan`].
//! Handlers are infallible at the type level: I/O and provider problems are
//! converted into the failure/clarification plan shapes right here, nothing
//! propagates to the engine.

pub(crate) mod add_component;
pub(crate) mod add_multiple_pages;
pub(crate) mod add_page;
pub(crate) mod clone_site;
pub(crate) mod create_site;
pub(crate) mod create_slidedeck;
pub(crate) mod customize;
pub(crate) mod edit;
pub(crate) mod fallback;
pub(crate) mod help;
pub(crate) mod list_content;
pub(crate) mod preview;
pub(crate) mod publish;

use crate::config::GroundingConfig;
use crate::domain::{CommandPlan, ConversationTurn, Intent, RequestContext, ResourceSummary};
use crate::ports::{AiProvider, DeployAuth, ManifestReader, MaterialStore};

use super::grounding;

/// Everything a handler can reach beyond the request itself.
pub(crate) struct HandlerDeps<'a> {
    pub provider: Option<&'a dyn AiProvider>,
    pub manifests: &'a dyn ManifestReader,
    pub materials: &'a dyn MaterialStore,
    pub deploy_auth: &'a dyn DeployAuth,
    pub grounding: &'a GroundingConfig,
    pub history: &'a [ConversationTurn],
}

/// Resolves which site the request targets.
///
/// Current site wins; a single known site is used implicitly; otherwise the
/// user is asked (or told to create a site first). The `Err` side is a
/// complete plan ready to return.
pub(crate) fn resolve_site(intent: Intent, ctx: &RequestContext) -> Result<String, CommandPlan> {
    if let Some(site) = &ctx.current_site {
        return Ok(site.clone());
    }
    match ctx.available_sites.as_slice() {
        [] => Err(CommandPlan::failure(
            intent,
            "There are no sites yet, so there is nothing to work on.",
        )
        .with_next_steps("Try: create a site called my-course")),
        [only] => Ok(only.clone()),
        sites => Err(CommandPlan::clarification(
            intent,
            format!("Which site do you mean? You have: {}.", sites.join(", ")),
            format!("Say, for example: on {} please", sites[0]),
        )),
    }
}

/// Grounding summary for `site`: the pre-computed one when the context
/// carries it, otherwise built from the material store.
pub(crate) async fn grounding_summary(
    site: &str,
    ctx: &RequestContext,
    deps: &HandlerDeps<'_>,
) -> ResourceSummary {
    match &ctx.resource_summary {
        Some(summary) => summary.clone(),
        None => grounding::summarize(site, deps.materials, deps.grounding).await,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::ai::MockAiProvider;
    use crate::adapters::deploy::StaticDeployAuth;
    use crate::adapters::manifest::InMemoryManifestReader;
    use crate::adapters::materials::InMemoryMaterialStore;

    /// Owned bundle of mock adapters for handler unit tests.
    pub(crate) struct TestDeps {
        pub provider: Option<Arc<MockAiProvider>>,
        pub manifests: InMemoryManifestReader,
        pub materials: InMemoryMaterialStore,
        pub deploy_auth: StaticDeployAuth,
        pub grounding: GroundingConfig,
    }

    impl TestDeps {
        pub fn new() -> Self {
            Self {
                provider: None,
                manifests: InMemoryManifestReader::new(),
                materials: InMemoryMaterialStore::new(),
                deploy_auth: StaticDeployAuth::logged_out(),
                grounding: GroundingConfig::default(),
            }
        }

        pub fn deps(&self) -> HandlerDeps<'_> {
            HandlerDeps {
                provider: self.provider.as_deref().map(|p| p as &dyn AiProvider),
                manifests: &self.manifests,
                materials: &self.materials,
                deploy_auth: &self.deploy_auth,
                grounding: &self.grounding,
                history: &[],
            }
        }
    }

    pub(crate) fn ctx_with_site(site: &str) -> RequestContext {
        RequestContext::new("/tmp/sites")
            .with_sites(vec![site.to_string()])
            .with_current_site(site)
    }
}
