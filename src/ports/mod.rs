//! Ports - interfaces the engine needs from the outside world.

mod ai_provider;
mod deploy_auth;
mod manifest;
mod materials;

pub use ai_provider::{
    AiError, AiProvider, CompletionRequest, CompletionResponse, Message, MessageRole, ProviderInfo,
};
pub use deploy_auth::{DeployAuth, DeployAuthError};
pub use manifest::{ManifestError, ManifestReader};
pub use materials::{MaterialDoc, MaterialError, MaterialKind, MaterialRecord, MaterialStore};
