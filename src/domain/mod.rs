//! Domain layer - pure types and pure logic, no I/O.

pub mod context;
pub mod extract;
pub mod history;
pub mod intent;
pub mod manifest;
pub mod plan;
pub mod quiz;
pub mod resources;
pub mod rules;
pub mod slides;
pub mod text;

pub use context::RequestContext;
pub use history::{ConversationHistory, ConversationTurn, TurnRole};
pub use intent::{ComponentKind, Intent};
pub use manifest::{ManifestPage, SiteManifest};
pub use plan::{Command, CommandPlan, PlanMetadata};
pub use quiz::{Quiz, QuizChoice, QuizParseError};
pub use resources::{ResourceSummary, ResourceUrl};
pub use rules::classify;
pub use slides::{Slide, SlideOutline};
