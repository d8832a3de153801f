//! Sitepilot - Intent Resolution & Command Synthesis Engine
//!
//! This crate converts free-form website-authoring requests ("add a page
//! about photosynthesis", "make a slidedeck about the French Revolution",
//! "deploy my site") into ordered, escaped, executable command plans that an
//! external collaborator runs against a static-site CLI and a deployment CLI.
//! Content generation can be grounded in user-supplied course materials.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::Engine;
pub use config::AppConfig;
pub use domain::{Command, CommandPlan, Intent, RequestContext};
