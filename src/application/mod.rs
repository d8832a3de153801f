//! Application layer - the engine, its handlers, and generation plumbing.

pub mod engine;
pub mod generation;
pub mod grounding;
mod handlers;
pub mod response_parser;

pub use engine::Engine;
