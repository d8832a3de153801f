//! Adapters - concrete implementations of the ports.

pub mod ai;
pub mod deploy;
pub mod manifest;
pub mod materials;
