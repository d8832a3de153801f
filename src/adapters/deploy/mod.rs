//! Deployment auth probe adapters.

mod cli_probe;

pub use cli_probe::{CliDeployAuth, StaticDeployAuth};
