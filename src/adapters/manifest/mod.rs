//! Manifest reader adapters.

mod filesystem;
mod in_memory;

pub use filesystem::FilesystemManifestReader;
pub use in_memory::InMemoryManifestReader;
