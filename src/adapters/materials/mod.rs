//! Material store adapters.

mod filesystem;
mod in_memory;

pub use filesystem::FilesystemMaterialStore;
pub use in_memory::InMemoryMaterialStore;
