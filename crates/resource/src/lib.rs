//! Resource provider implementations for the report pipeline.

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

// Re-export the contract so dependents only need this crate.
pub use reflow_traits::{
    InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData,
};
