pub mod api;
pub mod errors;
pub mod metrics;
pub mod state;

pub use api::{RendererAdapter, SourceMatch};
pub use errors::RegistryError;
pub use state::RendererRegistry;
