// Scatter layout engine: places keyword segments in edge bands around a centered title.
// Pure and synchronous; every call owns its own occupancy state and random source.
// Handlers run it inside tokio::task::spawn_blocking.

pub mod compose;
pub mod error;
pub mod exclusion;
pub mod frame;
pub mod geometry;
pub mod grid;
pub mod handlers;
pub mod sampler;
pub mod search;
pub mod zones;

// Re-export the public API consumed by startup code and the error layer.
pub use error::LayoutError;
pub use frame::LayoutConfig;
