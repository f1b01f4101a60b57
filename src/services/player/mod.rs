//! Player-side collaborators of the session connector.

/// Catalog-backed playback preparer
pub mod catalog;
/// In-memory player
pub mod memory;

pub use catalog::CatalogPreparer;
pub use memory::MemoryPlayer;
