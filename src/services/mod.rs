/// Shared reactive primitives
pub mod common;
/// MPRIS D-Bus session backend
pub mod mpris;
/// In-memory player and preparer
pub mod player;
/// Session adapter core
pub mod session;

pub use mpris::MprisSession;
pub use player::{CatalogPreparer, MemoryPlayer};
pub use session::{
    ConnectorHandle, ExecutionContext, InMemorySession, MediaSession, PlaybackPreparer, Player,
    QueueNavigator, SessionCommand, SessionConnector, TimelineQueueNavigator,
};
