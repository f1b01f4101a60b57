//! Media session adapter.
//!
//! Projects a player's state into an OS-level media session and forwards the
//! session's commands back to the player and its collaborators.

/// Action, flag and event bit sets
pub mod actions;
/// Inbound session commands
pub mod commands;
/// The session connector and its run loop
pub mod connector;
/// Execution context identity
pub mod context;
/// In-process session backend
pub mod memory;
/// Metadata projection and providers
pub mod metadata;
/// Timeline-based queue navigation
pub mod navigator;
/// Playback state derivation
pub mod state;
/// Session, player and collaborator traits
pub mod traits;
/// Shared value types
pub mod types;

#[cfg(test)]
mod tests;

pub use actions::*;
pub use commands::*;
pub use connector::*;
pub use context::*;
pub use memory::*;
pub use metadata::*;
pub use navigator::*;
pub use traits::*;
pub use types::*;
