//! mediasession - keeps an OS media session in sync with a player.
//!
//! External controllers (lock screens, headset buttons, desktop shells,
//! voice assistants) talk to a media session. This crate projects a
//! player's state into such a session and routes the session's commands
//! back to the player:
//!
//! - [`SessionConnector`](services::SessionConnector) derives playback state
//!   and metadata on every player event and forwards commands
//! - [`InMemorySession`](services::InMemorySession) and
//!   [`MprisSession`](services::MprisSession) are the session backends
//! - [`MemoryPlayer`](services::MemoryPlayer) and
//!   [`CatalogPreparer`](services::CatalogPreparer) stand in for an engine
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mediasession::services::{
//!     CatalogPreparer, ExecutionContext, InMemorySession, MemoryPlayer, SessionConnector,
//!     TimelineQueueNavigator,
//! };
//!
//! # async fn run() -> mediasession::Result<()> {
//! let context = ExecutionContext::MAIN;
//! let player = Arc::new(MemoryPlayer::new(context));
//! let session = Arc::new(InMemorySession::new());
//! let preparer = Arc::new(CatalogPreparer::new(Arc::clone(&player), Vec::new()));
//!
//! let mut connector = SessionConnector::new(
//!     context,
//!     session.clone(),
//!     preparer,
//!     Arc::new(TimelineQueueNavigator::new()),
//! );
//! connector.set_player(Some(player))?;
//! tokio::spawn(connector.run());
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Session adapter, session backends and player collaborators.
pub mod services;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{Result, SessionError};
