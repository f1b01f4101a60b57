/// Exported MPRIS D-Bus interfaces
pub mod interface;
/// MPRIS-backed media session
pub mod session;
/// MPRIS utility functions
pub mod utils;

pub use interface::{MPRIS_PATH, PlayerInterface, RootInterface};
pub use session::MprisSession;
