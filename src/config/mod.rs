//! Configuration schema definitions and loading.
//!
//! Defines the configuration of the media session adapter: general settings,
//! the exported session's identity, and the catalog the debug tool serves.
//! All configurations are serializable to/from TOML format.

mod catalog;
mod general;
mod loading;
mod paths;
mod session;

#[cfg(test)]
mod tests;

pub use catalog::CatalogEntry;
pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use session::SessionConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Identity of the exported media session.
    #[serde(default)]
    pub session: SessionConfig,

    /// Items offered to controllers by the debug tool.
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}
