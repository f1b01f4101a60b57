use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity of the exported media session
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Human-readable name shown by controllers
    pub identity: String,

    /// Suffix of the `org.mpris.MediaPlayer2.*` bus name
    pub bus_name: String,

    /// Desktop entry name, without the `.desktop` extension
    pub desktop_entry: Option<String>,

    /// Uri schemes accepted by `OpenUri`
    pub supported_uri_schemes: Vec<String>,

    /// Mime types the player can handle
    pub supported_mime_types: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            identity: "mediasession".to_string(),
            bus_name: "mediasession".to_string(),
            desktop_entry: None,
            supported_uri_schemes: vec![
                "file".to_string(),
                "http".to_string(),
                "https".to_string(),
            ],
            supported_mime_types: vec![
                "audio/mpeg".to_string(),
                "audio/flac".to_string(),
                "audio/ogg".to_string(),
            ],
        }
    }
}
