//! Protection configuration

use protection_types::{CAPTURE_EVENT_NAME, ContentMode, DEFAULT_BACKGROUND_COLOR, TypesResult};
use serde::{Deserialize, Serialize};

/// Host-level defaults for the protection API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProtectionConfig {
    /// Event channel the notification bridge listens on
    pub event_name: String,
    /// Background behind image covers when the caller gives none
    pub default_background_color: String,
    /// Image cover layout when the caller gives none
    pub default_content_mode: ContentMode,
}

impl ProtectionConfig {
    pub fn from_json(json: &str) -> TypesResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            event_name: CAPTURE_EVENT_NAME.to_string(),
            default_background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            default_content_mode: ContentMode::ScaleAspectFit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = ProtectionConfig::from_json(r##"{"defaultBackgroundColor": "#101010"}"##)
            .unwrap();
        assert_eq!(config.default_background_color, "#101010");
        assert_eq!(config.event_name, "CaptureProtectionListener");
        assert_eq!(config.default_content_mode, ContentMode::ScaleAspectFit);
    }
}
