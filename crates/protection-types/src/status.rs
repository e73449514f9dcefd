//! Protection status reported back to callers

use serde::{Deserialize, Serialize};

use crate::Surface;

/// Per-surface protection state. `None` means the platform did not answer
/// or cannot report that surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionStatus {
    pub record: Option<bool>,
    pub app_switcher: Option<bool>,
    pub screenshot: Option<bool>,
}

impl ProtectionStatus {
    /// Status with no surface answered
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Same value for every surface, for platforms that cannot tell them apart
    pub fn uniform(value: Option<bool>) -> Self {
        Self {
            record: value,
            app_switcher: value,
            screenshot: value,
        }
    }

    pub fn get(&self, surface: Surface) -> Option<bool> {
        match surface {
            Surface::Record => self.record,
            Surface::AppSwitcher => self.app_switcher,
            Surface::Screenshot => self.screenshot,
        }
    }

    pub fn set(&mut self, surface: Surface, value: Option<bool>) {
        match surface {
            Surface::Record => self.record = value,
            Surface::AppSwitcher => self.app_switcher = value,
            Surface::Screenshot => self.screenshot = value,
        }
    }

    /// Whether no surface was answered
    pub fn is_unknown(&self) -> bool {
        self.record.is_none() && self.app_switcher.is_none() && self.screenshot.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_status() {
        let status = ProtectionStatus::uniform(Some(true));
        for surface in Surface::DISPATCH_ORDER {
            assert_eq!(status.get(surface), Some(true));
        }
        assert!(ProtectionStatus::unknown().is_unknown());
    }

    #[test]
    fn test_status_serializes_unknown_as_null() {
        let mut status = ProtectionStatus::unknown();
        status.set(Surface::Screenshot, Some(false));
        let json = serde_json::to_value(status).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"record": null, "appSwitcher": null, "screenshot": false})
        );
    }
}
