//! Caller-facing protection options
//!
//! These mirror the loose configuration objects hosts pass in: every key is
//! optional, surfaces take either a boolean or an overlay object, and unknown
//! keys are ignored.

use serde::{Deserialize, Serialize};

use crate::{ContentMode, ImageSource, TypesResult};

/// Options for re-allowing capture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_switcher: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<bool>,
}

impl AllowOption {
    pub fn from_json(json: &str) -> TypesResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Options for preventing capture
///
/// `screenshot` is boolean only: no platform can draw a cover over a still
/// screenshot, so overlay objects for it are rejected when parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreventOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<SurfaceOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_switcher: Option<SurfaceOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<bool>,
}

impl PreventOption {
    pub fn from_json(json: &str) -> TypesResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<AllowOption> for PreventOption {
    fn from(option: AllowOption) -> Self {
        Self {
            record: option.record.map(SurfaceOption::Enabled),
            app_switcher: option.app_switcher.map(SurfaceOption::Enabled),
            screenshot: option.screenshot,
        }
    }
}

/// Value of an overlay-capable surface key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SurfaceOption {
    Enabled(bool),
    Overlay(OverlayOption),
}

impl SurfaceOption {
    /// Image cover with default background and content mode
    pub fn image(image: ImageSource) -> Self {
        SurfaceOption::Overlay(OverlayOption {
            image: Some(image),
            ..Default::default()
        })
    }

    /// Text cover with platform default colors
    pub fn text(text: impl Into<String>) -> Self {
        SurfaceOption::Overlay(OverlayOption {
            text: Some(text.into()),
            ..Default::default()
        })
    }
}

impl From<bool> for SurfaceOption {
    fn from(enabled: bool) -> Self {
        SurfaceOption::Enabled(enabled)
    }
}

impl From<OverlayOption> for SurfaceOption {
    fn from(overlay: OverlayOption) -> Self {
        SurfaceOption::Overlay(overlay)
    }
}

/// Structured cover configuration. Both `image` and `text` may be present;
/// `image` wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_mode: Option<ContentMode>,
}

impl OverlayOption {
    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_content_mode(mut self, mode: ContentMode) -> Self {
        self.content_mode = Some(mode);
        self
    }
}
