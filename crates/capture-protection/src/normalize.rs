//! Option normalization
//!
//! Resolves loose caller options into a [`ProtectionRequest`]. Semantics:
//!
//! - No option at all targets every surface: on for prevent, off for allow.
//! - Once an option object is given, only keys set to `true` (or to a cover
//!   object) are targeted. Absent and `false` keys leave the surface alone,
//!   so `prevent` never switches protection off.
//! - A cover object with `image` becomes an image cover, otherwise a text
//!   cover. An object with neither falls back to the default cover.

use protection_types::{
    ContentMode, ImageDirective, OverlayOption, PreventOption, ProtectionMode, ProtectionRequest,
    SurfaceDirective, SurfaceOption, TextDirective,
};
use tracing::debug;

use crate::ProtectionConfig;

/// Turns caller options into per-surface directives
#[derive(Debug, Clone)]
pub struct OptionNormalizer {
    background_color: String,
    content_mode: ContentMode,
}

impl OptionNormalizer {
    pub fn new(config: &ProtectionConfig) -> Self {
        Self {
            background_color: config.default_background_color.clone(),
            content_mode: config.default_content_mode,
        }
    }

    pub fn normalize(&self, option: Option<&PreventOption>, mode: ProtectionMode) -> ProtectionRequest {
        let Some(option) = option else {
            return match mode {
                ProtectionMode::Prevent => ProtectionRequest::all_on(),
                ProtectionMode::Allow => ProtectionRequest::all_off(),
            };
        };

        let record = self.resolve(option.record.as_ref(), mode);
        let app_switcher = self.resolve(option.app_switcher.as_ref(), mode);
        let screenshot = match option.screenshot {
            Some(true) => Some(mode == ProtectionMode::Prevent),
            _ => None,
        };

        ProtectionRequest::new(record, app_switcher, screenshot)
    }

    fn resolve(&self, value: Option<&SurfaceOption>, mode: ProtectionMode) -> Option<SurfaceDirective> {
        let value = value?;
        match (mode, value) {
            (_, SurfaceOption::Enabled(false)) => None,
            // Any truthy value on allow means "allow this surface"
            (ProtectionMode::Allow, _) => Some(SurfaceDirective::Off),
            (ProtectionMode::Prevent, SurfaceOption::Enabled(true)) => Some(SurfaceDirective::On),
            (ProtectionMode::Prevent, SurfaceOption::Overlay(overlay)) => {
                Some(self.resolve_overlay(overlay))
            }
        }
    }

    fn resolve_overlay(&self, overlay: &OverlayOption) -> SurfaceDirective {
        if let Some(image) = &overlay.image {
            return SurfaceDirective::OnWithImage(ImageDirective {
                image: image.clone(),
                background_color: overlay
                    .background_color
                    .clone()
                    .unwrap_or_else(|| self.background_color.clone()),
                content_mode: overlay.content_mode.unwrap_or(self.content_mode),
            });
        }

        if let Some(text) = &overlay.text {
            return SurfaceDirective::OnWithText(TextDirective {
                text: text.clone(),
                text_color: overlay.text_color.clone(),
                background_color: overlay.background_color.clone(),
            });
        }

        debug!("Cover option has neither image nor text, using default cover");
        SurfaceDirective::On
    }
}

impl Default for OptionNormalizer {
    fn default() -> Self {
        Self::new(&ProtectionConfig::default())
    }
}
