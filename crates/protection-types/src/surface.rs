//! Protection surfaces and the directives applied to them

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// Independently controllable protection target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Surface {
    /// Screen recording and mirroring
    Record,
    /// Snapshot shown in the app switcher
    AppSwitcher,
    /// Still screenshots
    Screenshot,
}

impl Surface {
    /// Order in which surfaces are handed to a per-surface provider.
    /// Native side effects depend on it, so it never changes.
    pub const DISPATCH_ORDER: [Surface; 3] =
        [Surface::Screenshot, Surface::AppSwitcher, Surface::Record];

    /// Whether the surface accepts image and text overlays
    pub fn supports_overlay(&self) -> bool {
        matches!(self, Surface::Record | Surface::AppSwitcher)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Record => "record",
            Surface::AppSwitcher => "appSwitcher",
            Surface::Screenshot => "screenshot",
        }
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an overlay image is laid out (UIKit view content modes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum ContentMode {
    ScaleToFill = 0,
    #[default]
    ScaleAspectFit = 1,
    ScaleAspectFill = 2,
    Redraw = 3,
    Center = 4,
    Top = 5,
    Bottom = 6,
    Left = 7,
    Right = 8,
    TopLeft = 9,
    TopRight = 10,
    BottomLeft = 11,
    BottomRight = 12,
}

impl TryFrom<u8> for ContentMode {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => ContentMode::ScaleToFill,
            1 => ContentMode::ScaleAspectFit,
            2 => ContentMode::ScaleAspectFill,
            3 => ContentMode::Redraw,
            4 => ContentMode::Center,
            5 => ContentMode::Top,
            6 => ContentMode::Bottom,
            7 => ContentMode::Left,
            8 => ContentMode::Right,
            9 => ContentMode::TopLeft,
            10 => ContentMode::TopRight,
            11 => ContentMode::BottomLeft,
            12 => ContentMode::BottomRight,
            other => return Err(TypesError::InvalidContentMode(other)),
        })
    }
}

impl From<ContentMode> for u8 {
    fn from(mode: ContentMode) -> Self {
        mode as u8
    }
}

/// Image as supplied by the host, before asset resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSource {
    /// Bundled asset identifier
    Asset(u32),
    /// Remote or file image
    Uri(ImageUri),
}

/// URI based image reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUri {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
}

/// Image descriptor handed to a capability provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedImage {
    pub uri: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub scale: f32,
}

/// Overlay image shown while a surface is protected
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDirective {
    pub image: ImageSource,
    pub background_color: String,
    pub content_mode: ContentMode,
}

/// Overlay text shown while a surface is protected
#[derive(Debug, Clone, PartialEq)]
pub struct TextDirective {
    pub text: String,
    pub text_color: Option<String>,
    pub background_color: Option<String>,
}

/// Resolved action for one surface
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceDirective {
    /// Protection disabled
    Off,
    /// Protection enabled with the platform's default cover
    On,
    /// Protection enabled with an image cover
    OnWithImage(ImageDirective),
    /// Protection enabled with a text cover
    OnWithText(TextDirective),
}

impl SurfaceDirective {
    pub fn is_on(&self) -> bool {
        !matches!(self, SurfaceDirective::Off)
    }

    /// Whether the directive carries an overlay payload
    pub fn has_overlay(&self) -> bool {
        matches!(
            self,
            SurfaceDirective::OnWithImage(_) | SurfaceDirective::OnWithText(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_mode_wire_value() {
        assert_eq!(serde_json::to_string(&ContentMode::ScaleAspectFit).unwrap(), "1");
        let mode: ContentMode = serde_json::from_str("12").unwrap();
        assert_eq!(mode, ContentMode::BottomRight);
        assert!(serde_json::from_str::<ContentMode>("13").is_err());
    }

    #[test]
    fn test_image_source_shapes() {
        let asset: ImageSource = serde_json::from_str("42").unwrap();
        assert_eq!(asset, ImageSource::Asset(42));

        let uri: ImageSource =
            serde_json::from_str(r#"{"uri": "https://example.com/cover.png", "width": 200}"#)
                .unwrap();
        match uri {
            ImageSource::Uri(image) => {
                assert_eq!(image.uri, "https://example.com/cover.png");
                assert_eq!(image.width, Some(200));
                assert_eq!(image.height, None);
            }
            other => panic!("unexpected source: {other:?}"),
        }
    }

    #[test]
    fn test_only_record_and_app_switcher_take_overlays() {
        assert!(Surface::Record.supports_overlay());
        assert!(Surface::AppSwitcher.supports_overlay());
        assert!(!Surface::Screenshot.supports_overlay());
    }
}
