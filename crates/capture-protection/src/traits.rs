//! Capability provider abstraction
//!
//! Native modules differ per platform: iOS exposes one entry point per
//! surface and cover variant, Android a single combined toggle. Every entry
//! point is declared here with a default body returning
//! [`ProviderError::NotImplemented`], so a provider only implements what its
//! native module actually has.

use std::sync::Arc;

use async_trait::async_trait;
use protection_types::{ContentMode, ImageSource, Platform, ProtectionStatus, ResolvedImage};

use crate::{ProviderError, ProviderResult};

/// iOS capability provider with per-surface control
#[async_trait]
pub trait IosCapability: Send + Sync {
    async fn allow_screenshot(&self) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("allowScreenshot"))
    }

    async fn allow_app_switcher(&self) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("allowAppSwitcher"))
    }

    async fn allow_screen_record(&self) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("allowScreenRecord"))
    }

    async fn prevent_screenshot(&self) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("preventScreenshot"))
    }

    async fn prevent_app_switcher(&self) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("preventAppSwitcher"))
    }

    async fn prevent_app_switcher_with_image(
        &self,
        _image: &ResolvedImage,
        _background_color: &str,
        _content_mode: ContentMode,
    ) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("preventAppSwitcherWithImage"))
    }

    async fn prevent_app_switcher_with_text(
        &self,
        _text: &str,
        _text_color: Option<&str>,
        _background_color: Option<&str>,
    ) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("preventAppSwitcherWithText"))
    }

    async fn prevent_screen_record(&self) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("preventScreenRecord"))
    }

    async fn prevent_screen_record_with_image(
        &self,
        _image: &ResolvedImage,
        _background_color: &str,
        _content_mode: ContentMode,
    ) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("preventScreenRecordWithImage"))
    }

    async fn prevent_screen_record_with_text(
        &self,
        _text: &str,
        _text_color: Option<&str>,
        _background_color: Option<&str>,
    ) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("preventScreenRecordWithText"))
    }

    async fn protection_status(&self) -> ProviderResult<ProtectionStatus> {
        Err(ProviderError::NotImplemented("protectionStatus"))
    }

    async fn is_screen_recording(&self) -> ProviderResult<Option<bool>> {
        Err(ProviderError::NotImplemented("isScreenRecording"))
    }

    async fn has_listener(&self) -> ProviderResult<Option<bool>> {
        Err(ProviderError::NotImplemented("hasListener"))
    }

    /// A listener was attached to `event_name`
    fn listener_added(&self, _event_name: &str) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("addListener"))
    }

    /// `count` listeners were released
    fn listeners_removed(&self, _count: usize) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("removeListeners"))
    }
}

/// Android capability provider with one combined toggle
#[async_trait]
pub trait AndroidCapability: Send + Sync {
    async fn allow(&self) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("allow"))
    }

    async fn prevent(&self) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("prevent"))
    }

    async fn protection_status(&self) -> ProviderResult<Option<bool>> {
        Err(ProviderError::NotImplemented("protectionStatus"))
    }

    async fn is_screen_recording(&self) -> ProviderResult<Option<bool>> {
        Err(ProviderError::NotImplemented("isScreenRecording"))
    }

    async fn has_listener(&self) -> ProviderResult<Option<bool>> {
        Err(ProviderError::NotImplemented("hasListener"))
    }

    /// Ask the user for the permission screen-capture detection needs
    async fn request_permission(&self) -> ProviderResult<bool> {
        Err(ProviderError::NotImplemented("requestPermission"))
    }

    fn listener_added(&self, _event_name: &str) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("addListener"))
    }

    fn listeners_removed(&self, _count: usize) -> ProviderResult<()> {
        Err(ProviderError::NotImplemented("removeListeners"))
    }
}

/// Provider selected by the host at startup
#[derive(Clone)]
pub enum CapabilityProvider {
    Ios(Arc<dyn IosCapability>),
    Android(Arc<dyn AndroidCapability>),
    /// No native module exists for this platform
    Unsupported(Platform),
}

impl CapabilityProvider {
    pub fn ios(provider: impl IosCapability + 'static) -> Self {
        CapabilityProvider::Ios(Arc::new(provider))
    }

    pub fn android(provider: impl AndroidCapability + 'static) -> Self {
        CapabilityProvider::Android(Arc::new(provider))
    }

    pub fn platform(&self) -> Platform {
        match self {
            CapabilityProvider::Ios(_) => Platform::Ios,
            CapabilityProvider::Android(_) => Platform::Android,
            CapabilityProvider::Unsupported(platform) => *platform,
        }
    }

    /// Whether a native module backs this provider
    pub fn is_native(&self) -> bool {
        !matches!(self, CapabilityProvider::Unsupported(_))
    }

    pub(crate) fn listener_added(&self, event_name: &str) -> ProviderResult<()> {
        match self {
            CapabilityProvider::Ios(ios) => ios.listener_added(event_name),
            CapabilityProvider::Android(android) => android.listener_added(event_name),
            CapabilityProvider::Unsupported(_) => Ok(()),
        }
    }

    pub(crate) fn listeners_removed(&self, count: usize) -> ProviderResult<()> {
        match self {
            CapabilityProvider::Ios(ios) => ios.listeners_removed(count),
            CapabilityProvider::Android(android) => android.listeners_removed(count),
            CapabilityProvider::Unsupported(_) => Ok(()),
        }
    }
}

impl std::fmt::Debug for CapabilityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CapabilityProvider({})", self.platform())
    }
}

/// Turns host image references into descriptors a provider can load
pub trait AssetResolver: Send + Sync {
    fn resolve(&self, source: &ImageSource) -> ResolvedImage;
}

/// Resolver that passes URIs through and addresses bundled assets by id
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleAssetResolver;

impl AssetResolver for BundleAssetResolver {
    fn resolve(&self, source: &ImageSource) -> ResolvedImage {
        match source {
            ImageSource::Asset(id) => ResolvedImage {
                uri: format!("asset://{id}"),
                width: None,
                height: None,
                scale: 1.0,
            },
            ImageSource::Uri(image) => ResolvedImage {
                uri: image.uri.clone(),
                width: image.width,
                height: image.height,
                scale: image.scale.unwrap_or(1.0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protection_types::ImageUri;

    #[test]
    fn test_bundle_resolver() {
        let resolver = BundleAssetResolver;

        let asset = resolver.resolve(&ImageSource::Asset(3));
        assert_eq!(asset.uri, "asset://3");
        assert_eq!(asset.scale, 1.0);

        let remote = resolver.resolve(&ImageSource::Uri(ImageUri {
            uri: "file:///cover.png".into(),
            width: Some(10),
            height: Some(20),
            scale: Some(3.0),
        }));
        assert_eq!(remote.uri, "file:///cover.png");
        assert_eq!(remote.width, Some(10));
        assert_eq!(remote.height, Some(20));
        assert_eq!(remote.scale, 3.0);
    }
}
