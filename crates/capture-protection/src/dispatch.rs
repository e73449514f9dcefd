//! Routes normalized requests to capability provider entry points

use protection_types::{ProtectionMode, ProtectionRequest, Surface, SurfaceDirective};
use tracing::debug;

use crate::{
    AndroidCapability, AssetResolver, CapabilityProvider, IosCapability, ProtectionResult,
    ProviderError, ProviderResult,
};

/// Issues provider calls for a request, one at a time
pub struct Dispatcher<'a> {
    provider: &'a CapabilityProvider,
    resolver: &'a dyn AssetResolver,
}

impl<'a> Dispatcher<'a> {
    pub fn new(provider: &'a CapabilityProvider, resolver: &'a dyn AssetResolver) -> Self {
        Self { provider, resolver }
    }

    /// Apply `request` in `mode`. Each call is awaited before the next one
    /// is issued. Missing entry points skip their surface.
    pub async fn dispatch(&self, request: &ProtectionRequest, mode: ProtectionMode) -> ProtectionResult<()> {
        match self.provider {
            CapabilityProvider::Ios(ios) => self.dispatch_ios(ios.as_ref(), request, mode).await,
            CapabilityProvider::Android(android) => {
                self.dispatch_android(android.as_ref(), mode).await
            }
            CapabilityProvider::Unsupported(platform) => {
                debug!("No provider on {}, nothing to dispatch", platform);
                Ok(())
            }
        }
    }

    async fn dispatch_ios(
        &self,
        ios: &dyn IosCapability,
        request: &ProtectionRequest,
        mode: ProtectionMode,
    ) -> ProtectionResult<()> {
        for (surface, directive) in request.targeted() {
            let result = match (mode, directive) {
                (ProtectionMode::Allow, SurfaceDirective::Off) => {
                    self.allow_surface(ios, surface).await
                }
                (ProtectionMode::Prevent, directive) if directive.is_on() => {
                    self.prevent_surface(ios, surface, directive).await
                }
                _ => {
                    debug!("Leaving {} unchanged on {}", surface, mode);
                    continue;
                }
            };
            skip_missing(surface, result)?;
        }
        Ok(())
    }

    async fn allow_surface(&self, ios: &dyn IosCapability, surface: Surface) -> ProviderResult<()> {
        debug!("Allowing {}", surface);
        match surface {
            Surface::Screenshot => ios.allow_screenshot().await,
            Surface::AppSwitcher => ios.allow_app_switcher().await,
            Surface::Record => ios.allow_screen_record().await,
        }
    }

    async fn prevent_surface(
        &self,
        ios: &dyn IosCapability,
        surface: Surface,
        directive: &SurfaceDirective,
    ) -> ProviderResult<()> {
        debug!("Preventing {} with {:?}", surface, directive);
        match (surface, directive) {
            (Surface::Screenshot, _) => ios.prevent_screenshot().await,

            (Surface::AppSwitcher, SurfaceDirective::OnWithImage(cover)) => {
                let image = self.resolver.resolve(&cover.image);
                ios.prevent_app_switcher_with_image(&image, &cover.background_color, cover.content_mode)
                    .await
            }
            (Surface::AppSwitcher, SurfaceDirective::OnWithText(cover)) => {
                ios.prevent_app_switcher_with_text(
                    &cover.text,
                    cover.text_color.as_deref(),
                    cover.background_color.as_deref(),
                )
                .await
            }
            (Surface::AppSwitcher, _) => ios.prevent_app_switcher().await,

            (Surface::Record, SurfaceDirective::OnWithImage(cover)) => {
                let image = self.resolver.resolve(&cover.image);
                ios.prevent_screen_record_with_image(&image, &cover.background_color, cover.content_mode)
                    .await
            }
            (Surface::Record, SurfaceDirective::OnWithText(cover)) => {
                ios.prevent_screen_record_with_text(
                    &cover.text,
                    cover.text_color.as_deref(),
                    cover.background_color.as_deref(),
                )
                .await
            }
            (Surface::Record, _) => ios.prevent_screen_record().await,
        }
    }

    // Android has a single toggle, so the per-surface shape collapses here.
    async fn dispatch_android(&self, android: &dyn AndroidCapability, mode: ProtectionMode) -> ProtectionResult<()> {
        debug!("Android {} (combined)", mode);
        let result = match mode {
            ProtectionMode::Allow => android.allow().await,
            ProtectionMode::Prevent => android.prevent().await,
        };
        match result {
            Err(ProviderError::NotImplemented(entry)) => {
                debug!("Provider has no {} entry point, skipping", entry);
                Ok(())
            }
            other => Ok(other?),
        }
    }
}

fn skip_missing(surface: Surface, result: ProviderResult<()>) -> ProtectionResult<()> {
    match result {
        Err(ProviderError::NotImplemented(entry)) => {
            debug!("Provider has no {} entry point, skipping {}", entry, surface);
            Ok(())
        }
        other => Ok(other?),
    }
}
