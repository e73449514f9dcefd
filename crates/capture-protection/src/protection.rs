//! Unified capture protection API

use std::sync::Arc;

use protection_types::{
    AllowOption, CaptureEvent, Platform, PreventOption, ProtectionMode, ProtectionStatus,
};
use tracing::{error, info};

use crate::{
    AssetResolver, BundleAssetResolver, CapabilityProvider, CaptureEventEmitter, Dispatcher,
    NotificationBridge, OptionNormalizer, PlatformGate, ProtectionConfig, ProtectionResult,
    ProviderError, StatusAggregator, Subscription,
};

/// Capture protection over an injected capability provider.
///
/// Unsupported platforms never fail: mutations become no-ops and queries
/// answer `None`, with a warning logged each time.
pub struct CaptureProtection {
    provider: CapabilityProvider,
    gate: PlatformGate,
    normalizer: OptionNormalizer,
    resolver: Arc<dyn AssetResolver>,
    bridge: NotificationBridge,
}

impl CaptureProtection {
    pub fn new(provider: CapabilityProvider) -> Self {
        Self::with_config(provider, ProtectionConfig::default())
    }

    pub fn with_config(provider: CapabilityProvider, config: ProtectionConfig) -> Self {
        info!(
            "Capture protection on {} (events on {})",
            provider.platform(),
            config.event_name
        );
        Self {
            gate: PlatformGate::new(&provider),
            normalizer: OptionNormalizer::new(&config),
            resolver: Arc::new(BundleAssetResolver),
            bridge: NotificationBridge::new(&config.event_name, provider.clone()),
            provider,
        }
    }

    /// Replace the resolver used for image covers
    pub fn with_asset_resolver(mut self, resolver: impl AssetResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn platform(&self) -> Platform {
        self.gate.platform()
    }

    pub fn is_supported(&self) -> bool {
        self.gate.supported()
    }

    /// Sender native code uses to deliver capture events to listeners
    pub fn emitter(&self) -> CaptureEventEmitter {
        self.bridge.emitter()
    }

    /// Handles currently attached through this instance
    pub fn listener_count(&self) -> usize {
        self.bridge.listener_count()
    }

    /// Re-allow capture. Without an option every surface is allowed;
    /// with one, only surfaces set to `true`.
    pub async fn allow(&self, option: Option<AllowOption>) -> ProtectionResult<()> {
        if !self.gate.admit("allow") {
            return Ok(());
        }
        let option = option.map(PreventOption::from);
        let request = self.normalizer.normalize(option.as_ref(), ProtectionMode::Allow);
        self.dispatcher().dispatch(&request, ProtectionMode::Allow).await
    }

    /// Prevent capture. Without an option every surface is protected;
    /// with one, only surfaces set to `true` or to a cover. Surfaces set
    /// to `false` keep their current state.
    pub async fn prevent(&self, option: Option<PreventOption>) -> ProtectionResult<()> {
        if !self.gate.admit("prevent") {
            return Ok(());
        }
        let request = self.normalizer.normalize(option.as_ref(), ProtectionMode::Prevent);
        self.dispatcher().dispatch(&request, ProtectionMode::Prevent).await
    }

    /// `allow` with a JSON option object
    pub async fn allow_json(&self, json: &str) -> ProtectionResult<()> {
        if !self.gate.admit("allow") {
            return Ok(());
        }
        self.allow(Some(AllowOption::from_json(json)?)).await
    }

    /// `prevent` with a JSON option object
    pub async fn prevent_json(&self, json: &str) -> ProtectionResult<()> {
        if !self.gate.admit("prevent") {
            return Ok(());
        }
        self.prevent(Some(PreventOption::from_json(json)?)).await
    }

    pub async fn protection_status(&self) -> ProtectionResult<ProtectionStatus> {
        if !self.gate.admit("protectionStatus") {
            return Ok(ProtectionStatus::unknown());
        }
        StatusAggregator::new(&self.provider).status().await
    }

    pub async fn is_screen_recording(&self) -> ProtectionResult<Option<bool>> {
        if !self.gate.admit("isScreenRecording") {
            return Ok(None);
        }
        StatusAggregator::new(&self.provider).is_screen_recording().await
    }

    /// Whether the native layer has any subscriber, from any instance
    pub async fn has_listener(&self) -> ProtectionResult<Option<bool>> {
        if !self.gate.admit("hasListener") {
            return Ok(None);
        }
        StatusAggregator::new(&self.provider).has_listener().await
    }

    /// Attach `callback` to capture events. `None` on unsupported platforms.
    pub fn add_listener<F>(&self, callback: F) -> Option<Subscription>
    where
        F: Fn(&CaptureEvent) + Send + Sync + 'static,
    {
        if !self.gate.admit("addListener") {
            return None;
        }
        Some(self.bridge.attach(callback))
    }

    /// Release `subscription`. `None` is accepted and does nothing.
    pub async fn remove_listener(&self, subscription: Option<Subscription>) -> ProtectionResult<()> {
        if !self.gate.admit("removeListener") {
            return Ok(());
        }
        match subscription {
            Some(subscription) => self.bridge.detach(subscription),
            None => Ok(()),
        }
    }

    /// Ask for the Android permission capture detection needs.
    /// Never fails: other platforms and native errors answer `false`.
    pub async fn request_permission(&self) -> bool {
        if !self.gate.admit_permission_request() {
            return false;
        }
        let CapabilityProvider::Android(android) = &self.provider else {
            return false;
        };

        match android.request_permission().await {
            Ok(granted) => granted,
            Err(ProviderError::NotImplemented(entry)) => {
                error!("requestPermission failed: provider has no {} entry point", entry);
                false
            }
            Err(e) => {
                error!("requestPermission failed: {}", e);
                false
            }
        }
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(&self.provider, self.resolver.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use protection_types::{ImageSource, OverlayOption, SurfaceOption};
    use serde_json::json;

    use crate::{NativeCall, PermissionOutcome, ProtectionError, SimulatedAndroid, SimulatedIos};

    fn ios() -> (CaptureProtection, Arc<SimulatedIos>) {
        let native = Arc::new(SimulatedIos::new());
        let protection = CaptureProtection::new(CapabilityProvider::Ios(native.clone()));
        native.connect(protection.emitter());
        (protection, native)
    }

    fn android(permission: PermissionOutcome) -> (CaptureProtection, Arc<SimulatedAndroid>) {
        let native = Arc::new(SimulatedAndroid::new().with_permission(permission));
        let protection = CaptureProtection::new(CapabilityProvider::Android(native.clone()));
        native.connect(protection.emitter());
        (protection, native)
    }

    #[tokio::test]
    async fn test_unsupported_platform_degrades() {
        for platform in [Platform::Web, Platform::Windows, Platform::Macos, Platform::Linux] {
            let protection = CaptureProtection::new(CapabilityProvider::Unsupported(platform));
            assert!(!protection.is_supported());

            protection.prevent(None).await.unwrap();
            protection.allow(None).await.unwrap();
            protection.prevent_json(r#"{"screenshot": true}"#).await.unwrap();
            assert!(protection.protection_status().await.unwrap().is_unknown());
            assert_eq!(protection.is_screen_recording().await.unwrap(), None);
            assert_eq!(protection.has_listener().await.unwrap(), None);
            assert!(protection.add_listener(|_| {}).is_none());
            protection.remove_listener(None).await.unwrap();
            assert!(!protection.request_permission().await);
            assert_eq!(protection.listener_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_unsupported_provider_naming_mobile_platform_degrades() {
        for platform in [Platform::Ios, Platform::Android] {
            let protection = CaptureProtection::new(CapabilityProvider::Unsupported(platform));
            assert_eq!(protection.platform(), platform);
            assert!(!protection.is_supported());

            protection.prevent(None).await.unwrap();
            protection.allow_json(r#"{"record": true}"#).await.unwrap();
            assert!(protection.protection_status().await.unwrap().is_unknown());
            assert_eq!(protection.is_screen_recording().await.unwrap(), None);
            assert!(protection.add_listener(|_| {}).is_none());
            assert!(!protection.request_permission().await);
            assert_eq!(protection.listener_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_prevent_text_cover_scenario() {
        let (protection, native) = ios();
        let option = PreventOption {
            app_switcher: Some(
                OverlayOption {
                    text: Some("Locked".into()),
                    ..Default::default()
                }
                .with_text_color("#fff")
                .with_background_color("#000")
                .into(),
            ),
            ..Default::default()
        };

        protection.prevent(Some(option)).await.unwrap();

        assert_eq!(
            native.calls(),
            vec![NativeCall::PreventAppSwitcherWithText {
                text: "Locked".into(),
                text_color: Some("#fff".into()),
                background_color: Some("#000".into()),
            }]
        );
    }

    #[tokio::test]
    async fn test_prevent_screenshot_false_leaves_state() {
        let (protection, native) = ios();
        protection.prevent(None).await.unwrap();
        native.clear_calls();

        protection
            .prevent(Some(PreventOption {
                screenshot: Some(false),
                ..Default::default()
            }))
            .await
            .unwrap();

        assert!(native.calls().is_empty());
        let status = protection.protection_status().await.unwrap();
        assert_eq!(status.screenshot, Some(true));
    }

    #[tokio::test]
    async fn test_prevent_then_allow_round_trip_on_ios() {
        let (protection, native) = ios();

        protection.prevent(None).await.unwrap();
        assert_eq!(
            protection.protection_status().await.unwrap(),
            ProtectionStatus::uniform(Some(true))
        );

        protection
            .allow(Some(AllowOption {
                record: Some(true),
                ..Default::default()
            }))
            .await
            .unwrap();
        let status = protection.protection_status().await.unwrap();
        assert_eq!(status.record, Some(false));
        assert_eq!(status.app_switcher, Some(true));
        assert_eq!(status.screenshot, Some(true));

        protection.allow(None).await.unwrap();
        assert_eq!(
            protection.protection_status().await.unwrap(),
            ProtectionStatus::uniform(Some(false))
        );
        assert!(native.calls().contains(&NativeCall::AllowScreenshot));
    }

    #[tokio::test]
    async fn test_prevent_json_with_image_cover() {
        let (protection, native) = ios();
        protection
            .prevent_json(r#"{"record": {"image": {"uri": "https://cdn.test/cover.png"}, "text": "ignored"}}"#)
            .await
            .unwrap();

        match native.calls().as_slice() {
            [NativeCall::PreventScreenRecordWithImage { image, background_color, content_mode }] => {
                assert_eq!(image.uri, "https://cdn.test/cover.png");
                assert_eq!(background_color, "#ffffff");
                assert_eq!(*content_mode, protection_types::ContentMode::ScaleAspectFit);
            }
            other => panic!("unexpected calls: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_prevent_json_rejects_screenshot_cover() {
        let (protection, native) = ios();
        let result = protection.prevent_json(r#"{"screenshot": {"text": "x"}}"#).await;
        assert!(matches!(result, Err(ProtectionError::InvalidOption(_))));
        assert!(native.calls().is_empty());
    }

    #[tokio::test]
    async fn test_custom_asset_resolver() {
        struct CdnResolver;

        impl AssetResolver for CdnResolver {
            fn resolve(&self, source: &ImageSource) -> protection_types::ResolvedImage {
                let uri = match source {
                    ImageSource::Asset(id) => format!("https://cdn.test/assets/{id}.png"),
                    ImageSource::Uri(image) => image.uri.clone(),
                };
                protection_types::ResolvedImage {
                    uri,
                    width: Some(64),
                    height: Some(64),
                    scale: 2.0,
                }
            }
        }

        let native = Arc::new(SimulatedIos::new());
        let protection = CaptureProtection::new(CapabilityProvider::Ios(native.clone()))
            .with_asset_resolver(CdnResolver);
        protection
            .prevent(Some(PreventOption {
                app_switcher: Some(SurfaceOption::image(ImageSource::Asset(12))),
                ..Default::default()
            }))
            .await
            .unwrap();

        match native.calls().as_slice() {
            [NativeCall::PreventAppSwitcherWithImage { image, .. }] => {
                assert_eq!(image.uri, "https://cdn.test/assets/12.png");
                assert_eq!(image.scale, 2.0);
            }
            other => panic!("unexpected calls: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_android_status_broadcast() {
        let (protection, _native) = android(PermissionOutcome::Granted);
        assert_eq!(
            protection.protection_status().await.unwrap(),
            ProtectionStatus::uniform(Some(false))
        );

        protection
            .prevent(Some(PreventOption {
                screenshot: Some(true),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(
            protection.protection_status().await.unwrap(),
            ProtectionStatus::uniform(Some(true))
        );
    }

    #[tokio::test]
    async fn test_request_permission_only_on_android() {
        let (protection, native) = ios();
        assert!(!protection.request_permission().await);
        assert!(native.calls().is_empty());

        let (protection, native) = android(PermissionOutcome::Granted);
        assert!(protection.request_permission().await);
        assert_eq!(native.calls(), vec![NativeCall::RequestPermission]);

        let (protection, _) = android(PermissionOutcome::Denied);
        assert!(!protection.request_permission().await);
    }

    #[tokio::test]
    async fn test_request_permission_failure_resolves_false() {
        let (protection, native) = android(PermissionOutcome::Fails);
        assert!(!protection.request_permission().await);
        assert_eq!(native.calls(), vec![NativeCall::RequestPermission]);
    }

    #[tokio::test]
    async fn test_listener_lifecycle() {
        let (protection, native) = ios();
        let seen = Arc::new(Mutex::new(Vec::new()));

        assert_eq!(protection.has_listener().await.unwrap(), Some(false));

        let sink = seen.clone();
        let first = protection.add_listener(move |event: &CaptureEvent| {
            sink.lock().push(event.payload().clone());
        });
        let second = protection.add_listener(|_| {});
        assert!(first.is_some() && second.is_some());
        assert_eq!(protection.has_listener().await.unwrap(), Some(true));

        assert_eq!(native.simulate_screenshot(), 2);

        protection.remove_listener(first).await.unwrap();
        assert_eq!(protection.listener_count(), 1);
        assert_eq!(protection.has_listener().await.unwrap(), Some(true));

        protection.remove_listener(None).await.unwrap();
        assert_eq!(protection.listener_count(), 1);

        protection.remove_listener(second).await.unwrap();
        assert_eq!(protection.has_listener().await.unwrap(), Some(false));
        assert_eq!(native.simulate_screenshot(), 0);

        assert_eq!(
            *seen.lock(),
            vec![json!({"type": "captured", "protected": false})]
        );
    }

    #[tokio::test]
    async fn test_is_screen_recording() {
        let (protection, native) = android(PermissionOutcome::Granted);
        assert_eq!(protection.is_screen_recording().await.unwrap(), Some(false));
        native.simulate_recording(true);
        assert_eq!(protection.is_screen_recording().await.unwrap(), Some(true));
    }
}
