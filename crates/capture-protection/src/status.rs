//! Status aggregation across provider shapes

use protection_types::ProtectionStatus;
use tracing::debug;

use crate::{CapabilityProvider, ProtectionResult, ProviderError, ProviderResult};

/// Queries provider state and reshapes it into uniform answers
pub struct StatusAggregator<'a> {
    provider: &'a CapabilityProvider,
}

impl<'a> StatusAggregator<'a> {
    pub fn new(provider: &'a CapabilityProvider) -> Self {
        Self { provider }
    }

    /// Per-surface protection state. Android cannot tell surfaces apart,
    /// so its single answer is reported for all three.
    pub async fn status(&self) -> ProtectionResult<ProtectionStatus> {
        let status = match self.provider {
            CapabilityProvider::Ios(ios) => answered(ios.protection_status().await)?,
            CapabilityProvider::Android(android) => {
                answered(android.protection_status().await)?.map(ProtectionStatus::uniform)
            }
            CapabilityProvider::Unsupported(_) => None,
        };
        Ok(status.unwrap_or_default())
    }

    pub async fn is_screen_recording(&self) -> ProtectionResult<Option<bool>> {
        let recording = match self.provider {
            CapabilityProvider::Ios(ios) => answered(ios.is_screen_recording().await)?,
            CapabilityProvider::Android(android) => {
                answered(android.is_screen_recording().await)?
            }
            CapabilityProvider::Unsupported(_) => None,
        };
        Ok(recording.flatten())
    }

    pub async fn has_listener(&self) -> ProtectionResult<Option<bool>> {
        let registered = match self.provider {
            CapabilityProvider::Ios(ios) => answered(ios.has_listener().await)?,
            CapabilityProvider::Android(android) => answered(android.has_listener().await)?,
            CapabilityProvider::Unsupported(_) => None,
        };
        Ok(registered.flatten())
    }
}

/// `None` when the provider lacks the entry point
fn answered<T>(result: ProviderResult<T>) -> ProtectionResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ProviderError::NotImplemented(entry)) => {
            debug!("Provider has no {} entry point", entry);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use protection_types::Platform;

    use crate::{AndroidCapability, IosCapability};

    struct FixedAndroid(Option<bool>);

    #[async_trait]
    impl AndroidCapability for FixedAndroid {
        async fn protection_status(&self) -> ProviderResult<Option<bool>> {
            Ok(self.0)
        }
    }

    struct SilentIos;

    #[async_trait]
    impl IosCapability for SilentIos {}

    #[tokio::test]
    async fn test_android_status_is_broadcast() {
        for value in [Some(true), Some(false), None] {
            let provider = CapabilityProvider::android(FixedAndroid(value));
            let status = StatusAggregator::new(&provider).status().await.unwrap();
            assert_eq!(
                status,
                ProtectionStatus {
                    record: value,
                    app_switcher: value,
                    screenshot: value,
                }
            );
        }
    }

    #[tokio::test]
    async fn test_missing_queries_answer_unknown() {
        let provider = CapabilityProvider::ios(SilentIos);
        let aggregator = StatusAggregator::new(&provider);

        assert!(aggregator.status().await.unwrap().is_unknown());
        assert_eq!(aggregator.is_screen_recording().await.unwrap(), None);
        assert_eq!(aggregator.has_listener().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unsupported_platform_answers_unknown() {
        let provider = CapabilityProvider::Unsupported(Platform::Web);
        let aggregator = StatusAggregator::new(&provider);

        assert!(aggregator.status().await.unwrap().is_unknown());
        assert_eq!(aggregator.is_screen_recording().await.unwrap(), None);
    }
}
