//! Platform capability gate

use protection_types::Platform;
use tracing::warn;

use crate::CapabilityProvider;

/// Decides whether an operation may reach a native provider
#[derive(Debug, Clone, Copy)]
pub struct PlatformGate {
    platform: Platform,
    native: bool,
}

impl PlatformGate {
    /// Gate for `provider`. Support follows the injected module, so an
    /// `Unsupported` provider stays unsupported whatever platform it names.
    pub fn new(provider: &CapabilityProvider) -> Self {
        Self {
            platform: provider.platform(),
            native: provider.is_native(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// True only when a native capability provider is present
    pub fn supported(&self) -> bool {
        self.native && self.platform.is_supported()
    }

    /// Check support for `operation`, warning when it has to degrade
    pub fn admit(&self, operation: &str) -> bool {
        if !self.supported() {
            warn!(
                "Capture protection is not supported on {} ({} ignored)",
                self.platform, operation
            );
            return false;
        }
        true
    }

    /// Permission requests exist on Android only
    pub fn admit_permission_request(&self) -> bool {
        if !self.supported() || self.platform != Platform::Android {
            warn!(
                "requestPermission is only available on Android (running on {})",
                self.platform
            );
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SimulatedAndroid, SimulatedIos};

    #[test]
    fn test_gate_admits_mobile_only() {
        assert!(PlatformGate::new(&CapabilityProvider::ios(SimulatedIos::new())).admit("prevent"));
        assert!(PlatformGate::new(&CapabilityProvider::android(SimulatedAndroid::new())).admit("prevent"));
        assert!(!PlatformGate::new(&CapabilityProvider::Unsupported(Platform::Web)).admit("prevent"));
    }

    #[test]
    fn test_unsupported_provider_is_never_admitted() {
        for platform in [Platform::Ios, Platform::Android] {
            let gate = PlatformGate::new(&CapabilityProvider::Unsupported(platform));
            assert_eq!(gate.platform(), platform);
            assert!(!gate.supported());
            assert!(!gate.admit("prevent"));
            assert!(!gate.admit_permission_request());
        }
    }

    #[test]
    fn test_permission_gate_is_android_only() {
        let android = PlatformGate::new(&CapabilityProvider::android(SimulatedAndroid::new()));
        assert!(android.admit_permission_request());
        let ios = PlatformGate::new(&CapabilityProvider::ios(SimulatedIos::new()));
        assert!(!ios.admit_permission_request());
        let linux = PlatformGate::new(&CapabilityProvider::Unsupported(Platform::Linux));
        assert!(!linux.admit_permission_request());
    }
}
