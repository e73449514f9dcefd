//! Capture Protection - unified screen-capture protection for mobile hosts
//!
//! Normalizes caller options and dispatches them to platform capability
//! providers:
//! - iOS: one entry point per surface (screenshot, app switcher, recording)
//! - Android: a single combined toggle

mod bridge;
mod config;
mod dispatch;
mod error;
mod gate;
mod normalize;
mod protection;
mod simulated;
mod status;
mod traits;

pub use bridge::*;
pub use config::*;
pub use dispatch::*;
pub use error::*;
pub use gate::*;
pub use normalize::*;
pub use protection::*;
pub use simulated::*;
pub use status::*;
pub use traits::*;

use std::sync::Arc;

use protection_types::Platform;

/// Simulated provider behind a [`Simulation`]
#[derive(Clone)]
pub enum SimulatedProvider {
    Ios(Arc<SimulatedIos>),
    Android(Arc<SimulatedAndroid>),
    None,
}

impl SimulatedProvider {
    pub fn calls(&self) -> Vec<NativeCall> {
        match self {
            SimulatedProvider::Ios(ios) => ios.calls(),
            SimulatedProvider::Android(android) => android.calls(),
            SimulatedProvider::None => Vec::new(),
        }
    }

    pub fn simulate_screenshot(&self) -> usize {
        match self {
            SimulatedProvider::Ios(ios) => ios.simulate_screenshot(),
            SimulatedProvider::Android(android) => android.simulate_screenshot(),
            SimulatedProvider::None => 0,
        }
    }

    pub fn simulate_recording(&self, recording: bool) -> usize {
        match self {
            SimulatedProvider::Ios(ios) => ios.simulate_recording(recording),
            SimulatedProvider::Android(android) => android.simulate_recording(recording),
            SimulatedProvider::None => 0,
        }
    }
}

/// A protection instance wired to an in-process provider
pub struct Simulation {
    pub protection: CaptureProtection,
    pub provider: SimulatedProvider,
}

/// Create a protection instance over a simulated provider for `platform`
pub fn create_simulated(platform: Platform, config: ProtectionConfig) -> Simulation {
    match platform {
        Platform::Ios => {
            let ios = Arc::new(SimulatedIos::new());
            let protection = CaptureProtection::with_config(CapabilityProvider::Ios(ios.clone()), config);
            ios.connect(protection.emitter());
            Simulation {
                protection,
                provider: SimulatedProvider::Ios(ios),
            }
        }
        Platform::Android => {
            let android = Arc::new(SimulatedAndroid::new());
            let protection =
                CaptureProtection::with_config(CapabilityProvider::Android(android.clone()), config);
            android.connect(protection.emitter());
            Simulation {
                protection,
                provider: SimulatedProvider::Android(android),
            }
        }
        other => Simulation {
            protection: CaptureProtection::with_config(CapabilityProvider::Unsupported(other), config),
            provider: SimulatedProvider::None,
        },
    }
}
