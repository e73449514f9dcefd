//! Capture notification payloads and subscription identifiers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification delivered on the capture event channel.
/// The payload is whatever the native provider sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptureEvent(pub serde_json::Value);

impl CaptureEvent {
    pub fn payload(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for CaptureEvent {
    fn from(payload: serde_json::Value) -> Self {
        Self(payload)
    }
}

/// Identifier of one listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
