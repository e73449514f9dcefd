//! Notification bridge for capture events
//!
//! Callers attach callbacks and get back a [`Subscription`]; native code
//! pushes events through a [`CaptureEventEmitter`]. Each subscription is
//! independent and must be released explicitly.

use std::sync::{Arc, Weak};

use dashmap::DashMap;
use protection_types::{CaptureEvent, SubscriptionId};
use tracing::{debug, trace, warn};

use crate::{CapabilityProvider, ProtectionResult, ProviderError};

/// Callback invoked for every capture event
pub type Listener = Arc<dyn Fn(&CaptureEvent) + Send + Sync>;

type Registry = DashMap<SubscriptionId, Listener>;

/// Caller-owned handle to one listener registration
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: SubscriptionId,
    event_name: Arc<str>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }
}

/// Holds listener registrations for the capture event channel
pub struct NotificationBridge {
    event_name: Arc<str>,
    listeners: Arc<Registry>,
    provider: CapabilityProvider,
}

impl NotificationBridge {
    pub fn new(event_name: &str, provider: CapabilityProvider) -> Self {
        Self {
            event_name: Arc::from(event_name),
            listeners: Arc::new(DashMap::new()),
            provider,
        }
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Register `listener`. Every call yields a new, independent handle.
    pub fn attach<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&CaptureEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.listeners.insert(id, Arc::new(listener));
        debug!("Listener {} attached to {}", id, self.event_name);

        match self.provider.listener_added(&self.event_name) {
            Ok(()) | Err(ProviderError::NotImplemented(_)) => {}
            Err(e) => warn!("Provider rejected listener registration: {}", e),
        }

        Subscription {
            id,
            event_name: self.event_name.clone(),
        }
    }

    /// Release one handle. Other handles stay attached.
    pub fn detach(&self, subscription: Subscription) -> ProtectionResult<()> {
        if self.listeners.remove(&subscription.id).is_none() {
            debug!("Listener {} was not attached here", subscription.id);
            return Ok(());
        }
        debug!("Listener {} detached from {}", subscription.id, self.event_name);

        match self.provider.listeners_removed(1) {
            Ok(()) | Err(ProviderError::NotImplemented(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Number of handles attached through this bridge
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Sender for native code to push events into this bridge
    pub fn emitter(&self) -> CaptureEventEmitter {
        CaptureEventEmitter {
            event_name: self.event_name.clone(),
            listeners: Arc::downgrade(&self.listeners),
        }
    }
}

/// Cloneable event sender. It does not keep the bridge alive.
#[derive(Clone)]
pub struct CaptureEventEmitter {
    event_name: Arc<str>,
    listeners: Weak<Registry>,
}

impl CaptureEventEmitter {
    /// Deliver `event` to every listener on `event_name`.
    /// Returns how many listeners were called.
    pub fn emit(&self, event_name: &str, event: impl Into<CaptureEvent>) -> usize {
        if event_name != &*self.event_name {
            trace!("Dropping event for unknown channel {}", event_name);
            return 0;
        }
        let Some(registry) = self.listeners.upgrade() else {
            trace!("Bridge is gone, dropping {} event", event_name);
            return 0;
        };

        // Snapshot first: listeners may attach or detach from inside the callback.
        let targets: Vec<Listener> = registry.iter().map(|entry| entry.value().clone()).collect();
        drop(registry);

        let event = event.into();
        for listener in &targets {
            listener(&event);
        }
        targets.len()
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }
}

impl std::fmt::Debug for CaptureEventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureEventEmitter")
            .field("event_name", &self.event_name)
            .finish()
    }
}
