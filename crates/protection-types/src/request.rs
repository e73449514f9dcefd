//! Normalized protection requests

use serde::{Deserialize, Serialize};

use crate::{Surface, SurfaceDirective, TypesError, TypesResult};

/// Whether a call relaxes or enforces protection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionMode {
    Allow,
    Prevent,
}

impl std::fmt::Display for ProtectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtectionMode::Allow => f.write_str("allow"),
            ProtectionMode::Prevent => f.write_str("prevent"),
        }
    }
}

/// Target directive per surface. An untargeted surface (`None`) keeps
/// whatever protection state it currently has.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtectionRequest {
    record: Option<SurfaceDirective>,
    app_switcher: Option<SurfaceDirective>,
    screenshot: Option<SurfaceDirective>,
}

impl ProtectionRequest {
    /// Request that targets nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from per-surface targets. Screenshot takes a plain on/off
    /// target since it cannot carry a cover.
    pub fn new(
        record: Option<SurfaceDirective>,
        app_switcher: Option<SurfaceDirective>,
        screenshot: Option<bool>,
    ) -> Self {
        Self {
            record,
            app_switcher,
            screenshot: screenshot.map(|on| {
                if on {
                    SurfaceDirective::On
                } else {
                    SurfaceDirective::Off
                }
            }),
        }
    }

    /// Every surface protected with the platform default cover
    pub fn all_on() -> Self {
        Self::uniform(SurfaceDirective::On)
    }

    /// Every surface unprotected
    pub fn all_off() -> Self {
        Self::uniform(SurfaceDirective::Off)
    }

    fn uniform(directive: SurfaceDirective) -> Self {
        Self {
            record: Some(directive.clone()),
            app_switcher: Some(directive.clone()),
            screenshot: Some(directive),
        }
    }

    /// Target `surface` with `directive`, replacing any previous target.
    /// Overlay directives are only accepted for overlay-capable surfaces.
    pub fn target(mut self, surface: Surface, directive: SurfaceDirective) -> TypesResult<Self> {
        if directive.has_overlay() && !surface.supports_overlay() {
            return Err(TypesError::UnsupportedOverlay(surface));
        }
        *self.slot_mut(surface) = Some(directive);
        Ok(self)
    }

    pub fn directive(&self, surface: Surface) -> Option<&SurfaceDirective> {
        match surface {
            Surface::Record => self.record.as_ref(),
            Surface::AppSwitcher => self.app_switcher.as_ref(),
            Surface::Screenshot => self.screenshot.as_ref(),
        }
    }

    /// Targeted surfaces in dispatch order
    pub fn targeted(&self) -> impl Iterator<Item = (Surface, &SurfaceDirective)> {
        Surface::DISPATCH_ORDER
            .into_iter()
            .filter_map(|surface| self.directive(surface).map(|d| (surface, d)))
    }

    pub fn is_empty(&self) -> bool {
        self.targeted().next().is_none()
    }

    fn slot_mut(&mut self, surface: Surface) -> &mut Option<SurfaceDirective> {
        match surface {
            Surface::Record => &mut self.record,
            Surface::AppSwitcher => &mut self.app_switcher,
            Surface::Screenshot => &mut self.screenshot,
        }
    }
}
