//! Shared types for capture protection
//!
//! This crate contains the platform, surface, option and status types
//! shared by the capture protection core and its hosts.

mod error;
mod event;
mod options;
mod platform;
mod request;
mod status;
mod surface;

pub use error::*;
pub use event::*;
pub use options::*;
pub use platform::*;
pub use request::*;
pub use status::*;
pub use surface::*;

/// Name of the event channel carrying capture notifications
pub const CAPTURE_EVENT_NAME: &str = "CaptureProtectionListener";

/// Background color used behind image overlays when none is given
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
