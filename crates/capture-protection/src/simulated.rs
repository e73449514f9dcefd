//! In-process capability providers
//!
//! Note: These do not touch the OS. They keep the state a native module
//! would keep, record every call made to them, and can raise capture
//! events, which is enough to drive the API end to end without a device.

use async_trait::async_trait;
use parking_lot::Mutex;
use protection_types::{ContentMode, ProtectionStatus, ResolvedImage};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::{
    AndroidCapability, CaptureEventEmitter, IosCapability, ProviderError, ProviderResult,
};

/// One call received by a simulated provider
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NativeCall {
    AllowScreenshot,
    AllowAppSwitcher,
    AllowScreenRecord,
    PreventScreenshot,
    PreventAppSwitcher,
    PreventAppSwitcherWithImage {
        image: ResolvedImage,
        background_color: String,
        content_mode: ContentMode,
    },
    PreventAppSwitcherWithText {
        text: String,
        text_color: Option<String>,
        background_color: Option<String>,
    },
    PreventScreenRecord,
    PreventScreenRecordWithImage {
        image: ResolvedImage,
        background_color: String,
        content_mode: ContentMode,
    },
    PreventScreenRecordWithText {
        text: String,
        text_color: Option<String>,
        background_color: Option<String>,
    },
    Allow,
    Prevent,
    ProtectionStatus,
    IsScreenRecording,
    HasListener,
    RequestPermission,
    AddListener {
        event_name: String,
    },
    RemoveListeners {
        count: usize,
    },
}

#[derive(Debug, Default)]
struct IosState {
    screenshot: bool,
    app_switcher: bool,
    record: bool,
    recording: bool,
    listeners: usize,
    calls: Vec<NativeCall>,
}

/// Simulated iOS module with per-surface protection
#[derive(Default)]
pub struct SimulatedIos {
    state: Mutex<IosState>,
    emitter: Mutex<Option<CaptureEventEmitter>>,
}

impl SimulatedIos {
    pub fn new() -> Self {
        info!("Initializing simulated iOS capture protection");
        Self::default()
    }

    /// Route raised events into a notification bridge
    pub fn connect(&self, emitter: CaptureEventEmitter) {
        *self.emitter.lock() = Some(emitter);
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<NativeCall> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Raise a screenshot event. Returns how many listeners saw it.
    pub fn simulate_screenshot(&self) -> usize {
        let protected = self.state.lock().screenshot;
        self.emit(json!({ "type": "captured", "protected": protected }))
    }

    /// Start or stop a simulated screen recording
    pub fn simulate_recording(&self, recording: bool) -> usize {
        let protected = {
            let mut state = self.state.lock();
            state.recording = recording;
            state.record
        };
        let kind = if recording { "recording" } else { "endRecording" };
        self.emit(json!({ "type": kind, "protected": protected }))
    }

    fn emit(&self, payload: serde_json::Value) -> usize {
        let emitter = self.emitter.lock().clone();
        match emitter {
            Some(emitter) => emitter.emit(emitter.event_name(), payload),
            None => 0,
        }
    }

    fn record(&self, call: NativeCall, apply: impl FnOnce(&mut IosState)) {
        let mut state = self.state.lock();
        apply(&mut state);
        state.calls.push(call);
    }
}

#[async_trait]
impl IosCapability for SimulatedIos {
    async fn allow_screenshot(&self) -> ProviderResult<()> {
        self.record(NativeCall::AllowScreenshot, |s| s.screenshot = false);
        Ok(())
    }

    async fn allow_app_switcher(&self) -> ProviderResult<()> {
        self.record(NativeCall::AllowAppSwitcher, |s| s.app_switcher = false);
        Ok(())
    }

    async fn allow_screen_record(&self) -> ProviderResult<()> {
        self.record(NativeCall::AllowScreenRecord, |s| s.record = false);
        Ok(())
    }

    async fn prevent_screenshot(&self) -> ProviderResult<()> {
        self.record(NativeCall::PreventScreenshot, |s| s.screenshot = true);
        Ok(())
    }

    async fn prevent_app_switcher(&self) -> ProviderResult<()> {
        self.record(NativeCall::PreventAppSwitcher, |s| s.app_switcher = true);
        Ok(())
    }

    async fn prevent_app_switcher_with_image(
        &self,
        image: &ResolvedImage,
        background_color: &str,
        content_mode: ContentMode,
    ) -> ProviderResult<()> {
        let call = NativeCall::PreventAppSwitcherWithImage {
            image: image.clone(),
            background_color: background_color.to_string(),
            content_mode,
        };
        self.record(call, |s| s.app_switcher = true);
        Ok(())
    }

    async fn prevent_app_switcher_with_text(
        &self,
        text: &str,
        text_color: Option<&str>,
        background_color: Option<&str>,
    ) -> ProviderResult<()> {
        let call = NativeCall::PreventAppSwitcherWithText {
            text: text.to_string(),
            text_color: text_color.map(str::to_string),
            background_color: background_color.map(str::to_string),
        };
        self.record(call, |s| s.app_switcher = true);
        Ok(())
    }

    async fn prevent_screen_record(&self) -> ProviderResult<()> {
        self.record(NativeCall::PreventScreenRecord, |s| s.record = true);
        Ok(())
    }

    async fn prevent_screen_record_with_image(
        &self,
        image: &ResolvedImage,
        background_color: &str,
        content_mode: ContentMode,
    ) -> ProviderResult<()> {
        let call = NativeCall::PreventScreenRecordWithImage {
            image: image.clone(),
            background_color: background_color.to_string(),
            content_mode,
        };
        self.record(call, |s| s.record = true);
        Ok(())
    }

    async fn prevent_screen_record_with_text(
        &self,
        text: &str,
        text_color: Option<&str>,
        background_color: Option<&str>,
    ) -> ProviderResult<()> {
        let call = NativeCall::PreventScreenRecordWithText {
            text: text.to_string(),
            text_color: text_color.map(str::to_string),
            background_color: background_color.map(str::to_string),
        };
        self.record(call, |s| s.record = true);
        Ok(())
    }

    async fn protection_status(&self) -> ProviderResult<ProtectionStatus> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::ProtectionStatus);
        Ok(ProtectionStatus {
            record: Some(state.record),
            app_switcher: Some(state.app_switcher),
            screenshot: Some(state.screenshot),
        })
    }

    async fn is_screen_recording(&self) -> ProviderResult<Option<bool>> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::IsScreenRecording);
        Ok(Some(state.recording))
    }

    async fn has_listener(&self) -> ProviderResult<Option<bool>> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::HasListener);
        Ok(Some(state.listeners > 0))
    }

    fn listener_added(&self, event_name: &str) -> ProviderResult<()> {
        let call = NativeCall::AddListener {
            event_name: event_name.to_string(),
        };
        self.record(call, |s| s.listeners += 1);
        Ok(())
    }

    fn listeners_removed(&self, count: usize) -> ProviderResult<()> {
        self.record(NativeCall::RemoveListeners { count }, |s| {
            s.listeners = s.listeners.saturating_sub(count)
        });
        Ok(())
    }
}

/// How the simulated Android permission prompt resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionOutcome {
    #[default]
    Granted,
    Denied,
    /// The native call throws
    Fails,
}

#[derive(Debug, Default)]
struct AndroidState {
    protected: bool,
    recording: bool,
    listeners: usize,
    permission: PermissionOutcome,
    calls: Vec<NativeCall>,
}

/// Simulated Android module with a single protection toggle
#[derive(Default)]
pub struct SimulatedAndroid {
    state: Mutex<AndroidState>,
    emitter: Mutex<Option<CaptureEventEmitter>>,
}

impl SimulatedAndroid {
    pub fn new() -> Self {
        info!("Initializing simulated Android capture protection");
        Self::default()
    }

    pub fn with_permission(self, outcome: PermissionOutcome) -> Self {
        self.state.lock().permission = outcome;
        self
    }

    pub fn connect(&self, emitter: CaptureEventEmitter) {
        *self.emitter.lock() = Some(emitter);
    }

    pub fn calls(&self) -> Vec<NativeCall> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn simulate_screenshot(&self) -> usize {
        let protected = self.state.lock().protected;
        self.emit(json!({ "type": "captured", "protected": protected }))
    }

    pub fn simulate_recording(&self, recording: bool) -> usize {
        let protected = {
            let mut state = self.state.lock();
            state.recording = recording;
            state.protected
        };
        let kind = if recording { "recording" } else { "endRecording" };
        self.emit(json!({ "type": kind, "protected": protected }))
    }

    fn emit(&self, payload: serde_json::Value) -> usize {
        let emitter = self.emitter.lock().clone();
        match emitter {
            Some(emitter) => emitter.emit(emitter.event_name(), payload),
            None => 0,
        }
    }
}

#[async_trait]
impl AndroidCapability for SimulatedAndroid {
    async fn allow(&self) -> ProviderResult<()> {
        let mut state = self.state.lock();
        state.protected = false;
        state.calls.push(NativeCall::Allow);
        Ok(())
    }

    async fn prevent(&self) -> ProviderResult<()> {
        let mut state = self.state.lock();
        state.protected = true;
        state.calls.push(NativeCall::Prevent);
        Ok(())
    }

    async fn protection_status(&self) -> ProviderResult<Option<bool>> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::ProtectionStatus);
        Ok(Some(state.protected))
    }

    async fn is_screen_recording(&self) -> ProviderResult<Option<bool>> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::IsScreenRecording);
        Ok(Some(state.recording))
    }

    async fn has_listener(&self) -> ProviderResult<Option<bool>> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::HasListener);
        Ok(Some(state.listeners > 0))
    }

    async fn request_permission(&self) -> ProviderResult<bool> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::RequestPermission);
        match state.permission {
            PermissionOutcome::Granted => Ok(true),
            PermissionOutcome::Denied => Ok(false),
            PermissionOutcome::Fails => Err(ProviderError::Native(
                "permission activity could not be started".into(),
            )),
        }
    }

    fn listener_added(&self, event_name: &str) -> ProviderResult<()> {
        let mut state = self.state.lock();
        state.listeners += 1;
        state.calls.push(NativeCall::AddListener {
            event_name: event_name.to_string(),
        });
        Ok(())
    }

    fn listeners_removed(&self, count: usize) -> ProviderResult<()> {
        let mut state = self.state.lock();
        state.listeners = state.listeners.saturating_sub(count);
        state.calls.push(NativeCall::RemoveListeners { count });
        Ok(())
    }
}
