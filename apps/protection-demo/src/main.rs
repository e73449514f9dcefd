//! Capture Protection Demo
//!
//! Drives the protection API against a simulated provider and prints what
//! the native layer would have been asked to do.
//!
//! Usage: protection-demo <platform> <command> [option-json]
//! Platform `host` uses the platform this binary was built for.
//! Commands: prevent, allow, status, recording, permission, listen
//! Set PROTECTION_CONFIG to a JSON file to override the defaults.

use std::sync::Arc;

use anyhow::{Context, bail};
use capture_protection::{NativeCall, ProtectionConfig, Simulation, create_simulated};
use parking_lot::Mutex;
use protection_types::{CaptureEvent, Platform, ProtectionStatus};
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    platform: Platform,
    command: String,
    result: serde_json::Value,
    status: ProtectionStatus,
    native_calls: Vec<NativeCall>,
    events: Vec<serde_json::Value>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("protection_demo=debug".parse()?)
                .add_directive("capture_protection=debug".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (platform, command, option) = match args.as_slice() {
        [platform, command] => (platform, command, None),
        [platform, command, option] => (platform, command, Some(option.as_str())),
        _ => bail!("usage: protection-demo <platform> <command> [option-json]"),
    };
    let platform = match platform.as_str() {
        "host" => Platform::current(),
        name => name.parse()?,
    };

    let config = load_config()?;
    info!("Starting capture protection demo on {}", platform);

    let Simulation { protection, provider } = create_simulated(platform, config);
    let events: Arc<Mutex<Vec<serde_json::Value>>> = Arc::default();

    let result = match command.as_str() {
        "prevent" => {
            match option {
                Some(json) => protection.prevent_json(json).await?,
                None => protection.prevent(None).await?,
            }
            serde_json::Value::Null
        }
        "allow" => {
            match option {
                Some(json) => protection.allow_json(json).await?,
                None => protection.allow(None).await?,
            }
            serde_json::Value::Null
        }
        "status" => serde_json::to_value(protection.protection_status().await?)?,
        "recording" => serde_json::to_value(protection.is_screen_recording().await?)?,
        "permission" => serde_json::Value::Bool(protection.request_permission().await),
        "listen" => {
            let sink = events.clone();
            let subscription = protection.add_listener(move |event: &CaptureEvent| {
                sink.lock().push(event.payload().clone());
            });
            protection.prevent(None).await?;
            provider.simulate_screenshot();
            provider.simulate_recording(true);
            provider.simulate_recording(false);
            let registered = protection.has_listener().await?;
            protection.remove_listener(subscription).await?;
            serde_json::json!({ "hasListener": registered })
        }
        other => bail!("unknown command: {}", other),
    };

    let report = Report {
        platform,
        command: command.clone(),
        result,
        status: protection.protection_status().await?,
        native_calls: provider.calls(),
        events: std::mem::take(&mut *events.lock()),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn load_config() -> anyhow::Result<ProtectionConfig> {
    let Ok(path) = std::env::var("PROTECTION_CONFIG") else {
        return Ok(ProtectionConfig::default());
    };
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path))?;
    let config = ProtectionConfig::from_json(&json)
        .with_context(|| format!("Invalid config {}", path))?;
    info!("Loaded config from {}", path);
    Ok(config)
}
