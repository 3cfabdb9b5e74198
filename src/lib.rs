pub mod activity;
pub mod console;
pub mod evaluator;
pub mod history;
pub mod models;
pub mod sensing;
pub mod session;
pub mod settings;
pub mod suggestion;
pub mod thresholds;
pub mod views;
mod utils;

use anyhow::{Context, Result};
use log::{info, warn};

use sensing::{DeviceClient, Source, SyntheticSource};
use session::SessionRegistry;
use settings::{DashboardSettings, SettingsStore};

/// Pick the reading source the settings ask for. A device client that
/// cannot be built falls back to simulated readings.
pub fn source_from_settings(settings: &DashboardSettings) -> Source {
    match settings.device_url.as_deref() {
        Some(url) => match DeviceClient::new(url, settings.profile, settings.fetch_timeout()) {
            Ok(client) => Source::Device(client),
            Err(err) => {
                warn!("Falling back to simulated readings: {err}");
                Source::Synthetic(SyntheticSource::for_profile(settings.profile))
            }
        },
        None => Source::Synthetic(SyntheticSource::for_profile(settings.profile)),
    }
}

pub fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("posturewatch starting up...");

    let store = SettingsStore::from_env()?;
    let settings = store.settings()?;
    info!(
        "Profile {} with {} channels",
        settings.profile.as_str(),
        settings.profile.channels().len()
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(async move {
        let registry = SessionRegistry::new(settings.session_config());
        let (session_id, handle) = registry.create().await;
        let source = source_from_settings(&settings);

        console::run(handle, source, &store).await?;

        registry.end(&session_id).await?;
        Ok::<(), anyhow::Error>(())
    })
}
