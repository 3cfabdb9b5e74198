use std::collections::BTreeMap;
use std::time::Duration;
use std::{fs, path::PathBuf, sync::RwLock};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{Channel, Profile};
use crate::session::SessionConfig;

pub const CONFIG_PATH_ENV: &str = "POSTUREWATCH_CONFIG";
pub const DEVICE_URL_ENV: &str = "POSTUREWATCH_DEVICE_URL";
pub const DEFAULT_CONFIG_PATH: &str = "posturewatch.json";

const DEFAULT_FETCH_TIMEOUT_MS: u64 = 2_000;
const DEFAULT_HISTORY_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSettings {
    pub profile: Profile,
    /// Device root URL; without one readings are simulated.
    pub device_url: Option<String>,
    pub fetch_timeout_ms: u64,
    /// `None` keeps every snapshot for the whole session.
    pub history_capacity: Option<usize>,
    pub thresholds: BTreeMap<String, [f64; 2]>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            device_url: None,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            history_capacity: Some(DEFAULT_HISTORY_CAPACITY),
            thresholds: BTreeMap::new(),
        }
    }
}

impl DashboardSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            profile: self.profile,
            history_capacity: self.history_capacity,
            fetch_timeout: self.fetch_timeout(),
            initial_thresholds: self
                .thresholds
                .iter()
                .map(|(name, [min, max])| (Channel::new(name.as_str()), *min, *max))
                .collect(),
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<DashboardSettings>,
}

impl SettingsStore {
    /// Load settings from `path`. A missing or unparsable file yields the
    /// defaults; an unreadable one is an error.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("Ignoring invalid settings in {}: {err}", path.display());
                DashboardSettings::default()
            })
        } else {
            DashboardSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Resolve the settings path from the environment and apply the
    /// device URL override.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let store = Self::new(path)?;

        if let Ok(url) = std::env::var(DEVICE_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                store.write()?.device_url = Some(url.to_string());
            }
        }

        Ok(store)
    }

    pub fn settings(&self) -> Result<DashboardSettings> {
        self.data
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| anyhow!("settings lock poisoned"))
    }

    /// Point the dashboard at a different device and persist the change.
    pub fn update_device(&self, device_url: Option<String>) -> Result<()> {
        let mut guard = self.write()?;
        guard.device_url = device_url;
        self.persist(&guard)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, DashboardSettings>> {
        self.data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))
    }

    fn persist(&self, data: &DashboardSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "posturewatch-{name}-{}.json",
            uuid::Uuid::new_v4()
        ))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let store = SettingsStore::new(temp_path("missing")).unwrap();
        let settings = store.settings().unwrap();
        assert_eq!(settings, DashboardSettings::default());
        assert_eq!(settings.fetch_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let path = temp_path("partial");
        fs::write(
            &path,
            r#"{ "profile": "networked", "thresholds": { "Flex_Sensor": [100, 3000] } }"#,
        )
        .unwrap();

        let settings = SettingsStore::new(path.clone()).unwrap().settings().unwrap();
        assert_eq!(settings.profile, Profile::Networked);
        assert_eq!(settings.fetch_timeout_ms, 2_000);

        let config = settings.session_config();
        assert_eq!(
            config.initial_thresholds,
            vec![(Channel::from("Flex_Sensor"), 100.0, 3000.0)]
        );
        let _ = fs::remove_file(path);
    }

    #[test]
    fn garbage_file_falls_back_to_defaults() {
        let path = temp_path("garbage");
        fs::write(&path, "not json").unwrap();
        let settings = SettingsStore::new(path.clone()).unwrap().settings().unwrap();
        assert_eq!(settings, DashboardSettings::default());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn device_update_is_persisted() {
        let path = temp_path("persist");
        let store = SettingsStore::new(path.clone()).unwrap();
        store
            .update_device(Some("http://192.168.4.1".into()))
            .unwrap();

        let reloaded = SettingsStore::new(path.clone()).unwrap().settings().unwrap();
        assert_eq!(reloaded.device_url.as_deref(), Some("http://192.168.4.1"));
        let _ = fs::remove_file(path);
    }

    #[tokio::test]
    async fn file_thresholds_outside_the_adc_range_are_not_applied() {
        let path = temp_path("bounds");
        fs::write(
            &path,
            r#"{ "thresholds": { "MPU 1": [-50, 99999.5], "Flex Sensor 1": [20, 200] } }"#,
        )
        .unwrap();

        let settings = SettingsStore::new(path.clone()).unwrap().settings().unwrap();
        let registry = crate::session::SessionRegistry::new(settings.session_config());
        let (_, handle) = registry.create().await;
        let session = handle.lock().await;

        let mpu = session.threshold(&Channel::from("MPU 1"));
        assert_eq!((mpu.min, mpu.max), (0.0, 256.0));
        let flex = session.threshold(&Channel::from("Flex Sensor 1"));
        assert_eq!((flex.min, flex.max), (20.0, 200.0));
        let _ = fs::remove_file(path);
    }
}
