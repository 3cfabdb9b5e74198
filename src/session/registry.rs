use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::{info, warn};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{Channel, Profile, SessionInfo};
use crate::thresholds::validate_bound;

use super::DashboardSession;

pub type SessionHandle = Arc<Mutex<DashboardSession>>;

/// Settings every new session starts from.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub profile: Profile,
    pub history_capacity: Option<usize>,
    pub fetch_timeout: Duration,
    pub initial_thresholds: Vec<(Channel, f64, f64)>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            history_capacity: None,
            fetch_timeout: Duration::from_secs(2),
            initial_thresholds: Vec::new(),
        }
    }
}

/// Keeps sessions isolated from each other. Each handle serializes access to
/// its own session; sessions never share state.
#[derive(Clone)]
pub struct SessionRegistry {
    config: SessionConfig,
    sessions: Arc<Mutex<HashMap<String, SessionHandle>>>,
}

impl SessionRegistry {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn create(&self) -> (String, SessionHandle) {
        let id = Uuid::new_v4().to_string();
        let mut session = DashboardSession::new(
            id.clone(),
            self.config.profile,
            self.config.history_capacity,
            self.config.fetch_timeout,
        );

        let profile = self.config.profile;
        for (channel, min, max) in &self.config.initial_thresholds {
            if !profile.contains(channel) {
                warn!(
                    "Ignoring configured threshold for '{}': not a {} channel",
                    channel,
                    profile.as_str()
                );
                continue;
            }

            let checked = validate_bound(profile, "min", *min)
                .and_then(|min| Ok((min, validate_bound(profile, "max", *max)?)));
            match checked {
                Ok((min, max)) => session.set_threshold(channel.clone(), min, max),
                Err(err) => warn!("Ignoring configured threshold for '{channel}': {err}"),
            }
        }

        let handle = Arc::new(Mutex::new(session));
        self.sessions.lock().await.insert(id.clone(), Arc::clone(&handle));
        info!("Started dashboard session {id}");
        (id, handle)
    }

    pub async fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.lock().await.get(id).cloned()
    }

    /// Remove a session and return its final summary.
    pub async fn end(&self, id: &str) -> Result<SessionInfo> {
        let handle = self
            .sessions
            .lock()
            .await
            .remove(id)
            .ok_or_else(|| anyhow!("no session with id {id}"))?;

        let mut session = handle.lock().await;
        session.end(Utc::now());
        let summary = session.info();
        info!(
            "Dashboard session {} {} after {} snapshots",
            summary.id,
            summary.status.as_str(),
            summary.snapshot_count
        );
        Ok(summary)
    }

    pub async fn list(&self) -> Vec<SessionInfo> {
        let handles: Vec<SessionHandle> = self.sessions.lock().await.values().cloned().collect();
        let mut infos = Vec::with_capacity(handles.len());
        for handle in handles {
            infos.push(handle.lock().await.info());
        }
        infos.sort_by_key(|info| info.started_at);
        infos
    }
}
