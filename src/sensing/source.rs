use std::collections::BTreeMap;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Channel, Profile, ReadingSnapshot, SampleValue};

use super::{DeviceClient, FetchError};

/// Where refreshed snapshots come from.
#[allow(async_fn_in_trait)]
pub trait ReadingSource {
    async fn fetch(&mut self) -> Result<ReadingSnapshot, FetchError>;

    fn describe(&self) -> String;
}

/// Bench values used before the hardware was networked.
const PROTOTYPE_VALUES: [(&str, f64); 5] = [
    ("Flex Sensor 1", 150.0),
    ("Flex Sensor 2", 100.0),
    ("MPU 1", 300.0),
    ("MPU 2", 50.0),
    ("Accelerometer", 200.0),
];

const NETWORKED_BASELINE: f64 = 2048.0;

/// Generates snapshots locally, either constant or jittered around a base.
pub struct SyntheticSource {
    base: BTreeMap<Channel, f64>,
    jitter: Option<(f64, StdRng)>,
}

impl SyntheticSource {
    pub fn fixed(base: BTreeMap<Channel, f64>) -> Self {
        Self { base, jitter: None }
    }

    pub fn for_profile(profile: Profile) -> Self {
        let base = match profile {
            Profile::Prototype => PROTOTYPE_VALUES
                .iter()
                .map(|(name, value)| (Channel::new(*name), *value))
                .collect(),
            Profile::Networked => profile
                .channels()
                .into_iter()
                .map(|channel| (channel, NETWORKED_BASELINE))
                .collect(),
        };
        Self::fixed(base)
    }

    /// Add uniform noise in `[-spread, spread]` to every value.
    pub fn jittered(mut self, spread: f64, seed: u64) -> Self {
        self.jitter = Some((spread.abs(), StdRng::seed_from_u64(seed)));
        self
    }

    fn next_snapshot(&mut self) -> ReadingSnapshot {
        let mut snapshot = ReadingSnapshot::new(Utc::now());
        for (channel, base) in &self.base {
            let value = match self.jitter.as_mut() {
                Some((spread, rng)) if *spread > 0.0 => {
                    let spread = *spread;
                    base + rng.gen_range(-spread..=spread)
                }
                _ => *base,
            };
            snapshot.insert(channel.clone(), SampleValue::from_f64(value));
        }
        snapshot
    }
}

impl ReadingSource for SyntheticSource {
    async fn fetch(&mut self) -> Result<ReadingSnapshot, FetchError> {
        Ok(self.next_snapshot())
    }

    fn describe(&self) -> String {
        match &self.jitter {
            Some((spread, _)) => format!("synthetic (±{spread})"),
            None => "synthetic (fixed)".to_string(),
        }
    }
}

impl ReadingSource for DeviceClient {
    async fn fetch(&mut self) -> Result<ReadingSnapshot, FetchError> {
        self.fetch_snapshot().await
    }

    fn describe(&self) -> String {
        format!("device at {}", self.base_url())
    }
}

/// Source picked at startup from the settings.
pub enum Source {
    Synthetic(SyntheticSource),
    Device(DeviceClient),
}

impl Source {
    pub fn device(&self) -> Option<&DeviceClient> {
        match self {
            Source::Device(client) => Some(client),
            Source::Synthetic(_) => None,
        }
    }
}

impl ReadingSource for Source {
    async fn fetch(&mut self) -> Result<ReadingSnapshot, FetchError> {
        match self {
            Source::Synthetic(source) => source.fetch().await,
            Source::Device(client) => client.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Source::Synthetic(source) => source.describe(),
            Source::Device(client) => client.describe(),
        }
    }
}
