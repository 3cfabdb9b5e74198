//! Monitored channels and the deployment profiles that fix them.
//!
//! Each hardware revision of the wearable reports a different set of
//! channels at a different ADC resolution. A [`Profile`] pins both down so
//! the rest of the crate never has to guess which channels to expect.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Channel(String);

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Channel {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

const PROTOTYPE_CHANNELS: [&str; 5] = [
    "Flex Sensor 1",
    "Flex Sensor 2",
    "MPU 1",
    "MPU 2",
    "Accelerometer",
];

const NETWORKED_CHANNELS: [&str; 13] = [
    "Flex_Sensor",
    "MPU1_Accelerometer_X",
    "MPU1_Accelerometer_Y",
    "MPU1_Accelerometer_Z",
    "MPU1_Gyroscope_X",
    "MPU1_Gyroscope_Y",
    "MPU1_Gyroscope_Z",
    "MPU2_Accelerometer_X",
    "MPU2_Accelerometer_Y",
    "MPU2_Accelerometer_Z",
    "MPU2_Gyroscope_X",
    "MPU2_Gyroscope_Y",
    "MPU2_Gyroscope_Z",
];

/// Hardware revision the dashboard is talking to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Profile {
    /// Five analog channels on a 10-bit ADC.
    #[default]
    Prototype,
    /// Flex sensor plus two 3-axis IMUs on a 12-bit ADC, polled over HTTP.
    Networked,
}

impl Profile {
    /// Channels in display order.
    pub fn channels(&self) -> Vec<Channel> {
        let names: &[&str] = match self {
            Profile::Prototype => &PROTOTYPE_CHANNELS,
            Profile::Networked => &NETWORKED_CHANNELS,
        };
        names.iter().map(|name| Channel::new(*name)).collect()
    }

    /// Upper bound accepted by the threshold form.
    pub fn adc_max(&self) -> u32 {
        match self {
            Profile::Prototype => 1024,
            Profile::Networked => 4095,
        }
    }

    /// Bounds a channel uses until the user submits its own.
    pub fn default_bounds(&self) -> (f64, f64) {
        match self {
            Profile::Prototype => (0.0, 256.0),
            Profile::Networked => (0.0, 4095.0),
        }
    }

    pub fn contains(&self, channel: &Channel) -> bool {
        let names: &[&str] = match self {
            Profile::Prototype => &PROTOTYPE_CHANNELS,
            Profile::Networked => &NETWORKED_CHANNELS,
        };
        names.contains(&channel.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Prototype => "prototype",
            Profile::Networked => "networked",
        }
    }
}
