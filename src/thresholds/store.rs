use std::collections::HashMap;

use crate::models::{Channel, Profile, ThresholdRange};

/// Current `[min, max]` bounds per channel.
///
/// Channels that were never set fall back to the profile's default bounds.
#[derive(Debug, Clone)]
pub struct ThresholdStore {
    profile: Profile,
    bounds: HashMap<Channel, (f64, f64)>,
}

impl ThresholdStore {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            bounds: HashMap::new(),
        }
    }

    /// Record the bound pair for `channel`, replacing any earlier pair.
    /// The pair is stored as given, inverted or not.
    pub fn set(&mut self, channel: Channel, min: f64, max: f64) {
        self.bounds.insert(channel, (min, max));
    }

    pub fn get(&self, channel: &Channel) -> ThresholdRange {
        let (min, max) = self
            .bounds
            .get(channel)
            .copied()
            .unwrap_or_else(|| self.profile.default_bounds());
        ThresholdRange {
            channel: channel.clone(),
            min,
            max,
        }
    }

    /// Effective range of every profile channel, in display order.
    pub fn snapshot(&self) -> Vec<ThresholdRange> {
        self.profile
            .channels()
            .iter()
            .map(|channel| self.get(channel))
            .collect()
    }
}
