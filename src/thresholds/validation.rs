//! Input-boundary checks for threshold submissions.
//!
//! The store accepts any pair; malformed form input has to be stopped
//! here before it reaches it.

use thiserror::Error;

use crate::models::{Channel, Profile};

#[derive(Debug, Error, PartialEq)]
pub enum ThresholdInputError {
    #[error("unknown channel '{0}'")]
    UnknownChannel(String),
    #[error("{field} value '{raw}' is not a whole number")]
    NotANumber { field: &'static str, raw: String },
    #[error("{field} value {value} is outside 0..={limit}")]
    OutOfBounds {
        field: &'static str,
        value: i64,
        limit: u32,
    },
}

/// Parse a `(channel, min, max)` submission for `profile`.
///
/// Bounds must be integers in `0..=profile.adc_max()`. `min > max` is
/// accepted; the evaluator treats such a range as always out of range.
pub fn parse_threshold_input(
    profile: Profile,
    channel: &str,
    min: &str,
    max: &str,
) -> Result<(Channel, f64, f64), ThresholdInputError> {
    let channel = Channel::new(channel.trim());
    if !profile.contains(&channel) {
        return Err(ThresholdInputError::UnknownChannel(channel.to_string()));
    }

    let min = parse_bound(profile, "min", min)?;
    let max = parse_bound(profile, "max", max)?;
    Ok((channel, min, max))
}

fn parse_bound(
    profile: Profile,
    field: &'static str,
    raw: &str,
) -> Result<f64, ThresholdInputError> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ThresholdInputError::NotANumber {
            field,
            raw: raw.to_string(),
        })?;

    validate_bound(profile, field, value as f64)
}

/// Check an already-numeric bound, e.g. one read from the settings file.
/// It must be a whole number in `0..=profile.adc_max()`.
pub fn validate_bound(
    profile: Profile,
    field: &'static str,
    value: f64,
) -> Result<f64, ThresholdInputError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(ThresholdInputError::NotANumber {
            field,
            raw: value.to_string(),
        });
    }

    let limit = profile.adc_max();
    if value < 0.0 || value > f64::from(limit) {
        return Err(ThresholdInputError::OutOfBounds {
            field,
            value: value as i64,
            limit,
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds_within_adc_range() {
        let (channel, min, max) =
            parse_threshold_input(Profile::Prototype, "MPU 1", "0", "1024").unwrap();
        assert_eq!(channel, Channel::from("MPU 1"));
        assert_eq!((min, max), (0.0, 1024.0));
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = parse_threshold_input(Profile::Prototype, "MPU 1", "abc", "10").unwrap_err();
        assert!(matches!(err, ThresholdInputError::NotANumber { field: "min", .. }));

        let err = parse_threshold_input(Profile::Prototype, "MPU 1", "1", "2.5").unwrap_err();
        assert!(matches!(err, ThresholdInputError::NotANumber { field: "max", .. }));
    }

    #[test]
    fn adc_limit_depends_on_profile() {
        let err = parse_threshold_input(Profile::Prototype, "MPU 1", "0", "2000").unwrap_err();
        assert_eq!(
            err,
            ThresholdInputError::OutOfBounds {
                field: "max",
                value: 2000,
                limit: 1024
            }
        );

        assert!(parse_threshold_input(Profile::Networked, "Flex_Sensor", "0", "2000").is_ok());
        assert!(parse_threshold_input(Profile::Networked, "Flex_Sensor", "-1", "2000").is_err());
    }

    #[test]
    fn rejects_channels_outside_profile() {
        let err = parse_threshold_input(Profile::Prototype, "Flex_Sensor", "0", "1").unwrap_err();
        assert_eq!(err, ThresholdInputError::UnknownChannel("Flex_Sensor".into()));
    }

    #[test]
    fn numeric_bounds_share_the_form_rules() {
        assert_eq!(validate_bound(Profile::Prototype, "min", 0.0), Ok(0.0));
        assert_eq!(validate_bound(Profile::Networked, "max", 4095.0), Ok(4095.0));
        assert!(matches!(
            validate_bound(Profile::Prototype, "min", -50.0),
            Err(ThresholdInputError::OutOfBounds { field: "min", value: -50, limit: 1024 })
        ));
        assert!(matches!(
            validate_bound(Profile::Prototype, "max", 99999.5),
            Err(ThresholdInputError::NotANumber { field: "max", .. })
        ));
        assert!(validate_bound(Profile::Prototype, "max", f64::NAN).is_err());
    }

    #[test]
    fn inverted_pair_passes_the_boundary() {
        let (_, min, max) =
            parse_threshold_input(Profile::Prototype, "MPU 2", "300", "100").unwrap();
        assert!(min > max);
    }
}
