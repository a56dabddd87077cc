//! Allowed sprint lengths.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

use super::command::leading_integer;

/// Length of a sprint in minutes. Only four lengths are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum SprintDuration {
    #[default]
    HalfHour,
    OneHour,
    NinetyMinutes,
    TwoHours,
}

impl SprintDuration {
    /// All lengths a sprint may be started with.
    pub const ALL: [SprintDuration; 4] = [
        SprintDuration::HalfHour,
        SprintDuration::OneHour,
        SprintDuration::NinetyMinutes,
        SprintDuration::TwoHours,
    ];

    pub fn minutes(&self) -> u32 {
        match self {
            SprintDuration::HalfHour => 30,
            SprintDuration::OneHour => 60,
            SprintDuration::NinetyMinutes => 90,
            SprintDuration::TwoHours => 120,
        }
    }

    /// Parses the optional `/sprint` argument.
    ///
    /// The leading integer is read, so `60min` means 60. A missing or
    /// non-numeric argument, or zero, falls back to the default length.
    /// Any other number that is not an allowed length is an error.
    pub fn from_arg(arg: Option<&str>) -> Result<Self, ValidationError> {
        match arg.and_then(leading_integer) {
            None | Some(0) => Ok(Self::default()),
            Some(minutes) => u32::try_from(minutes)
                .ok()
                .and_then(|m| Self::try_from(m).ok())
                .ok_or_else(|| {
                    let actual = i64::try_from(minutes)
                        .unwrap_or(if minutes < 0 { i64::MIN } else { i64::MAX });
                    ValidationError::not_allowed("duration", "30, 60, 90, 120", actual)
                }),
        }
    }
}

impl TryFrom<u32> for SprintDuration {
    type Error = ValidationError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.minutes() == minutes)
            .ok_or_else(|| {
                ValidationError::not_allowed("duration", "30, 60, 90, 120", i64::from(minutes))
            })
    }
}

impl From<SprintDuration> for u32 {
    fn from(duration: SprintDuration) -> Self {
        duration.minutes()
    }
}

impl fmt::Display for SprintDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutes", self.minutes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_thirty_minutes() {
        assert_eq!(SprintDuration::default().minutes(), 30);
    }

    #[test]
    fn missing_argument_uses_default() {
        assert_eq!(SprintDuration::from_arg(None), Ok(SprintDuration::HalfHour));
    }

    #[test]
    fn unparsable_argument_uses_default() {
        assert_eq!(SprintDuration::from_arg(Some("soon")), Ok(SprintDuration::HalfHour));
    }

    #[test]
    fn allowed_lengths_parse() {
        assert_eq!(SprintDuration::from_arg(Some("60")), Ok(SprintDuration::OneHour));
        assert_eq!(SprintDuration::from_arg(Some("90")), Ok(SprintDuration::NinetyMinutes));
        assert_eq!(SprintDuration::from_arg(Some("120")), Ok(SprintDuration::TwoHours));
    }

    #[test]
    fn zero_uses_default() {
        assert_eq!(SprintDuration::from_arg(Some("0")), Ok(SprintDuration::HalfHour));
    }

    #[test]
    fn trailing_text_after_minutes_is_ignored() {
        assert_eq!(SprintDuration::from_arg(Some("60min")), Ok(SprintDuration::OneHour));
        assert_eq!(SprintDuration::from_arg(Some("90.5")), Ok(SprintDuration::NinetyMinutes));
    }

    #[test]
    fn other_numbers_are_rejected() {
        for raw in ["45", "-30", "121", "45min", "99999999999", "999999999999999999999999"] {
            assert!(SprintDuration::from_arg(Some(raw)).is_err(), "{} should be rejected", raw);
        }
    }

    #[test]
    fn serializes_as_plain_minutes() {
        assert_eq!(serde_json::to_string(&SprintDuration::NinetyMinutes).unwrap(), "90");
        let parsed: SprintDuration = serde_json::from_str("120").unwrap();
        assert_eq!(parsed, SprintDuration::TwoHours);
        assert!(serde_json::from_str::<SprintDuration>("45").is_err());
    }
}
