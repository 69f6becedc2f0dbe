//! The three values a user supplies: wake-up time, desired sleep and coffee intake.
//!
//! Each newtype only constructs values inside the range the input controls
//! allow, so code holding one never has to re-check bounds.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Desired wake-up time of day. Defaults to 07:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WakeTime(NaiveTime);

impl WakeTime {
    /// Create a wake time from hour (0-23) and minute (0-59).
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidTime(format!("{hour:02}:{minute:02}")))
    }

    /// Seconds since midnight, ignoring any seconds component.
    pub fn seconds_since_midnight(&self) -> u32 {
        self.0.hour() * 3600 + self.0.minute() * 60
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }
}

impl Default for WakeTime {
    fn default() -> Self {
        Self(NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN))
    }
}

impl From<NaiveTime> for WakeTime {
    /// Drops seconds and sub-second precision.
    fn from(time: NaiveTime) -> Self {
        Self::new(time.hour(), time.minute()).unwrap_or_default()
    }
}

impl FromStr for WakeTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self)
            .map_err(|_| ValidationError::InvalidTime(s.to_string()))
    }
}

impl fmt::Display for WakeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Desired hours of sleep, in [4.0, 12.0] at 0.25 steps.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SleepAmount(f64);

impl SleepAmount {
    pub const MIN: f64 = 4.0;
    pub const MAX: f64 = 12.0;
    pub const STEP: f64 = 0.25;

    /// Range-checked. The value is kept as given; [`Self::STEP`] only
    /// applies to the stepper.
    pub fn new(hours: f64) -> Result<Self, ValidationError> {
        if !hours.is_finite() || !(Self::MIN..=Self::MAX).contains(&hours) {
            return Err(ValidationError::InvalidValue {
                field: "sleep_amount".into(),
                message: format!(
                    "{hours} is outside {}..={} hours",
                    Self::MIN,
                    Self::MAX
                ),
            });
        }
        Ok(Self(hours))
    }

    pub fn hours(&self) -> f64 {
        self.0
    }

    /// One step up, saturating at [`Self::MAX`].
    pub fn increment(self) -> Self {
        Self((self.0 + Self::STEP).min(Self::MAX))
    }

    /// One step down, saturating at [`Self::MIN`].
    pub fn decrement(self) -> Self {
        Self((self.0 - Self::STEP).max(Self::MIN))
    }
}

impl Default for SleepAmount {
    fn default() -> Self {
        Self(8.0)
    }
}

impl TryFrom<f64> for SleepAmount {
    type Error = ValidationError;

    fn try_from(hours: f64) -> Result<Self, Self::Error> {
        Self::new(hours)
    }
}

impl From<SleepAmount> for f64 {
    fn from(amount: SleepAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for SleepAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64 Display already drops trailing zeros ("8", "8.25")
        write!(f, "{} hours", self.0)
    }
}

/// Cups of coffee per day, in [1, 20].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CoffeeCount(u32);

impl CoffeeCount {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 20;

    pub fn new(cups: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&cups) {
            return Err(ValidationError::InvalidValue {
                field: "coffee_cups".into(),
                message: format!("{cups} is outside {}..={} cups", Self::MIN, Self::MAX),
            });
        }
        Ok(Self(cups))
    }

    pub fn cups(&self) -> u32 {
        self.0
    }

    /// Every selectable value, in picker order.
    pub fn all() -> impl Iterator<Item = CoffeeCount> {
        (Self::MIN..=Self::MAX).map(CoffeeCount)
    }
}

impl Default for CoffeeCount {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u32> for CoffeeCount {
    type Error = ValidationError;

    fn try_from(cups: u32) -> Result<Self, Self::Error> {
        Self::new(cups)
    }
}

impl From<CoffeeCount> for u32 {
    fn from(count: CoffeeCount) -> Self {
        count.0
    }
}

impl fmt::Display for CoffeeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            write!(f, "1 cup")
        } else {
            write!(f, "{} cups", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wake_time_defaults_to_seven() {
        let wake = WakeTime::default();
        assert_eq!(wake.hour(), 7);
        assert_eq!(wake.minute(), 0);
        assert_eq!(wake.seconds_since_midnight(), 25_200);
    }

    #[test]
    fn wake_time_seconds_since_midnight() {
        assert_eq!(WakeTime::new(0, 0).unwrap().seconds_since_midnight(), 0);
        assert_eq!(WakeTime::new(6, 45).unwrap().seconds_since_midnight(), 24_300);
        assert_eq!(WakeTime::new(23, 59).unwrap().seconds_since_midnight(), 86_340);
    }

    #[test]
    fn wake_time_rejects_out_of_range() {
        assert!(WakeTime::new(24, 0).is_err());
        assert!(WakeTime::new(7, 60).is_err());
    }

    #[test]
    fn wake_time_parses_and_displays() {
        let wake: WakeTime = "06:30".parse().unwrap();
        assert_eq!(wake, WakeTime::new(6, 30).unwrap());
        assert_eq!(wake.to_string(), "06:30");
        assert!("6.30".parse::<WakeTime>().is_err());
        assert!("".parse::<WakeTime>().is_err());
    }

    #[test]
    fn wake_time_from_naive_time_drops_seconds() {
        let time = NaiveTime::from_hms_opt(7, 15, 42).unwrap();
        assert_eq!(WakeTime::from(time).seconds_since_midnight(), 26_100);
    }

    #[test]
    fn sleep_amount_bounds() {
        assert!(SleepAmount::new(4.0).is_ok());
        assert!(SleepAmount::new(12.0).is_ok());
        assert!(SleepAmount::new(3.75).is_err());
        assert!(SleepAmount::new(12.25).is_err());
        assert!(SleepAmount::new(f64::NAN).is_err());
        assert!(SleepAmount::new(f64::INFINITY).is_err());
    }

    #[test]
    fn sleep_amount_keeps_off_step_values() {
        assert_eq!(SleepAmount::new(7.9).unwrap().hours(), 7.9);
        assert_eq!(SleepAmount::new(8.1).unwrap().hours(), 8.1);
        assert_eq!(SleepAmount::new(7.5).unwrap().hours(), 7.5);
    }

    #[test]
    fn sleep_amount_stepper_saturates() {
        let max = SleepAmount::new(12.0).unwrap();
        assert_eq!(max.increment().hours(), 12.0);
        let min = SleepAmount::new(4.0).unwrap();
        assert_eq!(min.decrement().hours(), 4.0);
        assert_eq!(SleepAmount::default().increment().hours(), 8.25);
    }

    #[test]
    fn sleep_amount_display() {
        assert_eq!(SleepAmount::default().to_string(), "8 hours");
        assert_eq!(SleepAmount::new(8.25).unwrap().to_string(), "8.25 hours");
    }

    #[test]
    fn coffee_count_bounds() {
        assert!(CoffeeCount::new(0).is_err());
        assert!(CoffeeCount::new(1).is_ok());
        assert!(CoffeeCount::new(20).is_ok());
        assert!(CoffeeCount::new(21).is_err());
        assert_eq!(CoffeeCount::all().count(), 20);
    }

    #[test]
    fn coffee_count_display() {
        assert_eq!(CoffeeCount::new(1).unwrap().to_string(), "1 cup");
        assert_eq!(CoffeeCount::new(3).unwrap().to_string(), "3 cups");
    }

    #[test]
    fn serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<SleepAmount>("20.0").is_err());
        assert!(serde_json::from_str::<CoffeeCount>("0").is_err());
        let amount: SleepAmount = serde_json::from_str("6.5").unwrap();
        assert_eq!(amount.hours(), 6.5);
    }
}
