//! Time-of-day arithmetic and short time formatting.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const SECONDS_PER_DAY: i64 = 86_400;
const NANOS_PER_SECOND: f64 = 1e9;

/// Short time style used to display a bedtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    /// "11:00 PM"
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    /// "23:00"
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl TimeFormat {
    /// Hour and minute only. Seconds are truncated.
    pub fn format(&self, time: NaiveTime) -> String {
        match self {
            TimeFormat::TwelveHour => time.format("%-I:%M %p").to_string(),
            TimeFormat::TwentyFourHour => time.format("%H:%M").to_string(),
        }
    }
}

impl FromStr for TimeFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "12h" | "12" => Ok(TimeFormat::TwelveHour),
            "24h" | "24" => Ok(TimeFormat::TwentyFourHour),
            other => Err(ValidationError::InvalidValue {
                field: "time_format".into(),
                message: format!("'{other}' is not one of 12h, 24h"),
            }),
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFormat::TwelveHour => write!(f, "12h"),
            TimeFormat::TwentyFourHour => write!(f, "24h"),
        }
    }
}

/// Duration for a predicted number of seconds, kept to the nanosecond.
///
/// Callers must pass a finite value. It is reduced modulo one day since only
/// the time of day matters, so a negative prediction lands after the wake
/// time.
pub fn sleep_duration(predicted_seconds: f64) -> Duration {
    let within_day = predicted_seconds.rem_euclid(SECONDS_PER_DAY as f64);
    Duration::nanoseconds((within_day * NANOS_PER_SECOND).round() as i64)
}

/// Time of day `sleep` before `wake`, wrapping across midnight.
pub fn bedtime_before(wake: NaiveTime, sleep: Duration) -> NaiveTime {
    let (bedtime, _) = wake.overflowing_sub_signed(sleep);
    bedtime
}

/// Minutes from `bedtime` forward to `wake`, in [0, 1440).
pub fn minutes_until(bedtime: NaiveTime, wake: NaiveTime) -> i64 {
    let diff = (wake - bedtime).num_minutes();
    diff.rem_euclid(SECONDS_PER_DAY / 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn twelve_hour_format() {
        assert_eq!(TimeFormat::TwelveHour.format(hm(23, 0)), "11:00 PM");
        assert_eq!(TimeFormat::TwelveHour.format(hm(0, 5)), "12:05 AM");
        assert_eq!(TimeFormat::TwelveHour.format(hm(9, 30)), "9:30 AM");
    }

    #[test]
    fn twenty_four_hour_format() {
        assert_eq!(TimeFormat::TwentyFourHour.format(hm(16, 30)), "16:30");
        assert_eq!(TimeFormat::TwentyFourHour.format(hm(0, 0)), "00:00");
    }

    #[test]
    fn format_truncates_seconds() {
        let time = NaiveTime::from_hms_opt(23, 7, 59).unwrap();
        assert_eq!(TimeFormat::TwentyFourHour.format(time), "23:07");
    }

    #[test]
    fn bedtime_wraps_across_midnight() {
        let sleep = sleep_duration(8.5 * 3600.0);
        assert_eq!(bedtime_before(hm(1, 0), sleep), hm(16, 30));
    }

    #[test]
    fn bedtime_same_day() {
        let sleep = sleep_duration(2.0 * 3600.0);
        assert_eq!(bedtime_before(hm(7, 0), sleep), hm(5, 0));
    }

    #[test]
    fn sleep_duration_keeps_fractional_seconds() {
        assert_eq!(sleep_duration(59.4).num_milliseconds(), 59_400);
        assert_eq!(sleep_duration(59.6).num_milliseconds(), 59_600);
    }

    #[test]
    fn fractional_second_crosses_minute_boundary() {
        let bedtime = bedtime_before(hm(7, 0), sleep_duration(8.0 * 3600.0 + 0.4));
        assert_eq!(bedtime, NaiveTime::from_hms_milli_opt(22, 59, 59, 600).unwrap());
        assert_eq!(TimeFormat::TwelveHour.format(bedtime), "10:59 PM");
    }

    #[test]
    fn negative_prediction_wraps_after_wake() {
        let bedtime = bedtime_before(hm(7, 0), sleep_duration(-60.0));
        assert_eq!(bedtime, hm(7, 1));
    }

    #[test]
    fn sleep_duration_reduces_full_days() {
        assert_eq!(sleep_duration(86_400.0 + 60.0).num_seconds(), 60);
        assert!(sleep_duration(1e300).num_seconds() <= SECONDS_PER_DAY);
    }

    #[test]
    fn minutes_until_handles_wrap() {
        assert_eq!(minutes_until(hm(23, 0), hm(7, 0)), 480);
        assert_eq!(minutes_until(hm(5, 0), hm(7, 0)), 120);
        assert_eq!(minutes_until(hm(7, 0), hm(7, 0)), 0);
    }

    #[test]
    fn time_format_parses() {
        assert_eq!("12h".parse::<TimeFormat>().unwrap(), TimeFormat::TwelveHour);
        assert_eq!("24H".parse::<TimeFormat>().unwrap(), TimeFormat::TwentyFourHour);
        assert!("36h".parse::<TimeFormat>().is_err());
    }
}
