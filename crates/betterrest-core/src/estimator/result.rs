//! Bedtime values handed to the display layer.

use std::fmt;

use chrono::{Duration, NaiveTime};

use super::clock::TimeFormat;
use crate::error::{EstimationError, FALLBACK_MESSAGE};

/// A computed bedtime together with the prediction it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bedtime {
    pub time: NaiveTime,
    /// Predicted actual sleep within one day
    pub predicted_sleep: Duration,
}

impl Bedtime {
    pub fn format(&self, format: TimeFormat) -> String {
        format.format(self.time)
    }
}

/// What the front end displays: a bedtime or the fallback message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BedtimeResult {
    Bedtime(String),
    Unavailable,
}

impl BedtimeResult {
    pub fn is_available(&self) -> bool {
        matches!(self, BedtimeResult::Bedtime(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            BedtimeResult::Bedtime(text) => text,
            BedtimeResult::Unavailable => FALLBACK_MESSAGE,
        }
    }
}

impl From<Result<String, EstimationError>> for BedtimeResult {
    fn from(result: Result<String, EstimationError>) -> Self {
        match result {
            Ok(text) => BedtimeResult::Bedtime(text),
            Err(_) => BedtimeResult::Unavailable,
        }
    }
}

impl fmt::Display for BedtimeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredictionError;

    #[test]
    fn unavailable_displays_fallback() {
        let result = BedtimeResult::from(Err(EstimationError::Inference(
            PredictionError::NonFiniteOutput,
        )));
        assert!(!result.is_available());
        assert_eq!(result.to_string(), FALLBACK_MESSAGE);
    }

    #[test]
    fn bedtime_displays_time() {
        let result = BedtimeResult::from(Ok("11:00 PM".to_string()));
        assert!(result.is_available());
        assert_eq!(result.to_string(), "11:00 PM");
    }
}
