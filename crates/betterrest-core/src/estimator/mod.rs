//! Bedtime estimation.
//!
//! [`BedtimeEstimator`] turns a wake-up time, desired sleep and coffee intake
//! into a bedtime by asking a [`SleepPredictor`] how much sleep the user will
//! actually get and counting that far back from the wake time.
//!
//! Failures never leak to the display: every error renders as
//! [`FALLBACK_MESSAGE`](crate::error::FALLBACK_MESSAGE), while the real cause
//! stays on the error's `source()` and is logged.

mod clock;
mod result;

pub use clock::{bedtime_before, minutes_until, sleep_duration, TimeFormat};
pub use result::{Bedtime, BedtimeResult};

use crate::error::{EstimationError, PredictionError};
use crate::inputs::{CoffeeCount, SleepAmount, WakeTime};
use crate::model::{ModelSource, SleepCalculatorModel, SleepFeatures, SleepPredictor};

/// Computes bedtimes from a sleep predictor.
///
/// Holds no mutable state, so one estimator can be shared across threads.
#[derive(Debug, Clone)]
pub struct BedtimeEstimator<P> {
    predictor: P,
    time_format: TimeFormat,
}

impl<P: SleepPredictor> BedtimeEstimator<P> {
    pub fn new(predictor: P) -> Self {
        Self {
            predictor,
            time_format: TimeFormat::default(),
        }
    }

    pub fn with_time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }

    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Compute the bedtime for already-validated inputs.
    pub fn bedtime(
        &self,
        wake: WakeTime,
        sleep_amount: SleepAmount,
        coffee: CoffeeCount,
    ) -> Result<Bedtime, EstimationError> {
        let features = SleepFeatures::new(
            f64::from(wake.seconds_since_midnight()),
            sleep_amount.hours(),
            f64::from(coffee.cups()),
        );

        let predicted = self.predictor.predict(&features)?;
        if !predicted.is_finite() {
            return Err(PredictionError::NonFiniteOutput.into());
        }

        let predicted_sleep = sleep_duration(predicted);
        let time = bedtime_before(wake.as_naive_time(), predicted_sleep);
        tracing::debug!(
            wake = %wake,
            sleep_amount = sleep_amount.hours(),
            coffee = coffee.cups(),
            predicted_seconds = predicted,
            bedtime = %time,
            "estimated bedtime"
        );

        Ok(Bedtime {
            time,
            predicted_sleep,
        })
    }

    /// Estimate a bedtime from raw input values.
    ///
    /// Values outside the ranges the input controls allow are rejected
    /// rather than passed to the model.
    pub fn estimate(
        &self,
        wake: WakeTime,
        sleep_amount: f64,
        coffee_count: u32,
    ) -> Result<String, EstimationError> {
        let sleep_amount = SleepAmount::new(sleep_amount)?;
        let coffee = CoffeeCount::new(coffee_count)?;
        let bedtime = self.bedtime(wake, sleep_amount, coffee)?;
        Ok(bedtime.format(self.time_format))
    }

    /// Like [`estimate`](Self::estimate), collapsed to what gets displayed.
    pub fn describe(&self, wake: WakeTime, sleep_amount: f64, coffee_count: u32) -> BedtimeResult {
        let result = self.estimate(wake, sleep_amount, coffee_count);
        if let Err(ref err) = result {
            log_failure(err);
        }
        BedtimeResult::from(result)
    }
}

impl BedtimeEstimator<SleepCalculatorModel> {
    /// Load the model from `source` and build an estimator around it.
    pub fn from_source(source: &ModelSource) -> Result<Self, EstimationError> {
        let model = source.load().map_err(EstimationError::from)?;
        Ok(Self::new(model))
    }
}

/// Load the model and estimate in one step, as the form does on every change.
pub fn calculate_bedtime(
    source: &ModelSource,
    wake: WakeTime,
    sleep_amount: f64,
    coffee_count: u32,
    time_format: TimeFormat,
) -> BedtimeResult {
    match BedtimeEstimator::from_source(source) {
        Ok(estimator) => estimator
            .with_time_format(time_format)
            .describe(wake, sleep_amount, coffee_count),
        Err(err) => {
            log_failure(&err);
            BedtimeResult::Unavailable
        }
    }
}

fn log_failure(err: &EstimationError) {
    let cause = std::error::Error::source(err)
        .map(|source| source.to_string())
        .unwrap_or_default();
    tracing::warn!(kind = ?err.kind(), %cause, "bedtime estimation failed");
}
