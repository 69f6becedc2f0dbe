//! Sleep prediction models.
//!
//! The estimator never looks inside a model. It only needs something that
//! implements [`SleepPredictor`]: the on-disk [`SleepCalculatorModel`] in
//! production, or a closure returning a fixed duration in tests.

mod sleep_calculator;

pub use sleep_calculator::{
    Coefficients, ModelSource, SleepCalculatorModel, BUNDLED_MODEL_JSON, INPUT_NAMES, OUTPUT_NAME,
};

use serde::Serialize;

use crate::error::PredictionError;

/// Feature vector fed to a sleep model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepFeatures {
    /// Wake-up time as seconds since midnight
    pub wake: f64,
    /// Desired sleep in hours
    pub estimated_sleep: f64,
    /// Cups of coffee per day
    pub coffee: f64,
}

impl SleepFeatures {
    pub fn new(wake: f64, estimated_sleep: f64, coffee: f64) -> Self {
        Self {
            wake,
            estimated_sleep,
            coffee,
        }
    }

    /// Fail on the first NaN or infinite feature.
    pub fn ensure_finite(&self) -> Result<(), PredictionError> {
        let named = [
            ("wake", self.wake),
            ("estimatedSleep", self.estimated_sleep),
            ("coffee", self.coffee),
        ];
        match named.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, _)) => Err(PredictionError::NonFiniteFeature { name: *name }),
            None => Ok(()),
        }
    }
}

/// Trait for sleep prediction implementations.
///
/// Implementations must be read-only after construction so that a single
/// instance can serve concurrent callers.
pub trait SleepPredictor: Send + Sync {
    /// Predict actual sleep, in seconds, for the given features.
    fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictionError>;
}

/// Predictor backed by a closure. Created with [`from_fn`].
#[derive(Clone)]
pub struct FnPredictor<F>(F);

/// Wrap a closure as a [`SleepPredictor`].
pub fn from_fn<F>(f: F) -> FnPredictor<F>
where
    F: Fn(&SleepFeatures) -> Result<f64, PredictionError> + Send + Sync,
{
    FnPredictor(f)
}

impl<F> SleepPredictor for FnPredictor<F>
where
    F: Fn(&SleepFeatures) -> Result<f64, PredictionError> + Send + Sync,
{
    fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictionError> {
        (self.0)(features)
    }
}

impl<P: SleepPredictor + ?Sized> SleepPredictor for Box<P> {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictionError> {
        (**self).predict(features)
    }
}

impl<P: SleepPredictor + ?Sized> SleepPredictor for std::sync::Arc<P> {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictionError> {
        (**self).predict(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_wrap_as_predictors() {
        let fixed = from_fn(|_| Ok(28_800.0));
        let features = SleepFeatures::new(25_200.0, 8.0, 1.0);
        assert_eq!(fixed.predict(&features).unwrap(), 28_800.0);
    }

    #[test]
    fn boxed_predictors_delegate() {
        let boxed: Box<dyn SleepPredictor> = Box::new(from_fn(|f| Ok(f.coffee * 10.0)));
        let features = SleepFeatures::new(0.0, 8.0, 3.0);
        assert_eq!(boxed.predict(&features).unwrap(), 30.0);
    }

    #[test]
    fn ensure_finite_names_the_bad_feature() {
        let features = SleepFeatures::new(0.0, f64::NAN, 1.0);
        match features.ensure_finite() {
            Err(PredictionError::NonFiniteFeature { name }) => assert_eq!(name, "estimatedSleep"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(SleepFeatures::new(0.0, 8.0, 1.0).ensure_finite().is_ok());
    }
}
