//! # BetterRest Core Library
//!
//! This library provides the core logic for BetterRest: given when a user
//! wants to wake up, how long they want to sleep and how much coffee they
//! drink, it recommends a bedtime by querying a pre-trained sleep model.
//! Front ends (the `betterrest` CLI, or any GUI) only supply three values and
//! display one string.
//!
//! ## Architecture
//!
//! - **Inputs**: Range-checked wake time, sleep amount and coffee count
//! - **Model**: The [`SleepPredictor`] capability and the JSON
//!   SleepCalculator artifact that implements it
//! - **Estimator**: Bedtime arithmetic and the single fallback message
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`BedtimeEstimator`]: Turns inputs into a formatted bedtime
//! - [`SleepCalculatorModel`]: The bundled or on-disk regression model
//! - [`Config`]: Application configuration management

pub mod error;
pub mod estimator;
pub mod inputs;
pub mod model;
pub mod storage;

pub use error::{
    ConfigError, CoreError, EstimationError, EstimationErrorKind, ModelError, PredictionError,
    ValidationError, FALLBACK_MESSAGE,
};
pub use estimator::{calculate_bedtime, Bedtime, BedtimeEstimator, BedtimeResult, TimeFormat};
pub use inputs::{CoffeeCount, SleepAmount, WakeTime};
pub use model::{ModelSource, SleepCalculatorModel, SleepFeatures, SleepPredictor};
pub use storage::Config;
