//! Core error types for betterrest-core.
//!
//! This module defines the error hierarchy using thiserror. Model loading,
//! prediction, input validation and configuration each get their own enum;
//! [`EstimationError`] is the boundary type the estimator hands back and
//! always renders as the same user-facing fallback message.

use std::path::PathBuf;
use thiserror::Error;

/// Message shown whenever a bedtime cannot be calculated.
pub const FALLBACK_MESSAGE: &str = "Sorry, there was a problem calculating your ideal bedtime.";

/// Core error type for betterrest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Model artifact errors
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Prediction errors
    #[error("Prediction error: {0}")]
    Prediction(#[from] PredictionError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading a model artifact.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Artifact could not be read
    #[error("Failed to read model at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact is not valid JSON or does not match the schema
    #[error("Failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),

    /// Artifact parsed but describes an incompatible model
    #[error("Invalid model schema: {0}")]
    InvalidSchema(String),

    /// A stored parameter is NaN or infinite
    #[error("Model parameter '{name}' is not finite")]
    NonFiniteParameter { name: String },
}

/// Errors raised while running inference.
#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("Feature '{name}' is not finite")]
    NonFiniteFeature { name: &'static str },

    #[error("Model produced a non-finite prediction")]
    NonFiniteOutput,

    /// Failure reported by a foreign predictor
    #[error("Prediction failed: {0}")]
    Failed(String),
}

/// Validation errors for user-supplied values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Unparseable time of day
    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Which stage of estimation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimationErrorKind {
    ModelLoad,
    InvalidInput,
    Inference,
}

/// Failure to produce a bedtime.
///
/// Every variant displays as [`FALLBACK_MESSAGE`]. The underlying cause is
/// kept as the error's `source()` for logging and diagnostics only.
#[derive(Error, Debug)]
pub enum EstimationError {
    #[error("{}", FALLBACK_MESSAGE)]
    ModelLoad(#[source] ModelError),

    #[error("{}", FALLBACK_MESSAGE)]
    InvalidInput(#[source] ValidationError),

    #[error("{}", FALLBACK_MESSAGE)]
    Inference(#[source] PredictionError),
}

impl EstimationError {
    pub fn kind(&self) -> EstimationErrorKind {
        match self {
            EstimationError::ModelLoad(_) => EstimationErrorKind::ModelLoad,
            EstimationError::InvalidInput(_) => EstimationErrorKind::InvalidInput,
            EstimationError::Inference(_) => EstimationErrorKind::Inference,
        }
    }
}

impl From<ModelError> for EstimationError {
    fn from(err: ModelError) -> Self {
        EstimationError::ModelLoad(err)
    }
}

impl From<ValidationError> for EstimationError {
    fn from(err: ValidationError) -> Self {
        EstimationError::InvalidInput(err)
    }
}

impl From<PredictionError> for EstimationError {
    fn from(err: PredictionError) -> Self {
        EstimationError::Inference(err)
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
