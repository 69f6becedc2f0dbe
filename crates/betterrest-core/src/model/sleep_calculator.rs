//! The SleepCalculator model artifact.
//!
//! A versioned JSON document holding a fitted regression:
//!
//! ```text
//! actualSleep = intercept
//!             + coeff_wake * wake
//!             + coeff_estimated_sleep * estimatedSleep
//!             + coeff_coffee * coffee
//! ```
//!
//! The library ships a default artifact (see [`BUNDLED_MODEL_JSON`]); any
//! other file with the same schema can be loaded instead.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{SleepFeatures, SleepPredictor};
use crate::error::{ModelError, PredictionError};

/// Default model compiled into the library.
pub const BUNDLED_MODEL_JSON: &str = include_str!("../../models/SleepCalculator.json");

/// Input names every artifact must declare, in order.
pub const INPUT_NAMES: [&str; 3] = ["wake", "estimatedSleep", "coffee"];

/// Output name every artifact must declare.
pub const OUTPUT_NAME: &str = "actualSleep";

/// Per-input regression weights.
///
/// Named fields ensure schema mismatches fail at deserialization time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Coefficients {
    pub wake: f64,
    pub estimated_sleep: f64,
    pub coffee: f64,
}

/// Loaded SleepCalculator model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepCalculatorModel {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    pub inputs: Vec<String>,
    pub output: String,
    pub intercept: f64,
    pub coefficients: Coefficients,
}

impl SleepCalculatorModel {
    /// Build a model from explicit parameters.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        intercept: f64,
        coefficients: Coefficients,
    ) -> Result<Self, ModelError> {
        let model = Self {
            name: name.into(),
            version: version.into(),
            description: String::new(),
            inputs: INPUT_NAMES.iter().map(|s| s.to_string()).collect(),
            output: OUTPUT_NAME.to_string(),
            intercept,
            coefficients,
        };
        model.validate()?;
        Ok(model)
    }

    /// The artifact shipped with the library.
    pub fn bundled() -> Result<Self, ModelError> {
        Self::from_json_str(BUNDLED_MODEL_JSON)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_reader(reader)?;
        model.validate()?;
        Ok(model)
    }

    /// Load an artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let file = File::open(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(
            path = %path.display(),
            name = %model.name,
            version = %model.version,
            "loaded sleep model"
        );
        Ok(model)
    }

    /// Check that the artifact has exactly the expected interface and that
    /// every parameter is usable.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::InvalidSchema("model name is empty".into()));
        }
        if self.inputs.len() != INPUT_NAMES.len()
            || self.inputs.iter().zip(INPUT_NAMES).any(|(a, b)| a != b)
        {
            return Err(ModelError::InvalidSchema(format!(
                "expected inputs {:?}, found {:?}",
                INPUT_NAMES, self.inputs
            )));
        }
        if self.output != OUTPUT_NAME {
            return Err(ModelError::InvalidSchema(format!(
                "expected output '{OUTPUT_NAME}', found '{}'",
                self.output
            )));
        }

        let params = [
            ("intercept", self.intercept),
            ("coefficients.wake", self.coefficients.wake),
            ("coefficients.estimatedSleep", self.coefficients.estimated_sleep),
            ("coefficients.coffee", self.coefficients.coffee),
        ];
        for (name, value) in params {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteParameter { name: name.into() });
            }
        }
        Ok(())
    }
}

impl SleepPredictor for SleepCalculatorModel {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictionError> {
        features.ensure_finite()?;

        let c = &self.coefficients;
        let seconds = self.intercept
            + c.wake * features.wake
            + c.estimated_sleep * features.estimated_sleep
            + c.coffee * features.coffee;

        if !seconds.is_finite() {
            return Err(PredictionError::NonFiniteOutput);
        }
        Ok(seconds)
    }
}

/// Where to load the model from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModelSource {
    /// The artifact compiled into the library
    #[default]
    Bundled,
    /// A JSON artifact on disk
    File(PathBuf),
}

impl ModelSource {
    /// `File` when a path is given, otherwise `Bundled`.
    pub fn from_optional_path(path: Option<PathBuf>) -> Self {
        path.map_or(ModelSource::Bundled, ModelSource::File)
    }

    pub fn load(&self) -> Result<SleepCalculatorModel, ModelError> {
        match self {
            ModelSource::Bundled => SleepCalculatorModel::bundled(),
            ModelSource::File(path) => SleepCalculatorModel::load(path),
        }
    }
}
