//! Model artifact adapter: Loads the trained classifier and its feature schema.
//!
//! Two files are resolved from the model directory at startup:
//! - the classifier (`stroke_model.json`), a logistic-regression export
//! - the ordered feature columns (`model_columns.json`)
//!
//! Both are checked once here. After loading, the classifier is immutable and
//! shared read-only for the process lifetime.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{EncodedFeatureVector, FeatureSchema};
use crate::ports::{ClassifierError, StrokeClassifier};
use crate::StrokeError;

/// The only model type this adapter can score.
pub const LOGISTIC_REGRESSION: &str = "logistic_regression";

/// Default classifier file name inside the model directory.
pub const DEFAULT_MODEL_FILE: &str = "stroke_model.json";

/// Default feature schema file name inside the model directory.
pub const DEFAULT_COLUMNS_FILE: &str = "model_columns.json";

/// Per-feature standardization applied before the linear term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Classifier export as written by the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedModel {
    pub model_type: String,
    #[serde(default)]
    pub classes: Vec<i64>,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<Scaler>,
}

/// Logistic-regression classifier with validated parameters.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    model: ExportedModel,
}

impl LogisticModel {
    /// Validate an export and wrap it as a classifier.
    ///
    /// # Errors
    /// Returns `StrokeError::InvalidArtifact` if the export is not a binary
    /// logistic regression with consistent parameter lengths.
    pub fn from_export(model: ExportedModel) -> crate::Result<Self> {
        if model.model_type != LOGISTIC_REGRESSION {
            return Err(StrokeError::InvalidArtifact(format!(
                "loaded object type: {:?} (expected {LOGISTIC_REGRESSION:?} exposing class probabilities)",
                model.model_type
            )));
        }
        if !model.classes.is_empty() && model.classes != [0, 1] {
            return Err(StrokeError::InvalidArtifact(format!(
                "expected binary classes [0, 1], got {:?}",
                model.classes
            )));
        }

        let n = model.feature_names.len();
        if n == 0 {
            return Err(StrokeError::InvalidArtifact(
                "model declares no feature names".into(),
            ));
        }
        if model.coefficients.len() != n {
            return Err(StrokeError::InvalidArtifact(format!(
                "coefficient count {} does not match feature count {n}",
                model.coefficients.len()
            )));
        }
        if let Some(scaler) = &model.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(StrokeError::InvalidArtifact(
                    "scaler lengths do not match feature_names length".into(),
                ));
            }
            if scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
                return Err(StrokeError::InvalidArtifact(
                    "scaler scale values must be finite and non-zero".into(),
                ));
            }
        }
        if !model.intercept.is_finite() || model.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(StrokeError::InvalidArtifact(
                "model parameters must be finite".into(),
            ));
        }

        Ok(Self { model })
    }

    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.model.feature_names
    }

    fn decision_function(&self, features: &EncodedFeatureVector) -> Result<f64, ClassifierError> {
        let mut z = self.model.intercept;
        for (i, name) in self.model.feature_names.iter().enumerate() {
            let mut x = features
                .get(name)
                .ok_or_else(|| ClassifierError::MissingFeature(name.clone()))?;
            if let Some(scaler) = &self.model.scaler {
                x = (x - scaler.mean[i]) / scaler.scale[i];
            }
            z += self.model.coefficients[i] * x;
        }
        if z.is_finite() {
            Ok(z)
        } else {
            Err(ClassifierError::Inference(format!(
                "non-finite decision value {z}"
            )))
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl StrokeClassifier for LogisticModel {
    fn predict_proba(&self, features: &EncodedFeatureVector) -> Result<[f64; 2], ClassifierError> {
        let p = sigmoid(self.decision_function(features)?);
        Ok([1.0 - p, p])
    }

    fn describe(&self) -> String {
        format!(
            "{} ({} features)",
            self.model.model_type,
            self.model.feature_names.len()
        )
    }
}

/// The classifier and schema pair, loaded once at startup.
pub struct LoadedArtifacts {
    pub classifier: Arc<LogisticModel>,
    pub schema: Arc<FeatureSchema>,
}

fn require_file(path: &Path) -> crate::Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(StrokeError::ArtifactMissing(path.to_path_buf()))
    }
}

/// Load the classifier and feature schema.
///
/// Both files must exist before either is parsed, so a missing artifact is
/// always reported as `ArtifactMissing`.
///
/// # Errors
/// Returns `ArtifactMissing` if either file is absent, `InvalidArtifact` if a
/// file does not describe a usable model or schema, or if the model's
/// feature names differ from the schema.
pub fn load_artifacts(model_path: &Path, columns_path: &Path) -> crate::Result<LoadedArtifacts> {
    require_file(model_path)?;
    require_file(columns_path)?;

    let content = fs::read_to_string(model_path)?;
    let export: ExportedModel = serde_json::from_str(&content).map_err(|e| {
        StrokeError::InvalidArtifact(format!("{}: {e}", model_path.display()))
    })?;
    let classifier = LogisticModel::from_export(export)?;

    let content = fs::read_to_string(columns_path)?;
    let schema: FeatureSchema = serde_json::from_str(&content).map_err(|e| {
        StrokeError::InvalidArtifact(format!("{}: {e}", columns_path.display()))
    })?;

    if classifier.feature_names() != schema.columns() {
        return Err(StrokeError::InvalidArtifact(format!(
            "model features {:?} do not match schema columns {:?}",
            classifier.feature_names(),
            schema.columns()
        )));
    }

    tracing::info!(
        "Loaded model from {:?} ({}), schema from {:?} ({} columns)",
        model_path,
        classifier.describe(),
        columns_path,
        schema.len()
    );

    Ok(LoadedArtifacts {
        classifier: Arc::new(classifier),
        schema: Arc::new(schema),
    })
}

/// Resolve the default file names inside a model directory.
#[must_use]
pub fn default_paths(model_dir: &Path) -> (PathBuf, PathBuf) {
    (
        model_dir.join(DEFAULT_MODEL_FILE),
        model_dir.join(DEFAULT_COLUMNS_FILE),
    )
}
