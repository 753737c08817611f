//! Classifier port: Trait for the pre-trained stroke model.
//!
//! The model is an opaque capability. The application only needs one
//! operation from it: class probabilities for an encoded feature vector.

use crate::domain::EncodedFeatureVector;

/// Errors raised by a classifier implementation at prediction time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("Feature {0:?} is required by the model but missing from the input")]
    MissingFeature(String),

    #[error("Model returned an invalid probability: {0}")]
    InvalidProbability(f64),

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Trait for binary classifiers producing class probabilities.
///
/// Implementations are loaded once at startup and shared read-only, so they
/// must not mutate themselves during prediction.
pub trait StrokeClassifier: Send + Sync {
    /// Predict class probabilities for a single encoded record.
    ///
    /// # Returns
    /// `[p_negative, p_positive]`, where index 1 is the "stroke" class.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the vector cannot be scored.
    fn predict_proba(&self, features: &EncodedFeatureVector) -> Result<[f64; 2], ClassifierError>;

    /// Short description of the model, for logs and the status line.
    fn describe(&self) -> String;
}

/// Read the positive-class probability out of a prediction.
///
/// # Errors
/// Returns `ClassifierError::InvalidProbability` if either entry is not a finite value in [0, 1].
pub fn positive_class_probability(proba: [f64; 2]) -> Result<f64, ClassifierError> {
    for p in proba {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(ClassifierError::InvalidProbability(p));
        }
    }
    Ok(proba[1])
}
