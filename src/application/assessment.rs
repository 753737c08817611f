//! Assessment service: Orchestrates the stroke risk pipeline.
//!
//! This service coordinates:
//! - Form validation (collect)
//! - Feature encoding against the model's schema
//! - A single classifier call
//! - Threshold classification

use std::sync::Arc;

use crate::domain::{
    encode, EncodedFeatureVector, FeatureSchema, PatientForm, PatientRecord, RiskAssessment,
    SchemaPolicy,
};
use crate::ports::{positive_class_probability, StrokeClassifier};

/// Service for running stroke risk assessments.
///
/// Holds the classifier and schema loaded at startup. Both are read-only;
/// every request is independent and nothing is retained between them.
pub struct AssessmentService<C>
where
    C: StrokeClassifier,
{
    classifier: Arc<C>,
    schema: Arc<FeatureSchema>,
    policy: SchemaPolicy,
}

impl<C> Clone for AssessmentService<C>
where
    C: StrokeClassifier,
{
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
            schema: Arc::clone(&self.schema),
            policy: self.policy,
        }
    }
}

impl<C> AssessmentService<C>
where
    C: StrokeClassifier,
{
    /// Create a new assessment service.
    pub fn new(classifier: Arc<C>, schema: Arc<FeatureSchema>, policy: SchemaPolicy) -> Self {
        Self {
            classifier,
            schema,
            policy,
        }
    }

    #[must_use]
    pub fn model_description(&self) -> String {
        self.classifier.describe()
    }

    /// Encode a valid record against the loaded schema.
    ///
    /// # Errors
    /// Returns `Encoding` or `SchemaMismatch` errors from the encoder.
    pub fn encode(&self, record: &PatientRecord) -> crate::Result<EncodedFeatureVector> {
        encode(record, &self.schema, self.policy)
    }

    /// Score an encoded vector and apply the risk threshold.
    ///
    /// # Errors
    /// Returns `Classifier` if the model fails or returns an invalid probability.
    pub fn assess(&self, vector: &EncodedFeatureVector) -> crate::Result<RiskAssessment> {
        let proba = self.classifier.predict_proba(vector)?;
        let probability = positive_class_probability(proba)?;
        Ok(RiskAssessment::new(probability))
    }

    /// Run the full pipeline on the current form.
    ///
    /// The classifier is not called unless every categorical field is selected.
    ///
    /// # Errors
    /// Returns `Incomplete` for unselected fields, or any encoding/classifier error.
    pub fn run(&self, form: &PatientForm) -> crate::Result<RiskAssessment> {
        tracing::debug!("Step 1: Validating form...");
        let record = form.collect().map_err(|incomplete| {
            tracing::warn!(missing = ?incomplete.missing, "Submission blocked, fields unselected");
            incomplete
        })?;

        tracing::debug!("Step 2: Encoding {} schema columns...", self.schema.len());
        let vector = self.encode(&record)?;

        tracing::debug!("Step 3: Scoring with {}...", self.classifier.describe());
        let assessment = self.assess(&vector)?;

        tracing::info!("Assessment complete: risk={}", assessment.label);
        Ok(assessment)
    }
}
