//! # strokecheck
//!
//! Stroke-risk screening form backed by a pre-trained binary classifier.
//!
//! This crate provides:
//! - Validation of the categorical/numeric patient form
//! - Deterministic encoding into the classifier's feature schema
//! - A thresholded risk assessment (Elevated / Low)
//! - Terminal UI for local use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (patient form, feature encoding, risk assessment)
//! - `ports`: Trait definitions for external operations (the classifier)
//! - `adapters`: Concrete implementations (JSON model artifacts, log redaction)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{PatientForm, PatientRecord, RiskAssessment, RiskLabel};

/// Result type for strokecheck operations
pub type Result<T> = std::result::Result<T, StrokeError>;

/// Main error type for strokecheck
#[derive(Debug, thiserror::Error)]
pub enum StrokeError {
    #[error("Model artifact not found at {}", .0.display())]
    ArtifactMissing(std::path::PathBuf),

    #[error("Loaded object is not a valid ML model: {0}")]
    InvalidArtifact(String),

    #[error(transparent)]
    Incomplete(#[from] domain::Incomplete),

    #[error("Encoding failed: {0}")]
    Encoding(#[from] domain::EncodingError),

    #[error("Feature schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Classifier failed: {0}")]
    Classifier(#[from] ports::ClassifierError),

    #[error("Invalid patient data: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StrokeError {
    /// Whether the user can fix this by editing the form and resubmitting.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Incomplete(_) | Self::Validation(_))
    }
}
