//! Adapters layer: Concrete implementations of ports.
//!
//! - `artifact`: JSON model and feature-schema loading, logistic classifier
//! - `sanitize`: redaction of patient values in logs

pub mod artifact;
pub mod sanitize;

pub use artifact::{load_artifacts, LoadedArtifacts, LogisticModel};
