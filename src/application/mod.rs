//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the stroke risk assessment use case.

mod assessment;

pub use assessment::AssessmentService;
