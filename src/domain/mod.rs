//! Domain layer: Core types and logic.
//!
//! Pure Rust types with no I/O. Patient input is validated here, encoded
//! into the classifier's feature schema, and turned into a risk assessment.

mod assessment;
mod features;
mod patient;

pub use assessment::{RiskAssessment, RiskLabel, ELEVATED_THRESHOLD};
pub use features::{
    encode, encode_record, EncodedFeatureVector, EncodingError, FeatureSchema, SchemaPolicy,
    FEATURE_NAMES,
};
pub use patient::{
    AgeGroup, Category, Gender, Incomplete, NumericRange, PatientForm, PatientRecord,
    ResidenceType, SmokingStatus, WorkType, YesNo, AVG_GLUCOSE_RANGE, BMI_RANGE,
};
