//! Feature encoding for the stroke classifier.
//!
//! The code tables must match the ones used when the model was trained.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::patient::{Category, PatientRecord};

/// Encoding failure: a category label has no entry in its code table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No code for {field} value {label:?}")]
pub struct EncodingError {
    pub field: &'static str,
    pub label: String,
}

type CodeTable = &'static [(&'static str, i64)];

const GENDER_CODES: CodeTable = &[("Male", 1), ("Female", 0), ("Other", 2)];

const AGE_CODES: CodeTable = &[
    ("0-12", 0),
    ("13-19", 1),
    ("20-30", 2),
    ("31-60", 3),
    ("61+", 4),
];

const BINARY_CODES: CodeTable = &[("No", 0), ("Yes", 1)];

const WORK_CODES: CodeTable = &[
    ("Private", 0),
    ("Self-employed", 1),
    ("children", 2),
    ("Govt_job", 3),
    ("Never_worked", 4),
];

const RESIDENCE_CODES: CodeTable = &[("Urban", 1), ("Rural", 0)];

const SMOKING_CODES: CodeTable = &[
    ("formerly smoked", 0),
    ("never smoked", 1),
    ("smokes", 2),
    ("Unknown", 3),
];

/// Feature names produced by [`encode`], in production order.
pub const FEATURE_NAMES: [&str; 10] = [
    "gender",
    "age",
    "hypertension",
    "heart_disease",
    "ever_married",
    "work_type",
    "Residence_type",
    "avg_glucose_level",
    "bmi",
    "smoking_status",
];

fn lookup<C: Category>(table: CodeTable, field: &'static str, value: C) -> Result<f64, EncodingError> {
    let label = value.label();
    table
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, code)| *code as f64)
        .ok_or_else(|| EncodingError {
            field,
            label: label.to_string(),
        })
}

/// What to do when the schema and the produced features disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchemaPolicy {
    /// Fill schema columns the encoder does not produce with 0 and log a warning.
    #[default]
    ZeroFill,
    /// Refuse to encode if any schema column is not produced.
    Strict,
}

/// Ordered list of feature columns the classifier was trained on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Build a schema from column names.
    ///
    /// # Errors
    /// Returns an error message if the list is empty or contains duplicates.
    pub fn new<I, S>(columns: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err("feature schema has no columns".to_string());
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(format!("duplicate column {column:?} in feature schema"));
            }
        }
        Ok(Self { columns })
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = String;

    fn try_from(columns: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(schema: FeatureSchema) -> Self {
        schema.columns
    }
}

/// Feature values keyed and ordered by the schema. Consumed once by the classifier.
#[derive(Clone, PartialEq)]
pub struct EncodedFeatureVector {
    entries: Vec<(String, f64)>,
}

/// Column names only; values are patient data.
impl fmt::Debug for EncodedFeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Redacted;
        impl fmt::Debug for Redacted {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("[REDACTED]")
            }
        }

        f.debug_map()
            .entries(self.entries.iter().map(|(name, _)| (name, Redacted)))
            .finish()
    }
}

impl EncodedFeatureVector {
    /// Value for a column, if the schema has it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| *value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, value)| *value).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Encode a record in [`FEATURE_NAMES`] order, before schema alignment.
///
/// # Errors
/// Returns `EncodingError` if a category label is missing from its table.
pub fn encode_record(record: &PatientRecord) -> Result<[(&'static str, f64); 10], EncodingError> {
    Ok([
        ("gender", lookup(GENDER_CODES, "gender", record.gender)?),
        ("age", lookup(AGE_CODES, "age", record.age_group)?),
        ("hypertension", lookup(BINARY_CODES, "hypertension", record.hypertension)?),
        ("heart_disease", lookup(BINARY_CODES, "heart_disease", record.heart_disease)?),
        ("ever_married", lookup(BINARY_CODES, "ever_married", record.ever_married)?),
        ("work_type", lookup(WORK_CODES, "work_type", record.work_type)?),
        ("Residence_type", lookup(RESIDENCE_CODES, "Residence_type", record.residence_type)?),
        ("avg_glucose_level", record.avg_glucose_level),
        ("bmi", record.bmi),
        ("smoking_status", lookup(SMOKING_CODES, "smoking_status", record.smoking_status)?),
    ])
}

/// Encode a record and align it to the classifier's schema.
///
/// Schema columns the encoder does not produce are set to 0 under
/// [`SchemaPolicy::ZeroFill`]; produced features outside the schema are dropped.
///
/// # Errors
/// Returns `StrokeError::Encoding` for an unknown category label, or
/// `StrokeError::SchemaMismatch` under [`SchemaPolicy::Strict`].
pub fn encode(
    record: &PatientRecord,
    schema: &FeatureSchema,
    policy: SchemaPolicy,
) -> crate::Result<EncodedFeatureVector> {
    let produced = encode_record(record)?;

    let mut zero_filled = Vec::new();
    let entries: Vec<(String, f64)> = schema
        .columns()
        .iter()
        .map(|column| {
            let value = produced
                .iter()
                .find(|(name, _)| *name == column.as_str())
                .map(|(_, value)| *value);
            match value {
                Some(v) => (column.clone(), v),
                None => {
                    zero_filled.push(column.as_str());
                    (column.clone(), 0.0)
                }
            }
        })
        .collect();

    let dropped: Vec<&str> = produced
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| !schema.columns().iter().any(|c| c == name))
        .collect();

    if !zero_filled.is_empty() || !dropped.is_empty() {
        if policy == SchemaPolicy::Strict {
            return Err(crate::StrokeError::SchemaMismatch(format!(
                "columns not produced by the form: [{}]; features not in schema: [{}]",
                zero_filled.join(", "),
                dropped.join(", ")
            )));
        }
        tracing::warn!(
            zero_filled = ?zero_filled,
            dropped = ?dropped,
            "Feature schema differs from form fields; missing columns set to 0"
        );
    }

    Ok(EncodedFeatureVector { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patient::{
        AgeGroup, Gender, ResidenceType, SmokingStatus, WorkType, YesNo,
    };

    fn scenario_record() -> PatientRecord {
        PatientRecord {
            gender: Gender::Female,
            age_group: AgeGroup::Senior,
            hypertension: YesNo::Yes,
            heart_disease: YesNo::No,
            ever_married: YesNo::Yes,
            work_type: WorkType::Private,
            residence_type: ResidenceType::Urban,
            avg_glucose_level: 250.0,
            bmi: 35.0,
            smoking_status: SmokingStatus::Smokes,
        }
    }

    fn full_schema() -> FeatureSchema {
        FeatureSchema::new(FEATURE_NAMES).expect("valid schema")
    }

    #[test]
    fn test_encode_reference_patient() {
        let vector = encode(&scenario_record(), &full_schema(), SchemaPolicy::ZeroFill)
            .expect("Should encode");

        let expected = [
            ("gender", 0.0),
            ("age", 4.0),
            ("hypertension", 1.0),
            ("heart_disease", 0.0),
            ("ever_married", 1.0),
            ("work_type", 0.0),
            ("Residence_type", 1.0),
            ("avg_glucose_level", 250.0),
            ("bmi", 35.0),
            ("smoking_status", 2.0),
        ];
        let actual: Vec<(&str, f64)> = vector.iter().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_encode_follows_schema_order() {
        let schema = FeatureSchema::new(["bmi", "gender", "age"]).expect("valid schema");
        let vector = encode(&scenario_record(), &schema, SchemaPolicy::ZeroFill)
            .expect("Should encode");
        let names: Vec<&str> = vector.names().collect();
        assert_eq!(names, ["bmi", "gender", "age"]);
        assert_eq!(vector.values(), vec![35.0, 0.0, 4.0]);
    }

    #[test]
    fn test_missing_schema_column_is_zero_filled() {
        let mut columns: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        columns.insert(3, "id".to_string());
        let schema = FeatureSchema::new(columns).expect("valid schema");

        let vector = encode(&scenario_record(), &schema, SchemaPolicy::ZeroFill)
            .expect("Should encode");
        assert_eq!(vector.len(), 11);
        assert_eq!(vector.get("id"), Some(0.0));
        assert_eq!(vector.names().nth(3), Some("id"));
    }

    #[test]
    fn test_strict_policy_rejects_mismatch() {
        let schema = FeatureSchema::new(["age", "bmi", "id"]).expect("valid schema");
        let err = encode(&scenario_record(), &schema, SchemaPolicy::Strict).unwrap_err();
        assert!(matches!(err, crate::StrokeError::SchemaMismatch(_)));

        let ok = encode(&scenario_record(), &full_schema(), SchemaPolicy::Strict);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_key_set_equals_schema_for_all_genders_and_ages() {
        let schema = FeatureSchema::new(["Residence_type", "age", "extra", "gender"])
            .expect("valid schema");
        for gender in Gender::ALL {
            for age_group in AgeGroup::ALL {
                let record = PatientRecord {
                    gender: *gender,
                    age_group: *age_group,
                    ..scenario_record()
                };
                let vector =
                    encode(&record, &schema, SchemaPolicy::ZeroFill).expect("Should encode");
                let names: Vec<&str> = vector.names().collect();
                let columns: Vec<&str> = schema.columns().iter().map(String::as_str).collect();
                assert_eq!(names, columns);
            }
        }
    }

    #[test]
    fn test_code_tables_cover_every_option() {
        fn covers<C: Category>(table: CodeTable) {
            for value in C::ALL {
                assert!(
                    lookup(table, "test", *value).is_ok(),
                    "missing code for {value:?}"
                );
            }
            assert_eq!(table.len(), C::ALL.len());
        }
        covers::<Gender>(GENDER_CODES);
        covers::<AgeGroup>(AGE_CODES);
        covers::<YesNo>(BINARY_CODES);
        covers::<WorkType>(WORK_CODES);
        covers::<ResidenceType>(RESIDENCE_CODES);
        covers::<SmokingStatus>(SMOKING_CODES);
    }

    #[test]
    fn test_lookup_reports_unknown_label() {
        let err = lookup(RESIDENCE_CODES, "Residence_type", Gender::Male).unwrap_err();
        assert_eq!(err.field, "Residence_type");
        assert_eq!(err.label, "Male");
    }

    #[test]
    fn test_schema_rejects_empty_and_duplicates() {
        assert!(FeatureSchema::new(Vec::<String>::new()).is_err());
        assert!(FeatureSchema::new(["age", "bmi", "age"]).is_err());

        let schema: FeatureSchema =
            serde_json::from_str(r#"["gender", "age"]"#).expect("Should parse");
        assert_eq!(schema.len(), 2);
        assert!(serde_json::from_str::<FeatureSchema>("[]").is_err());
    }

    #[test]
    fn test_debug_hides_values() {
        let vector = encode(&scenario_record(), &full_schema(), SchemaPolicy::Strict)
            .expect("Should encode");
        let debug = format!("{vector:?}");
        assert!(debug.contains(r#""avg_glucose_level": [REDACTED]"#));
        assert!(!debug.contains("250"));
        assert!(!debug.contains("35"));
    }
}
