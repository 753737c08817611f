//! Patient form and record types for stroke risk screening.
//!
//! The form holds an `Option` per categorical field; `None` is the
//! "please choose" placeholder. A `PatientRecord` can only be built once
//! every categorical field holds a concrete value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A categorical form field with a fixed set of clinical options.
pub trait Category: Copy + Eq + fmt::Debug + 'static {
    /// All options, in the order the form offers them.
    const ALL: &'static [Self];

    /// Placeholder text shown while nothing is selected.
    const PLACEHOLDER: &'static str;

    /// Human-readable label, also the key into the encoding table.
    fn label(&self) -> &'static str;
}

macro_rules! category {
    (
        $(#[$meta:meta])*
        $name:ident, $placeholder:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl Category for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const PLACEHOLDER: &'static str = $placeholder;

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

category! {
    /// Patient gender.
    Gender, "Select Gender" {
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
}

category! {
    /// Age bracket in years.
    AgeGroup, "Select Age Group" {
        Child => "0-12",
        Teen => "13-19",
        YoungAdult => "20-30",
        Adult => "31-60",
        Senior => "61+",
    }
}

category! {
    /// Binary history answer (hypertension, heart disease, ever married).
    YesNo, "Select Option" {
        No => "No",
        Yes => "Yes",
    }
}

category! {
    WorkType, "Select Work Type" {
        Private => "Private",
        SelfEmployed => "Self-employed",
        GovtJob => "Govt_job",
        Children => "children",
        NeverWorked => "Never_worked",
    }
}

category! {
    ResidenceType, "Select Residence" {
        Urban => "Urban",
        Rural => "Rural",
    }
}

category! {
    SmokingStatus, "Select Smoking Status" {
        NeverSmoked => "never smoked",
        FormerlySmoked => "formerly smoked",
        Smokes => "smokes",
        Unknown => "Unknown",
    }
}

/// Inclusive range and default for a numeric form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl NumericRange {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && (self.min..=self.max).contains(&value)
    }

    /// Check a value against the range.
    ///
    /// # Errors
    /// Returns `StrokeError::Validation` if the value is outside `[min, max]` or not finite.
    pub fn check(&self, value: f64) -> crate::Result<f64> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(crate::StrokeError::Validation(format!(
                "{}: Value must be between {} and {}",
                self.label, self.min, self.max
            )))
        }
    }
}

/// Average glucose level in mg/dL.
pub const AVG_GLUCOSE_RANGE: NumericRange = NumericRange {
    label: "Average Glucose Level",
    min: 50.0,
    max: 300.0,
    default: 120.0,
};

/// Body mass index.
pub const BMI_RANGE: NumericRange = NumericRange {
    label: "BMI",
    min: 10.0,
    max: 60.0,
    default: 25.0,
};

/// A fully populated, valid patient record. Created per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub gender: Gender,
    pub age_group: AgeGroup,
    pub hypertension: YesNo,
    pub heart_disease: YesNo,
    pub ever_married: YesNo,
    pub work_type: WorkType,
    pub residence_type: ResidenceType,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub smoking_status: SmokingStatus,
}

/// Returned by [`PatientForm::collect`] when categorical fields are unselected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Please select all fields before prediction (missing: {})", .missing.join(", "))]
pub struct Incomplete {
    /// Labels of the unselected fields, in form order.
    pub missing: Vec<&'static str>,
}

/// Current state of the input form.
///
/// Numeric fields always hold an in-range value; the setters refuse anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientForm {
    pub gender: Option<Gender>,
    pub age_group: Option<AgeGroup>,
    pub hypertension: Option<YesNo>,
    pub heart_disease: Option<YesNo>,
    pub ever_married: Option<YesNo>,
    pub work_type: Option<WorkType>,
    pub residence_type: Option<ResidenceType>,
    avg_glucose_level: f64,
    bmi: f64,
    pub smoking_status: Option<SmokingStatus>,
}

impl Default for PatientForm {
    fn default() -> Self {
        Self {
            gender: None,
            age_group: None,
            hypertension: None,
            heart_disease: None,
            ever_married: None,
            work_type: None,
            residence_type: None,
            avg_glucose_level: AVG_GLUCOSE_RANGE.default,
            bmi: BMI_RANGE.default,
            smoking_status: None,
        }
    }
}

impl PatientForm {
    #[must_use]
    pub fn avg_glucose_level(&self) -> f64 {
        self.avg_glucose_level
    }

    #[must_use]
    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    /// Set the average glucose level.
    ///
    /// # Errors
    /// Returns `StrokeError::Validation` if out of range; the previous value is kept.
    pub fn set_avg_glucose_level(&mut self, value: f64) -> crate::Result<()> {
        self.avg_glucose_level = AVG_GLUCOSE_RANGE.check(value)?;
        Ok(())
    }

    /// Set the BMI.
    ///
    /// # Errors
    /// Returns `StrokeError::Validation` if out of range; the previous value is kept.
    pub fn set_bmi(&mut self, value: f64) -> crate::Result<()> {
        self.bmi = BMI_RANGE.check(value)?;
        Ok(())
    }

    /// Validate the form and produce a patient record.
    ///
    /// # Errors
    /// Returns `Incomplete` naming every field still at its placeholder.
    pub fn collect(&self) -> Result<PatientRecord, Incomplete> {
        let mut missing = Vec::new();
        let mut require = |selected: bool, label: &'static str| {
            if !selected {
                missing.push(label);
            }
        };
        require(self.gender.is_some(), "Gender");
        require(self.age_group.is_some(), "Age Group");
        require(self.hypertension.is_some(), "Hypertension");
        require(self.heart_disease.is_some(), "Heart Disease");
        require(self.ever_married.is_some(), "Ever Married");
        require(self.work_type.is_some(), "Work Type");
        require(self.residence_type.is_some(), "Residence Type");
        require(self.smoking_status.is_some(), "Smoking Status");

        match (
            self.gender,
            self.age_group,
            self.hypertension,
            self.heart_disease,
            self.ever_married,
            self.work_type,
            self.residence_type,
            self.smoking_status,
        ) {
            (
                Some(gender),
                Some(age_group),
                Some(hypertension),
                Some(heart_disease),
                Some(ever_married),
                Some(work_type),
                Some(residence_type),
                Some(smoking_status),
            ) => Ok(PatientRecord {
                gender,
                age_group,
                hypertension,
                heart_disease,
                ever_married,
                work_type,
                residence_type,
                avg_glucose_level: self.avg_glucose_level,
                bmi: self.bmi,
                smoking_status,
            }),
            _ => Err(Incomplete { missing }),
        }
    }
}

impl From<&PatientRecord> for PatientForm {
    fn from(record: &PatientRecord) -> Self {
        Self {
            gender: Some(record.gender),
            age_group: Some(record.age_group),
            hypertension: Some(record.hypertension),
            heart_disease: Some(record.heart_disease),
            ever_married: Some(record.ever_married),
            work_type: Some(record.work_type),
            residence_type: Some(record.residence_type),
            avg_glucose_level: record.avg_glucose_level,
            bmi: record.bmi,
            smoking_status: Some(record.smoking_status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> PatientForm {
        PatientForm {
            gender: Some(Gender::Female),
            age_group: Some(AgeGroup::Senior),
            hypertension: Some(YesNo::Yes),
            heart_disease: Some(YesNo::No),
            ever_married: Some(YesNo::Yes),
            work_type: Some(WorkType::Private),
            residence_type: Some(ResidenceType::Urban),
            smoking_status: Some(SmokingStatus::Smokes),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_form_is_incomplete() {
        let err = PatientForm::default().collect().unwrap_err();
        assert_eq!(err.missing.len(), 8);
        assert_eq!(err.missing[0], "Gender");
        assert_eq!(err.missing[7], "Smoking Status");
    }

    #[test]
    fn test_single_placeholder_blocks_collect() {
        let mut form = complete_form();
        form.work_type = None;
        let err = form.collect().unwrap_err();
        assert_eq!(err.missing, vec!["Work Type"]);
        assert!(err.to_string().contains("Please select all fields"));
    }

    #[test]
    fn test_collect_complete_form() {
        let record = complete_form().collect().expect("Should collect");
        assert_eq!(record.gender, Gender::Female);
        assert_eq!(record.smoking_status, SmokingStatus::Smokes);
        assert!((record.avg_glucose_level - 120.0).abs() < f64::EPSILON);
        assert!((record.bmi - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_numeric_setters_keep_range() {
        let mut form = PatientForm::default();
        form.set_avg_glucose_level(250.0).expect("in range");
        assert!((form.avg_glucose_level() - 250.0).abs() < f64::EPSILON);

        assert!(form.set_avg_glucose_level(300.5).is_err());
        assert!(form.set_bmi(9.9).is_err());
        assert!(form.set_bmi(f64::NAN).is_err());
        assert!((form.avg_glucose_level() - 250.0).abs() < f64::EPSILON);
        assert!((form.bmi() - 25.0).abs() < f64::EPSILON);

        form.set_bmi(60.0).expect("upper bound is inclusive");
        form.set_avg_glucose_level(50.0).expect("lower bound is inclusive");
    }

    #[test]
    fn test_labels_match_form_options() {
        let labels: Vec<&str> = WorkType::ALL.iter().map(Category::label).collect();
        assert_eq!(
            labels,
            ["Private", "Self-employed", "Govt_job", "children", "Never_worked"]
        );
        assert_eq!(AgeGroup::Senior.to_string(), "61+");
        assert_eq!(SmokingStatus::PLACEHOLDER, "Select Smoking Status");
    }

    #[test]
    fn test_form_roundtrip_from_record() {
        let record = complete_form().collect().expect("Should collect");
        let form = PatientForm::from(&record);
        assert_eq!(form.collect().expect("Should collect"), record);
    }
}
