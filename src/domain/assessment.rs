//! Risk assessment result types.
//!
//! Represents the thresholded output of the stroke classifier.

use serde::{Deserialize, Serialize};

/// Positive-class probability at or above which risk is reported as elevated.
pub const ELEVATED_THRESHOLD: f64 = 0.30;

/// Binary risk category shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    /// Probability at or above the threshold, clinical evaluation advised
    Elevated,
    /// Probability below the threshold
    Low,
}

impl RiskLabel {
    /// Classify a positive-class probability. The threshold itself is elevated.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability >= ELEVATED_THRESHOLD {
            Self::Elevated
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Elevated => "Elevated Stroke Risk Detected",
            Self::Low => "Low Stroke Risk Observed",
        }
    }

    #[must_use]
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Elevated => {
                "The entered health parameters indicate a higher likelihood of stroke."
            }
            Self::Low => "The entered health parameters suggest a lower likelihood of stroke.",
        }
    }

    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Elevated => "Recommendation: Clinical evaluation is advised.",
            Self::Low => "Recommendation: Maintain a healthy lifestyle.",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Elevated => (255, 75, 75), // #FF4B4B
            Self::Low => (0, 230, 118),      // #00E676
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Elevated => write!(f, "ELEVATED"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

/// Outcome of one prediction request. Rendered immediately, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Positive-class ("stroke") probability, 0.0 to 1.0
    pub probability: f64,

    pub label: RiskLabel,
}

impl RiskAssessment {
    #[must_use]
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            label: RiskLabel::from_probability(probability),
        }
    }

    /// Probability scaled to a percentage.
    #[must_use]
    pub fn risk_percent(&self) -> f64 {
        self.probability * 100.0
    }

    /// Percentage with two decimals, e.g. `"42.00%"`.
    #[must_use]
    pub fn percent_display(&self) -> String {
        format!("{:.2}%", self.risk_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(RiskLabel::from_probability(0.30), RiskLabel::Elevated);
        assert_eq!(RiskLabel::from_probability(0.2999999), RiskLabel::Low);
        assert_eq!(RiskLabel::from_probability(0.0), RiskLabel::Low);
        assert_eq!(RiskLabel::from_probability(1.0), RiskLabel::Elevated);
    }

    #[test]
    fn test_elevated_assessment_display() {
        let assessment = RiskAssessment::new(0.42);
        assert_eq!(assessment.label, RiskLabel::Elevated);
        assert!((assessment.probability - 0.42).abs() < f64::EPSILON);
        assert_eq!(assessment.percent_display(), "42.00%");
    }

    #[test]
    fn test_low_assessment_display() {
        let assessment = RiskAssessment::new(0.05);
        assert_eq!(assessment.label, RiskLabel::Low);
        assert_eq!(assessment.percent_display(), "5.00%");
    }

    #[test]
    fn test_templates_differ_per_label() {
        assert_ne!(RiskLabel::Elevated.headline(), RiskLabel::Low.headline());
        assert!(RiskLabel::Elevated.recommendation().contains("Clinical evaluation"));
        assert!(RiskLabel::Low.summary().contains("lower likelihood"));
        assert_eq!(RiskLabel::Elevated.to_string(), "ELEVATED");
    }
}
