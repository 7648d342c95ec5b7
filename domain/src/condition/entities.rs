//! Condition entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Stable identifier of a condition (Value Object)
///
/// Lowercase slug, e.g. `"common-cold"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionId(String);

impl ConditionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from a display name
    ///
    /// ```
    /// use medassist_domain::ConditionId;
    ///
    /// assert_eq!(ConditionId::from_name("Common Cold").as_str(), "common-cold");
    /// assert_eq!(ConditionId::from_name("  Type 2 Diabetes ").as_str(), "type-2-diabetes");
    /// ```
    pub fn from_name(name: &str) -> Self {
        let mut slug = String::with_capacity(name.len());
        for c in name.trim().chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConditionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalize a symptom for comparison: trimmed, lowercase, single spaces.
pub fn normalize_symptom(symptom: &str) -> String {
    symptom
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Static recommendation bundle attached to a condition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub medicines: Vec<String>,
    pub exercises: Vec<String>,
    pub diet: Vec<String>,
    pub doctor_specialization: String,
    pub description: String,
}

/// A candidate diagnosis in the knowledge base (Entity)
///
/// Symptoms double as question subjects. They are stored normalized and
/// de-duplicated, in their original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    id: ConditionId,
    name: String,
    symptoms: Vec<String>,
    prior: f64,
    recommendations: Recommendations,
}

impl Condition {
    /// Default prior weight for conditions that don't specify one
    pub const DEFAULT_PRIOR: f64 = 0.1;

    /// Create a condition with an id derived from its name
    pub fn new<S: AsRef<str>>(name: impl Into<String>, symptoms: impl IntoIterator<Item = S>) -> Self {
        let name = name.into();
        let mut normalized: Vec<String> = Vec::new();
        for symptom in symptoms {
            let s = normalize_symptom(symptom.as_ref());
            if !s.is_empty() && !normalized.contains(&s) {
                normalized.push(s);
            }
        }
        Self {
            id: ConditionId::from_name(&name),
            name: name.trim().to_string(),
            symptoms: normalized,
            prior: Self::DEFAULT_PRIOR,
            recommendations: Recommendations::default(),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = ConditionId::new(id);
        self
    }

    pub fn with_prior(mut self, prior: f64) -> Self {
        self.prior = prior;
        self
    }

    pub fn with_recommendations(mut self, recommendations: Recommendations) -> Self {
        self.recommendations = recommendations;
        self
    }

    // ==================== Accessors ====================

    pub fn id(&self) -> &ConditionId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn prior(&self) -> f64 {
        self.prior
    }

    pub fn recommendations(&self) -> &Recommendations {
        &self.recommendations
    }

    /// Whether this condition lists the (already normalized) symptom
    pub fn has_symptom(&self, symptom: &str) -> bool {
        self.symptoms.iter().any(|s| s == symptom)
    }

    /// Check the invariants the engine relies on
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidCondition {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.is_empty() {
            return Err(invalid("name is blank"));
        }
        if self.id.as_str().is_empty() {
            return Err(invalid("id is blank"));
        }
        if self.symptoms.is_empty() {
            return Err(invalid("no symptoms listed"));
        }
        if !self.prior.is_finite() || self.prior <= 0.0 {
            return Err(invalid("prior must be a positive finite number"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_normalizes_symptoms() {
        let c = Condition::new("Flu", ["  Fever ", "COUGH", "fever", "", "body   aches"]);
        assert_eq!(c.symptoms(), &["fever", "cough", "body aches"]);
        assert_eq!(c.id().as_str(), "flu");
        assert!(c.has_symptom("cough"));
        assert!(!c.has_symptom("Cough"));
    }

    #[test]
    fn test_slug_strips_punctuation() {
        assert_eq!(ConditionId::from_name("GERD (Acid Reflux)").as_str(), "gerd-acid-reflux");
        assert_eq!(ConditionId::from_name("---").as_str(), "");
    }

    #[test]
    fn test_validate_rejects_bad_prior() {
        let c = Condition::new("Flu", ["fever"]).with_prior(0.0);
        assert!(matches!(c.validate(), Err(DomainError::InvalidCondition { .. })));

        let c = Condition::new("Flu", ["fever"]).with_prior(f64::NAN);
        assert!(c.validate().is_err());

        assert!(Condition::new("Flu", ["fever"]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_symptoms() {
        let empty: [&str; 0] = [];
        let c = Condition::new("Flu", empty);
        assert!(c.validate().is_err());
    }
}
