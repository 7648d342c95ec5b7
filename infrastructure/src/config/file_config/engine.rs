//! Diagnosis engine configuration from TOML (`[engine]` section)

use medassist_domain::{AnswerWeights, ConfigIssue, ConfigIssueCode, ScoringPolicy};
use serde::{Deserialize, Serialize};

/// Raw engine configuration from TOML
///
/// ```toml
/// [engine]
/// confidence_threshold = 0.75
/// max_questions = 10
///
/// [engine.weights]
/// yes = 1.0
/// no = -1.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    pub confidence_threshold: f64,
    pub min_confidence: f64,
    pub max_questions: usize,
    pub min_questions: usize,
    pub ranking_size: usize,
    pub weights: FileAnswerWeights,
}

/// Raw `[engine.weights]` table; missing answers keep their default weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnswerWeights {
    pub yes: f64,
    pub maybe: f64,
    pub unsure: f64,
    pub no: f64,
}

impl Default for FileAnswerWeights {
    fn default() -> Self {
        let w = AnswerWeights::default();
        Self {
            yes: w.yes,
            maybe: w.maybe,
            unsure: w.unsure,
            no: w.no,
        }
    }
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        let policy = ScoringPolicy::default();
        Self {
            confidence_threshold: policy.confidence_threshold,
            min_confidence: policy.min_confidence,
            max_questions: policy.max_questions,
            min_questions: policy.min_questions,
            ranking_size: policy.ranking_size,
            weights: FileAnswerWeights::default(),
        }
    }
}

impl FileEngineConfig {
    pub fn to_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            confidence_threshold: self.confidence_threshold,
            min_confidence: self.min_confidence,
            max_questions: self.max_questions,
            min_questions: self.min_questions,
            ranking_size: self.ranking_size,
            weights: AnswerWeights {
                yes: self.weights.yes,
                maybe: self.weights.maybe,
                unsure: self.weights.unsure,
                no: self.weights.no,
            },
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if let Err(e) = self.to_policy().validate() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidScoringPolicy,
                format!("[engine]: {}", e),
            ));
        }
        if self.confidence_threshold < self.min_confidence {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ThresholdBelowFloor,
                format!(
                    "engine.confidence_threshold ({}) is below engine.min_confidence ({}): \
                     confident results will carry the low-confidence disclaimer",
                    self.confidence_threshold, self.min_confidence
                ),
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_domain_policy() {
        assert_eq!(FileEngineConfig::default().to_policy(), ScoringPolicy::default());
        assert!(FileEngineConfig::default().validate().is_empty());
    }

    #[test]
    fn test_partial_weights_keep_defaults() {
        let config: FileEngineConfig = toml::from_str(
            r#"
max_questions = 6
[weights]
no = -1.5
"#,
        )
        .unwrap();
        let policy = config.to_policy();
        assert_eq!(policy.max_questions, 6);
        assert_eq!(policy.weights.no, -1.5);
        assert_eq!(policy.weights.yes, 1.0);
    }

    #[test]
    fn test_invalid_policy_is_error() {
        let config = FileEngineConfig {
            max_questions: 1,
            min_questions: 3,
            ..FileEngineConfig::default()
        };
        let issues = config.validate();
        assert_eq!(issues[0].code, ConfigIssueCode::InvalidScoringPolicy);
        assert!(ConfigIssue::has_errors(&issues));
    }

    #[test]
    fn test_threshold_below_floor_warns() {
        let config = FileEngineConfig {
            confidence_threshold: 0.3,
            ..FileEngineConfig::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::ThresholdBelowFloor);
        assert!(!ConfigIssue::has_errors(&issues));
    }
}
