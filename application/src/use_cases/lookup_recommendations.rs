//! Lookup Recommendations use case.
//!
//! Direct medicine and exercise/diet lookups by condition name or symptom,
//! plus the catalog listing used for autocomplete. A query the knowledge
//! base cannot match is answered by the [`SuggestionProvider`] instead of
//! failing.

use crate::ports::suggestion_provider::{SuggestionKind, SuggestionProvider};
use medassist_domain::{Condition, KnowledgeBase, STANDARD_DISCLAIMER};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during a lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("Query must not be empty")]
    EmptyQuery,
}

/// Medicine lookup outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MedicineLookup {
    Matched {
        disease: String,
        matched_condition: String,
        medicines: Vec<String>,
        doctor_specialization: String,
        description: String,
        disclaimer: String,
    },
    Fallback {
        disease: String,
        ai_suggestions: String,
        disclaimer: String,
    },
}

/// Exercise and diet lookup outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExerciseLookup {
    Matched {
        condition: String,
        matched_condition: String,
        exercises: Vec<String>,
        diet: Vec<String>,
        doctor_specialization: String,
        disclaimer: String,
    },
    Fallback {
        condition: String,
        ai_suggestions: String,
        disclaimer: String,
    },
}

impl MedicineLookup {
    pub fn is_match(&self) -> bool {
        matches!(self, MedicineLookup::Matched { .. })
    }
}

impl ExerciseLookup {
    pub fn is_match(&self) -> bool {
        matches!(self, ExerciseLookup::Matched { .. })
    }
}

/// Use case for recommendation lookups.
#[derive(Clone)]
pub struct LookupRecommendationsUseCase {
    knowledge: Arc<KnowledgeBase>,
    suggestions: Arc<dyn SuggestionProvider>,
}

impl LookupRecommendationsUseCase {
    pub fn new(knowledge: Arc<KnowledgeBase>, suggestions: Arc<dyn SuggestionProvider>) -> Self {
        Self {
            knowledge,
            suggestions,
        }
    }

    /// All conditions in catalog order.
    pub fn conditions(&self) -> &[Condition] {
        self.knowledge.conditions()
    }

    pub async fn medicines(&self, disease: &str) -> Result<MedicineLookup, LookupError> {
        let query = non_blank(disease)?;

        match self.knowledge.find_by_name(query) {
            Ok(condition) => {
                info!("Medicine lookup '{}' matched {}", query, condition.name());
                let bundle = condition.recommendations();
                Ok(MedicineLookup::Matched {
                    disease: query.to_string(),
                    matched_condition: condition.name().to_string(),
                    medicines: bundle.medicines.clone(),
                    doctor_specialization: bundle.doctor_specialization.clone(),
                    description: bundle.description.clone(),
                    disclaimer: STANDARD_DISCLAIMER.to_string(),
                })
            }
            Err(e) => {
                debug!("Medicine lookup fell back to suggestions: {}", e);
                Ok(MedicineLookup::Fallback {
                    disease: query.to_string(),
                    ai_suggestions: self.suggestions.suggest(SuggestionKind::Medicine, query).await,
                    disclaimer: STANDARD_DISCLAIMER.to_string(),
                })
            }
        }
    }

    pub async fn exercises(&self, condition: &str) -> Result<ExerciseLookup, LookupError> {
        let query = non_blank(condition)?;

        match self.knowledge.find_by_name(query) {
            Ok(found) => {
                info!("Exercise lookup '{}' matched {}", query, found.name());
                let bundle = found.recommendations();
                Ok(ExerciseLookup::Matched {
                    condition: query.to_string(),
                    matched_condition: found.name().to_string(),
                    exercises: bundle.exercises.clone(),
                    diet: bundle.diet.clone(),
                    doctor_specialization: bundle.doctor_specialization.clone(),
                    disclaimer: STANDARD_DISCLAIMER.to_string(),
                })
            }
            Err(e) => {
                debug!("Exercise lookup fell back to suggestions: {}", e);
                Ok(ExerciseLookup::Fallback {
                    condition: query.to_string(),
                    ai_suggestions: self.suggestions.suggest(SuggestionKind::Exercise, query).await,
                    disclaimer: STANDARD_DISCLAIMER.to_string(),
                })
            }
        }
    }
}

fn non_blank(query: &str) -> Result<&str, LookupError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(LookupError::EmptyQuery)
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use medassist_domain::{Recommendations, builtin_conditions};

    struct EchoSuggestions;

    #[async_trait]
    impl SuggestionProvider for EchoSuggestions {
        async fn suggest(&self, kind: SuggestionKind, query: &str) -> String {
            format!("{} advice for {}", kind, query)
        }
    }

    fn use_case(conditions: Vec<Condition>) -> LookupRecommendationsUseCase {
        LookupRecommendationsUseCase::new(
            Arc::new(KnowledgeBase::new(conditions).unwrap()),
            Arc::new(EchoSuggestions),
        )
    }

    #[tokio::test]
    async fn test_symptom_query_returns_condition_medicines() {
        let migraine = Condition::new("Migraine", ["headache", "nausea"]).with_recommendations(
            Recommendations {
                medicines: vec!["Sumatriptan".to_string()],
                ..Recommendations::default()
            },
        );
        let use_case = use_case(vec![Condition::new("Cold", ["cough"]), migraine]);

        match use_case.medicines("headache").await.unwrap() {
            MedicineLookup::Matched {
                disease,
                matched_condition,
                medicines,
                ..
            } => {
                assert_eq!(disease, "headache");
                assert_eq!(matched_condition, "Migraine");
                assert_eq!(medicines, vec!["Sumatriptan"]);
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_disease_falls_back_to_suggestions() {
        let use_case = use_case(builtin_conditions());

        let lookup = use_case.medicines("rare tropical fever").await.unwrap();
        assert!(!lookup.is_match());
        assert_eq!(
            lookup,
            MedicineLookup::Fallback {
                disease: "rare tropical fever".to_string(),
                ai_suggestions: "medicine advice for rare tropical fever".to_string(),
                disclaimer: STANDARD_DISCLAIMER.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_exercise_lookup_includes_diet() {
        let use_case = use_case(builtin_conditions());

        match use_case.exercises("diabetes").await.unwrap() {
            ExerciseLookup::Matched {
                matched_condition,
                exercises,
                diet,
                ..
            } => {
                assert_eq!(matched_condition, "Type 2 Diabetes");
                assert!(!exercises.is_empty());
                assert!(!diet.is_empty());
            }
            other => panic!("expected a match, got {:?}", other),
        }

        assert!(!use_case.exercises("chronic fatigue syndrome").await.unwrap().is_match());
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected() {
        let use_case = use_case(builtin_conditions());
        assert_eq!(use_case.medicines("  ").await, Err(LookupError::EmptyQuery));
        assert_eq!(use_case.exercises("").await, Err(LookupError::EmptyQuery));
    }

    #[test]
    fn test_fallback_serializes_without_tag() {
        let lookup = MedicineLookup::Fallback {
            disease: "x".to_string(),
            ai_suggestions: "rest".to_string(),
            disclaimer: "d".to_string(),
        };
        let json = serde_json::to_value(&lookup).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"disease": "x", "ai_suggestions": "rest", "disclaimer": "d"})
        );
    }

    #[test]
    fn test_conditions_lists_catalog_in_order() {
        let use_case = use_case(builtin_conditions());
        assert_eq!(use_case.conditions().len(), 12);
        assert_eq!(use_case.conditions()[0].name(), "Common Cold");
    }
}
