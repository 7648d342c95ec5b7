//! Read-only condition catalog

use super::entities::{Condition, ConditionId, normalize_symptom};
use crate::core::error::DomainError;
use std::collections::HashMap;

/// Shortest query that may match by substring; shorter queries only match exactly.
const MIN_PARTIAL_MATCH_LEN: usize = 3;

/// In-memory catalog of conditions, in insertion order.
///
/// Built once at startup and shared immutably. Catalog order is significant:
/// it is the final tie-break for both question selection and name lookup.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    conditions: Vec<Condition>,
    index: HashMap<ConditionId, usize>,
    symptoms: Vec<String>,
}

impl KnowledgeBase {
    /// Build a knowledge base, validating every condition.
    ///
    /// An empty catalog is a configuration error: the engine has nothing to
    /// ask about and nothing to diagnose.
    pub fn new(conditions: Vec<Condition>) -> Result<Self, DomainError> {
        if conditions.is_empty() {
            return Err(DomainError::EmptyKnowledgeBase);
        }

        let mut index = HashMap::with_capacity(conditions.len());
        let mut symptoms: Vec<String> = Vec::new();

        for (position, condition) in conditions.iter().enumerate() {
            condition.validate()?;
            if index.insert(condition.id().clone(), position).is_some() {
                return Err(DomainError::DuplicateCondition(condition.id().to_string()));
            }
            for symptom in condition.symptoms() {
                if !symptoms.contains(symptom) {
                    symptoms.push(symptom.clone());
                }
            }
        }

        Ok(Self {
            conditions,
            index,
            symptoms,
        })
    }

    pub fn get(&self, id: &ConditionId) -> Option<&Condition> {
        self.index.get(id).map(|&i| &self.conditions[i])
    }

    /// Catalog position of a condition
    pub fn position(&self, id: &ConditionId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// All conditions in catalog order
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Distinct symptoms in order of first appearance
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Look a condition up by free text (disease name or symptom).
    ///
    /// Matching is case-insensitive and tiered; the first tier with a hit
    /// wins, and within a tier the earliest condition in the catalog wins:
    ///
    /// 1. exact condition name
    /// 2. exact symptom
    /// 3. name substring, either direction ("migraines", "cold")
    /// 4. query contained in a symptom ("throat" in "sore throat")
    pub fn find_by_name(&self, query: &str) -> Result<&Condition, DomainError> {
        let needle = normalize_symptom(query);
        if needle.is_empty() {
            return Err(DomainError::UnknownCondition(query.to_string()));
        }

        let partial = needle.chars().count() >= MIN_PARTIAL_MATCH_LEN;
        let name_overlaps = |name: &str| {
            partial && (name.contains(needle.as_str()) || needle.contains(name))
        };

        let by_exact_name = || {
            self.conditions
                .iter()
                .find(|c| normalize_symptom(c.name()) == needle)
        };
        let by_exact_symptom = || self.conditions.iter().find(|c| c.has_symptom(&needle));
        let by_partial_name = || {
            self.conditions
                .iter()
                .find(|c| name_overlaps(&normalize_symptom(c.name())))
        };
        let by_partial_symptom = || {
            self.conditions
                .iter()
                .find(|c| partial && c.symptoms().iter().any(|s| s.contains(needle.as_str())))
        };

        by_exact_name()
            .or_else(by_exact_symptom)
            .or_else(by_partial_name)
            .or_else(by_partial_symptom)
            .ok_or_else(|| DomainError::UnknownCondition(query.to_string()))
    }
}
