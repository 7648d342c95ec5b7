//! Condition knowledge base.
//!
//! - [`entities::Condition`]: a candidate diagnosis with symptoms and recommendations
//! - [`knowledge::KnowledgeBase`]: the read-only catalog the engine scores against
//! - [`catalog::builtin_conditions`]: the default dataset

pub mod catalog;
pub mod entities;
pub mod knowledge;

pub use catalog::builtin_conditions;
pub use entities::{Condition, ConditionId, Recommendations, normalize_symptom};
pub use knowledge::KnowledgeBase;
