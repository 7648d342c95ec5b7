//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod analyze_document;
pub mod lookup_recommendations;
pub mod run_diagnosis;
