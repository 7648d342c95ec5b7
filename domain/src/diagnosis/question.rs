//! Question value object

use serde::{Deserialize, Serialize};

/// A diagnostic question about one symptom (Value Object)
///
/// The symptom is the question's subject and is what the engine scores
/// against; the prompt is what the patient sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    symptom: String,
    prompt: String,
}

impl Question {
    /// Create a question about a (normalized) symptom with the default prompt
    pub fn about(symptom: impl Into<String>) -> Self {
        let symptom = symptom.into();
        let prompt = format!("Are you experiencing {}?", symptom);
        Self { symptom, prompt }
    }

    pub fn symptom(&self) -> &str {
        &self.symptom
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prompt)
    }
}
