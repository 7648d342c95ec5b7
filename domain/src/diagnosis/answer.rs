//! Answer value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A patient's answer to a yes/no diagnostic question
///
/// # Example
///
/// ```
/// use medassist_domain::Answer;
///
/// let answer: Answer = " Yes ".parse().unwrap();
/// assert_eq!(answer, Answer::Yes);
/// assert!("perhaps".parse::<Answer>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    /// The symptom is present
    Yes,
    /// The symptom is absent
    No,
    /// The symptom may be present
    Maybe,
    /// The patient cannot tell
    Unsure,
}

impl Answer {
    pub const ALL: [Answer; 4] = [Answer::Yes, Answer::No, Answer::Maybe, Answer::Unsure];

    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
            Answer::Maybe => "maybe",
            Answer::Unsure => "unsure",
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Answer {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(Answer::Yes),
            "no" => Ok(Answer::No),
            "maybe" => Ok(Answer::Maybe),
            "unsure" => Ok(Answer::Unsure),
            _ => Err(DomainError::InvalidAnswer(s.to_string())),
        }
    }
}
