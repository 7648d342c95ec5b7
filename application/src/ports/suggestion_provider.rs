//! Port for fallback suggestions when a lookup matches no known condition.

use async_trait::async_trait;

/// What kind of advice is being asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    Medicine,
    Exercise,
}

impl std::fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionKind::Medicine => write!(f, "medicine"),
            SuggestionKind::Exercise => write!(f, "exercise"),
        }
    }
}

/// Produces free-text advice for a query the knowledge base does not cover.
///
/// Implementations may call out to a generative model; they must still
/// return something (a generic suggestion) rather than fail.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, kind: SuggestionKind, query: &str) -> String;
}
