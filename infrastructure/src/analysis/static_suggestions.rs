//! Fixed fallback advice for lookups that match no known condition.

use async_trait::async_trait;
use medassist_application::{SuggestionKind, SuggestionProvider};

/// [`SuggestionProvider`] returning generic, safe advice.
#[derive(Debug, Default, Clone)]
pub struct StaticSuggestionProvider;

#[async_trait]
impl SuggestionProvider for StaticSuggestionProvider {
    async fn suggest(&self, kind: SuggestionKind, query: &str) -> String {
        let advice = match kind {
            SuggestionKind::Medicine => "Consult a doctor for proper medication.",
            SuggestionKind::Exercise => {
                "Light exercise as tolerated, such as walking or gentle stretching. \
                 Keep a balanced diet and stay hydrated."
            }
        };
        format!(
            "No specific guidance is available for \"{}\". {} \
             A General Practitioner can evaluate your condition.",
            query, advice
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mentions_query_and_kind_specific_advice() {
        let provider = StaticSuggestionProvider;
        let medicine = provider.suggest(SuggestionKind::Medicine, "rare fever").await;
        assert!(medicine.contains("\"rare fever\""));
        assert!(medicine.contains("proper medication"));

        let exercise = provider.suggest(SuggestionKind::Exercise, "x").await;
        assert!(exercise.contains("Light exercise"));
        assert!(exercise.contains("General Practitioner"));
    }
}
