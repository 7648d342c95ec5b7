//! Keyword-based document analyzer.
//!
//! Reads UTF-8 text documents and scores every known condition by the terms
//! the text mentions: two points for the condition's name, one per symptom.
//! Binary formats (images, PDF) need OCR and are rejected.

use async_trait::async_trait;
use medassist_application::{DocumentAnalysis, DocumentAnalyzer, DocumentError};
use medassist_domain::KnowledgeBase;
use std::sync::Arc;
use tracing::debug;

const NAME_POINTS: usize = 2;

/// Leading bytes of binary formats people commonly upload
const BINARY_SIGNATURES: [(&[u8], &str); 4] = [
    (b"%PDF", "PDF"),
    (b"\x89PNG", "PNG image"),
    (b"\xff\xd8\xff", "JPEG image"),
    (b"GIF8", "GIF image"),
];

pub struct KeywordDocumentAnalyzer {
    knowledge: Arc<KnowledgeBase>,
}

impl KeywordDocumentAnalyzer {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, DocumentError> {
        let unsupported = |reason: String| DocumentError::Unsupported {
            filename: filename.to_string(),
            reason,
        };

        if let Some((_, kind)) = BINARY_SIGNATURES
            .iter()
            .find(|(signature, _)| bytes.starts_with(signature))
        {
            return Err(unsupported(format!(
                "{} documents need OCR; upload a text transcript instead",
                kind
            )));
        }

        let text = std::str::from_utf8(bytes)
            .map_err(|_| unsupported("content is not UTF-8 text".to_string()))?;
        let text = text.trim_start_matches('\u{feff}').trim();
        if text.is_empty() {
            return Err(DocumentError::NoText);
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl DocumentAnalyzer for KeywordDocumentAnalyzer {
    async fn analyze(&self, filename: &str, bytes: &[u8]) -> Result<DocumentAnalysis, DocumentError> {
        let extracted_text = Self::extract_text(filename, bytes)?;
        let haystack = extracted_text.to_lowercase();

        let mut matched_terms: Vec<String> = Vec::new();
        let mut note = |term: &str| {
            if !matched_terms.iter().any(|t| t == term) {
                matched_terms.push(term.to_string());
            }
        };

        // (position, score, symptoms mentioned)
        let mut best: Option<(usize, usize, usize)> = None;
        for (position, condition) in self.knowledge.conditions().iter().enumerate() {
            let mut score = 0;
            if haystack.contains(&condition.name().to_lowercase()) {
                score += NAME_POINTS;
                note(condition.name());
            }
            let mut mentioned = 0;
            for symptom in condition.symptoms() {
                if haystack.contains(symptom.as_str()) {
                    mentioned += 1;
                    note(symptom);
                }
            }
            score += mentioned;

            if score > 0 && best.is_none_or(|(_, top, _)| score > top) {
                best = Some((position, score, mentioned));
            }
        }

        let conditions = self.knowledge.conditions();
        let summary = match best {
            Some((position, _, mentioned)) => {
                let condition = &conditions[position];
                format!(
                    "Found {} relevant term(s): {}. The findings are most consistent with {} \
                     ({} of {} typical symptoms mentioned).",
                    matched_terms.len(),
                    matched_terms.join(", "),
                    condition.name(),
                    mentioned,
                    condition.symptoms().len()
                )
            }
            None => "No known symptoms or conditions were found in the document.".to_string(),
        };
        debug!("Keyword analysis of '{}': {}", filename, summary);

        Ok(DocumentAnalysis {
            extracted_text,
            summary,
            matched_condition: best.map(|(position, _, _)| conditions[position].name().to_string()),
            matched_terms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medassist_domain::builtin_conditions;

    fn analyzer() -> KeywordDocumentAnalyzer {
        KeywordDocumentAnalyzer::new(Arc::new(KnowledgeBase::new(builtin_conditions()).unwrap()))
    }

    #[tokio::test]
    async fn test_matches_condition_by_symptoms() {
        let text = "Patient reports wheezing and shortness of breath at night, \
                    with chest tightness after exercise.";
        let analysis = analyzer().analyze("note.txt", text.as_bytes()).await.unwrap();

        assert_eq!(analysis.matched_condition.as_deref(), Some("Asthma"));
        assert!(analysis.matched_terms.contains(&"wheezing".to_string()));
        assert!(analysis.summary.contains("Asthma"));
        assert_eq!(analysis.extracted_text, text);
    }

    #[tokio::test]
    async fn test_condition_name_outweighs_single_symptom() {
        let text = "History of hypertension. Occasional cough.";
        let analysis = analyzer().analyze("h.txt", text.as_bytes()).await.unwrap();
        assert_eq!(analysis.matched_condition.as_deref(), Some("Hypertension"));
    }

    #[tokio::test]
    async fn test_no_terms_found() {
        let analysis = analyzer()
            .analyze("ok.txt", b"All values within normal range.")
            .await
            .unwrap();
        assert!(analysis.matched_condition.is_none());
        assert!(analysis.matched_terms.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_binary_documents() {
        let err = analyzer()
            .analyze("scan.pdf", b"%PDF-1.7 binary")
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::Unsupported { ref reason, .. } if reason.contains("PDF")));

        let err = analyzer().analyze("x.bin", &[0xc3, 0x28]).await.unwrap_err();
        assert!(matches!(err, DocumentError::Unsupported { .. }));
    }

    #[tokio::test]
    async fn test_blank_text_has_no_content() {
        assert_eq!(
            analyzer().analyze("empty.txt", b"  \n ").await.unwrap_err(),
            DocumentError::NoText
        );
    }
}
