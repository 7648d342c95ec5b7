//! Analyze Document use case.
//!
//! Validates an uploaded document, hands it to the [`DocumentAnalyzer`] and
//! attaches the recommendation bundle of the best matching condition.

use crate::ports::document_analyzer::{DocumentAnalyzer, DocumentError};
use medassist_domain::{KnowledgeBase, STANDARD_DISCLAIMER};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Default upload limit (2 MiB)
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 2 * 1024 * 1024;

/// Errors that can occur during document analysis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzeDocumentError {
    #[error("Uploaded document is empty")]
    EmptyDocument,

    #[error("Document is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Analysis section of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentFindings {
    pub analysis: String,
    pub matched_condition: Option<String>,
    pub matched_terms: Vec<String>,
}

/// Recommendation section of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRecommendations {
    pub ai_recommendations: String,
    pub medicines: Vec<String>,
    pub exercises: Vec<String>,
    pub diet: Vec<String>,
    pub doctor_specialization: String,
    pub disclaimer: String,
}

/// Full result of analyzing one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReport {
    pub filename: String,
    pub extracted_text: String,
    pub analysis: DocumentFindings,
    pub recommendations: DocumentRecommendations,
}

/// Use case for uploaded medical documents.
#[derive(Clone)]
pub struct AnalyzeDocumentUseCase {
    knowledge: Arc<KnowledgeBase>,
    analyzer: Arc<dyn DocumentAnalyzer>,
    max_bytes: usize,
}

impl AnalyzeDocumentUseCase {
    pub fn new(knowledge: Arc<KnowledgeBase>, analyzer: Arc<dyn DocumentAnalyzer>) -> Self {
        Self {
            knowledge,
            analyzer,
            max_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub async fn execute(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<DocumentReport, AnalyzeDocumentError> {
        if bytes.is_empty() {
            return Err(AnalyzeDocumentError::EmptyDocument);
        }
        if bytes.len() > self.max_bytes {
            warn!(
                "Rejected document '{}': {} bytes exceeds {}",
                filename,
                bytes.len(),
                self.max_bytes
            );
            return Err(AnalyzeDocumentError::TooLarge {
                size: bytes.len(),
                limit: self.max_bytes,
            });
        }

        let analysis = self.analyzer.analyze(filename, bytes).await?;
        info!(
            "Analyzed document '{}': {} terms, match {:?}",
            filename,
            analysis.matched_terms.len(),
            analysis.matched_condition
        );

        let matched = analysis
            .matched_condition
            .as_deref()
            .and_then(|name| self.knowledge.find_by_name(name).ok());

        let recommendations = match matched {
            Some(condition) => {
                let bundle = condition.recommendations();
                DocumentRecommendations {
                    ai_recommendations: format!(
                        "The document mentions findings associated with {}. \
                         Discuss them with a {}.",
                        condition.name(),
                        bundle.doctor_specialization
                    ),
                    medicines: bundle.medicines.clone(),
                    exercises: bundle.exercises.clone(),
                    diet: bundle.diet.clone(),
                    doctor_specialization: bundle.doctor_specialization.clone(),
                    disclaimer: STANDARD_DISCLAIMER.to_string(),
                }
            }
            None => DocumentRecommendations {
                ai_recommendations: "No known condition was recognized in this document. \
                                     Share it with your doctor for a professional review."
                    .to_string(),
                medicines: Vec::new(),
                exercises: Vec::new(),
                diet: Vec::new(),
                doctor_specialization: "General Practitioner".to_string(),
                disclaimer: STANDARD_DISCLAIMER.to_string(),
            },
        };

        Ok(DocumentReport {
            filename: filename.to_string(),
            extracted_text: analysis.extracted_text,
            analysis: DocumentFindings {
                analysis: analysis.summary,
                matched_condition: matched.map(|c| c.name().to_string()),
                matched_terms: analysis.matched_terms,
            },
            recommendations,
        })
    }
}
