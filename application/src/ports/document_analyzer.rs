//! Port for medical document analysis.

use async_trait::async_trait;
use thiserror::Error;

/// Errors an analyzer can report for a document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Unsupported document '{filename}': {reason}")]
    Unsupported { filename: String, reason: String },

    #[error("Document contains no readable text")]
    NoText,
}

/// What an analyzer found in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAnalysis {
    pub extracted_text: String,
    /// Human-readable summary of the findings
    pub summary: String,
    /// Best matching known condition, if any
    pub matched_condition: Option<String>,
    /// Symptoms and condition names found in the text, in catalog order
    pub matched_terms: Vec<String>,
}

/// Extracts text from an uploaded document and relates it to known conditions.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    async fn analyze(&self, filename: &str, bytes: &[u8]) -> Result<DocumentAnalysis, DocumentError>;
}
