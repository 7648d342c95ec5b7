//! Local implementations of the document analysis and suggestion ports.

mod keyword_analyzer;
mod static_suggestions;

pub use keyword_analyzer::KeywordDocumentAnalyzer;
pub use static_suggestions::StaticSuggestionProvider;
