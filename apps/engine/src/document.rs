//! Document→text collaborator contract. PDF and plain text are handled
//! locally; other formats (docx among them) belong to the workflow backend
//! and are reported as unsupported here, which the fallback chain absorbs.

use tracing::debug;

use crate::errors::EngineError;

pub trait DocumentTextExtractor: Send + Sync {
    /// Extracts UTF-8 text from a binary document.
    fn extract_text(&self, content: &[u8], filename: &str) -> Result<String, EngineError>;
}

/// Extension-dispatched extractor: pdf-extract for PDFs, UTF-8 passthrough
/// for plain text.
#[derive(Debug, Default)]
pub struct StandardDocumentExtractor;

impl DocumentTextExtractor for StandardDocumentExtractor {
    fn extract_text(&self, content: &[u8], filename: &str) -> Result<String, EngineError> {
        let name = filename.to_lowercase();
        if name.ends_with(".pdf") {
            let text = pdf_extract::extract_text_from_mem(content)
                .map_err(|e| EngineError::Unsupported(format!("pdf extraction failed: {e}")))?;
            debug!(filename, bytes = content.len(), "extracted text from pdf");
            Ok(text)
        } else if name.ends_with(".txt") || name.ends_with(".text") || name.ends_with(".md") {
            String::from_utf8(content.to_vec())
                .map_err(|e| EngineError::Unsupported(format!("not valid utf-8: {e}")))
        } else {
            Err(EngineError::Unsupported(format!(
                "no local extractor for '{filename}'"
            )))
        }
    }
}
