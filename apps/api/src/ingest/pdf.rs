use std::panic;

use tracing::warn;

use super::IngestError;

/// Extracts the text of every page with `pdf-extract`.
///
/// The library panics on some malformed documents; the panic is contained here
/// and reported like any other extraction failure.
pub(super) fn extract(bytes: &[u8]) -> Result<String, IngestError> {
    let result = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(IngestError::ExtractionFailure(format!(
            "PDF extraction error: {e}"
        ))),
        Err(_) => {
            warn!("pdf-extract panicked while reading an uploaded document");
            Err(IngestError::ExtractionFailure(
                "PDF could not be parsed; the file may be corrupt".to_string(),
            ))
        }
    }
}
