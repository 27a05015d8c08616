//! Document Ingestor — turns an uploaded resume (PDF or DOCX) into plain text.
//!
//! Format is resolved from the uploaded file name, falling back to the declared
//! content type. Extraction is synchronous and is never retried: the user re-uploads.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod docx;
mod pdf;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported file type: {0}. Please upload .pdf or .docx.")]
    UnsupportedFormat(String),

    #[error("Error reading file: {0}")]
    ExtractionFailure(String),
}

/// Source format of an uploaded resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => f.write_str("pdf"),
            DocumentFormat::Docx => f.write_str("docx"),
        }
    }
}

impl DocumentFormat {
    /// Resolves the format of an upload.
    ///
    /// The file extension wins when present; the content type is only consulted
    /// for extension-less names.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Result<Self, IngestError> {
        let extension = file_name
            .and_then(|name| std::path::Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(|ext| ext.to_ascii_lowercase());

        if let Some(ext) = extension {
            return match ext.as_str() {
                "pdf" => Ok(DocumentFormat::Pdf),
                "docx" => Ok(DocumentFormat::Docx),
                other => Err(IngestError::UnsupportedFormat(format!(".{other}"))),
            };
        }

        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
            .unwrap_or_default();
        match mime.as_str() {
            PDF_MIME => Ok(DocumentFormat::Pdf),
            DOCX_MIME => Ok(DocumentFormat::Docx),
            "" => Err(IngestError::UnsupportedFormat("unknown".to_string())),
            other => Err(IngestError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Plain text extracted from a resume. Never empty once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeText {
    content: String,
    format: DocumentFormat,
}

impl ResumeText {
    /// Trims `content` and rejects it when nothing is left.
    pub fn new(content: &str, format: DocumentFormat) -> Result<Self, IngestError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(IngestError::ExtractionFailure(
                "Extracted text is empty. The file might be image-based or corrupt.".to_string(),
            ));
        }
        Ok(Self {
            content: content.to_string(),
            format,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Extracts resume text from raw file bytes in the given format.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<ResumeText, IngestError> {
    if bytes.is_empty() {
        return Err(IngestError::ExtractionFailure("uploaded file is empty".to_string()));
    }

    let raw = match format {
        DocumentFormat::Pdf => pdf::extract(bytes)?,
        DocumentFormat::Docx => docx::extract(bytes)?,
    };

    ResumeText::new(&raw, format)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    /// Builds a minimal DOCX container whose body holds one paragraph per line.
    pub(crate) fn docx_fixture(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!(r#"<w:p><w:r><w:t xml:space="preserve">{p}</w:t></w:r></w:p>"#))
            .collect();
        docx_with_body(&body)
    }

    /// Builds a one-page PDF showing `line` in Helvetica.
    pub(crate) fn pdf_fixture(line: &str) -> Vec<u8> {
        let content = format!("BT /F1 12 Tf 72 720 Td ({line}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
                .to_string(),
            format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len()),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }

        let xref_at = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        ));
        pdf.extend_from_slice(xref.as_bytes());
        pdf
    }

    pub(crate) fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::FileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer
            .write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
            .unwrap();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_detect_by_extension_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::detect(Some("CV.PDF"), None).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::detect(Some("resume.Docx"), Some("application/pdf")).unwrap(),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn test_detect_rejects_other_extensions() {
        let err = DocumentFormat::detect(Some("resume.txt"), Some(PDF_MIME)).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat(ref ext) if ext == ".txt"));
    }

    #[test]
    fn test_detect_falls_back_to_content_type() {
        assert_eq!(
            DocumentFormat::detect(Some("resume"), Some("application/pdf; charset=binary")).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::detect(None, Some(DOCX_MIME)).unwrap(),
            DocumentFormat::Docx
        );
        assert!(matches!(
            DocumentFormat::detect(None, None),
            Err(IngestError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            DocumentFormat::detect(None, Some("image/png")),
            Err(IngestError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_detect_trailing_dot_uses_content_type() {
        assert_eq!(
            DocumentFormat::detect(Some("resume."), Some(PDF_MIME)).unwrap(),
            DocumentFormat::Pdf
        );
        assert!(matches!(
            DocumentFormat::detect(Some("resume."), None),
            Err(IngestError::UnsupportedFormat(ref what)) if what == "unknown"
        ));
    }

    #[test]
    fn test_resume_text_is_trimmed() {
        let text = ResumeText::new("\n  Skills: Python, SQL  \n", DocumentFormat::Pdf).unwrap();
        assert_eq!(text.content(), "Skills: Python, SQL");
        assert_eq!(text.format(), DocumentFormat::Pdf);
        assert_eq!(text.char_count(), 19);
    }

    #[test]
    fn test_resume_text_rejects_whitespace_only() {
        let err = ResumeText::new(" \n\t ", DocumentFormat::Docx).unwrap_err();
        assert!(matches!(err, IngestError::ExtractionFailure(_)));
    }

    #[test]
    fn test_extract_docx_yields_paragraph_text() {
        let bytes = docx_fixture(&["Jane Doe", "Skills: Python, SQL"]);
        let text = extract_text(&bytes, DocumentFormat::Docx).unwrap();
        assert_eq!(text.content(), "Jane Doe\nSkills: Python, SQL");
        assert_eq!(text.format(), DocumentFormat::Docx);
    }

    #[test]
    fn test_extract_empty_upload_fails() {
        for format in [DocumentFormat::Pdf, DocumentFormat::Docx] {
            let err = extract_text(&[], format).unwrap_err();
            assert!(matches!(err, IngestError::ExtractionFailure(_)));
        }
    }

    #[test]
    fn test_extract_docx_without_text_fails() {
        let bytes = docx_with_body("<w:p/><w:p><w:r></w:r></w:p>");
        let err = extract_text(&bytes, DocumentFormat::Docx).unwrap_err();
        assert!(matches!(err, IngestError::ExtractionFailure(_)));
    }

    #[test]
    fn test_extract_pdf_yields_page_text() {
        let bytes = pdf_fixture("Skills: Python, SQL");
        let text = extract_text(&bytes, DocumentFormat::Pdf).unwrap();
        assert_eq!(text.content(), "Skills: Python, SQL");
        assert_eq!(text.format(), DocumentFormat::Pdf);
    }

    #[test]
    fn test_extract_garbage_pdf_fails() {
        let err = extract_text(b"definitely not a pdf", DocumentFormat::Pdf).unwrap_err();
        assert!(matches!(err, IngestError::ExtractionFailure(_)));
    }
}
