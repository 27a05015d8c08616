use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::IngestError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads the main document part of a DOCX container and flattens it to text,
/// one line per paragraph.
pub(super) fn extract(bytes: &[u8]) -> Result<String, IngestError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| IngestError::ExtractionFailure(format!("not a valid DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| IngestError::ExtractionFailure(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| IngestError::ExtractionFailure(format!("unreadable {DOCUMENT_PART}: {e}")))?;

    paragraphs_to_text(&xml)
        .map_err(|e| IngestError::ExtractionFailure(format!("malformed {DOCUMENT_PART}: {e}")))
}

/// Walks WordprocessingML: `w:t` runs are concatenated, `w:tab` and `w:br`
/// inside a run become whitespace, and every closed `w:p` ends a line.
fn paragraphs_to_text(xml: &str) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"r" => run_depth += 1,
                b"t" if run_depth > 0 => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" => out.push('\n'),
                b"tab" if run_depth > 0 => out.push('\t'),
                b"br" | b"cr" if run_depth > 0 => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => out.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}
