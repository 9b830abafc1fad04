pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod profile;

use std::path::Path;

use error::FolhaError;
use export::Exporter;
use extraction::PdfExtractor;
use model::FieldSelection;
use parsing::ParsedRecords;

/// Parse an already-extracted report text into records.
///
/// Never fails: a document without usable blocks yields an empty result.
pub fn parse_text(text: &str) -> ParsedRecords {
    parsing::parse_document(text)
}

/// Main API entry point: extract a PDF's text and parse it into records.
pub fn parse_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
) -> Result<ParsedRecords, FolhaError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    tracing::debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted pages"
    );
    let text = extraction::document_text(&pages);
    Ok(parse_text(&text))
}

/// Read a report (PDF, or plain text for any other extension) and parse it.
///
/// Read failures are reported as [`FolhaError::SourceUnreadable`].
pub fn parse_file(path: &Path, extractor: &dyn PdfExtractor) -> Result<ParsedRecords, FolhaError> {
    let bytes = std::fs::read(path).map_err(|e| FolhaError::SourceUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        parse_pdf(&bytes, extractor)
    } else {
        Ok(parse_text(&String::from_utf8_lossy(&bytes)))
    }
}

/// Parse a document and write the selected columns with `exporter`.
///
/// Returns the parse result so callers can report skipped blocks. A document
/// without records yields [`FolhaError::NoData`] and writes nothing.
pub fn export_text(
    text: &str,
    destination: &Path,
    exporter: &dyn Exporter,
    selection: &FieldSelection,
) -> Result<ParsedRecords, FolhaError> {
    let parsed = parse_text(text);
    export::export_records(destination, exporter, selection, &parsed.records)?;
    Ok(parsed)
}
