pub mod pdftotext;

use crate::error::FolhaError;

/// Text extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub text: String,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, FolhaError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Concatenate pages in order, each followed by a newline.
///
/// Pages with no text contribute nothing.
pub fn document_text(pages: &[PageContent]) -> String {
    let mut text = String::new();
    for page in pages {
        if page.text.is_empty() {
            continue;
        }
        text.push_str(&page.text);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page_number: usize, text: &str) -> PageContent {
        PageContent {
            page_number,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_document_text_keeps_page_order() {
        let pages = vec![page(1, "primeira"), page(2, ""), page(3, "terceira")];
        assert_eq!(document_text(&pages), "primeira\nterceira\n");
    }

    #[test]
    fn test_document_text_no_pages() {
        assert_eq!(document_text(&[]), "");
    }
}
