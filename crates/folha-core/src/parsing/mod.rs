pub mod deductions;
pub mod fields;
pub mod labels;
pub mod segment;

use serde::{Deserialize, Serialize};

use crate::model::PersonRecord;
pub use fields::{extract, try_extract, SkipReason};
pub use segment::segment;

/// Records parsed from a document, plus the blocks that were passed over.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedRecords {
    pub records: Vec<PersonRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_blocks: Vec<SkippedBlock>,
}

impl ParsedRecords {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A non-boilerplate block that did not yield a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedBlock {
    /// Position among the kept blocks, starting at 0.
    pub index: usize,
    pub first_line: String,
    pub reason: String,
}

/// Segment a document and extract one record per valid block.
///
/// An empty `records` list means no data was found; it is not an error.
pub fn parse_document(text: &str) -> ParsedRecords {
    let blocks = segment(text);
    let mut parsed = ParsedRecords::default();

    for (index, block) in blocks.iter().enumerate() {
        match try_extract(block) {
            Ok(record) => parsed.records.push(record),
            Err(reason) => {
                let first_line = block.first_line().unwrap_or_default().to_string();
                tracing::debug!(index, %reason, first_line = %first_line, "skipping block");
                parsed.skipped_blocks.push(SkippedBlock {
                    index,
                    first_line,
                    reason: reason.to_string(),
                });
            }
        }
    }

    tracing::info!(
        blocks = blocks.len(),
        records = parsed.records.len(),
        skipped = parsed.skipped_blocks.len(),
        "parsed document"
    );

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delimiter() -> String {
        "-".repeat(110)
    }

    #[test]
    fn test_parse_document_mixed_blocks() {
        let doc = [
            "RELACAO DE PAGAMENTOS\nPAGINA : 1".to_string(),
            delimiter(),
            "1234567 1 ANA LIMA 237-2 00123-4\nCPF 111.222.333-44\nTOTAL LIQUIDO : ***1.000,00".into(),
            delimiter(),
            "RESUMO GERAL".into(),
            delimiter(),
            "7654321 2 BRUNO COSTA\nAG 001-9 98765-0\nTOTAL LIQUIDO : ***2.000,00".into(),
        ]
        .join("\n");

        let parsed = parse_document(&doc);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].nome, "ANA LIMA");
        assert_eq!(parsed.records[0].conta_corrente, "00123-4");
        assert_eq!(parsed.records[1].nome, "BRUNO COSTA");
        assert_eq!(parsed.records[1].banco_agencia, "001-9");
        assert_eq!(parsed.records[1].total_liquido, "2.000,00");

        assert_eq!(parsed.skipped_blocks.len(), 1);
        assert_eq!(parsed.skipped_blocks[0].index, 1);
        assert_eq!(parsed.skipped_blocks[0].first_line, "RESUMO GERAL");
    }

    #[test]
    fn test_parse_document_empty() {
        let parsed = parse_document("");
        assert!(parsed.is_empty());
        assert!(parsed.skipped_blocks.is_empty());
    }
}
