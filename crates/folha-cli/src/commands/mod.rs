pub mod export;
pub mod fields;
pub mod parse;
pub mod profiles;

use folha_core::error::FolhaError;
use folha_core::model::FieldSelection;
use folha_core::parsing::ParsedRecords;

/// Field selection from repeated `--field` flags; all fields when none given.
pub fn selection_from_flags(fields: &[String]) -> Result<FieldSelection, FolhaError> {
    if fields.is_empty() {
        Ok(FieldSelection::all())
    } else {
        FieldSelection::from_names(fields)
    }
}

/// Print blocks that looked like records but lacked a valid header.
pub fn report_skipped(parsed: &ParsedRecords) {
    if parsed.skipped_blocks.is_empty() {
        return;
    }
    eprintln!(
        "  {} block(s) skipped during parsing",
        parsed.skipped_blocks.len()
    );
    for block in &parsed.skipped_blocks {
        tracing::info!(
            index = block.index,
            reason = %block.reason,
            "skipped block starting with {:?}",
            block.first_line
        );
    }
}
