use folha_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::commands::{report_skipped, selection_from_flags};
use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    fields: &[String],
    raw: bool,
) -> Result<(), folha_core::error::FolhaError> {
    let selection = selection_from_flags(fields)?;
    let extractor = PdftotextExtractor::new().with_layout(!raw);
    let parsed = folha_core::parse_file(&input_file, &extractor)?;

    if parsed.is_empty() {
        eprintln!("No payment records found in {}", input_file.display());
        report_skipped(&parsed);
        return Ok(());
    }

    let output_str = match output_format {
        "json" => output::json::format_records(&parsed.records, &selection)?,
        _ => output::table::format_records(&parsed.records, &selection),
    };
    println!("{output_str}");

    eprintln!("Parsed {} record(s)", parsed.records.len());
    report_skipped(&parsed);

    Ok(())
}
