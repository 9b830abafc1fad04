use folha_core::error::FolhaError;
use folha_core::export::{export_records, ExportFormat, DEFAULT_SHEET_NAME};
use folha_core::extraction::pdftotext::PdftotextExtractor;
use folha_core::model::FieldSelection;
use folha_core::profile::{self, builtin};
use std::path::PathBuf;

use crate::commands::{report_skipped, selection_from_flags};

pub struct ExportArgs {
    pub input_file: PathBuf,
    pub out: Option<PathBuf>,
    pub fields: Vec<String>,
    pub preset: Option<String>,
    pub profile: Option<PathBuf>,
    pub raw: bool,
}

pub fn run(args: ExportArgs) -> Result<(), FolhaError> {
    let (selection, sheet_name) = resolve_columns(&args)?;

    let extractor = PdftotextExtractor::new().with_layout(!args.raw);
    let parsed = folha_core::parse_file(&args.input_file, &extractor)?;

    // Nothing to write is a result, not a failure.
    if parsed.is_empty() {
        eprintln!("No payment records found in {}", args.input_file.display());
        report_skipped(&parsed);
        return Ok(());
    }

    let out = args.out.unwrap_or_else(default_output_path);
    let format = ExportFormat::from_path(&out);
    let exporter = format.exporter(&sheet_name);
    export_records(&out, exporter.as_ref(), &selection, &parsed.records)?;

    eprintln!(
        "Exported {} record(s) with {} column(s) to {}",
        parsed.records.len(),
        selection.fields().len(),
        out.display()
    );
    report_skipped(&parsed);

    Ok(())
}

/// Explicit `--field` flags win over the profile file or preset (clap rejects both at once).
fn resolve_columns(args: &ExportArgs) -> Result<(FieldSelection, String), FolhaError> {
    let chosen = match (&args.profile, &args.preset) {
        (Some(path), _) => Some(profile::load_profile(path)?),
        (None, Some(name)) => Some(builtin::load_preset(name)?),
        (None, None) => None,
    };

    let sheet_name = chosen
        .as_ref()
        .map(|p| p.sheet_name().to_string())
        .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());

    let selection = match chosen {
        Some(ref p) if args.fields.is_empty() => p.selection()?,
        _ => selection_from_flags(&args.fields)?,
    };

    Ok((selection, sheet_name))
}

fn default_output_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("dados_financeiros_{stamp}.xlsx"))
}
