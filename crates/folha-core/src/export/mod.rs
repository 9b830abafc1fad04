pub mod csv;
pub mod xlsx;

use std::path::Path;

use crate::error::FolhaError;
use crate::model::{FieldSelection, PersonRecord};

pub use self::csv::CsvExporter;
pub use self::xlsx::XlsxExporter;

/// Sheet name used when no profile overrides it.
pub const DEFAULT_SHEET_NAME: &str = "Dados Financeiros";

/// Trait for tabular output backends.
pub trait Exporter {
    /// Encode a header row plus one row per record into file bytes.
    fn encode(
        &self,
        selection: &FieldSelection,
        records: &[PersonRecord],
    ) -> Result<Vec<u8>, FolhaError>;

    /// Name of this export format (for diagnostics).
    fn format_name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// Pick a format from the destination's extension; anything but `.csv` is xlsx.
    pub fn from_path(path: &Path) -> ExportFormat {
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv {
            ExportFormat::Csv
        } else {
            ExportFormat::Xlsx
        }
    }

    pub fn exporter(&self, sheet_name: &str) -> Box<dyn Exporter> {
        match self {
            ExportFormat::Xlsx => Box::new(XlsxExporter::new(sheet_name)),
            ExportFormat::Csv => Box::new(CsvExporter::new()),
        }
    }
}

/// Values of the selected fields, one row per record, in selection order.
pub fn rows<'a>(selection: &FieldSelection, records: &'a [PersonRecord]) -> Vec<Vec<&'a str>> {
    records
        .iter()
        .map(|r| selection.fields().iter().map(|f| r.get(*f)).collect())
        .collect()
}

/// Encode records and write them to `path`.
///
/// Zero records is reported as [`FolhaError::NoData`] and nothing is written.
pub fn export_records(
    path: &Path,
    exporter: &dyn Exporter,
    selection: &FieldSelection,
    records: &[PersonRecord],
) -> Result<(), FolhaError> {
    if records.is_empty() {
        return Err(FolhaError::NoData);
    }
    if selection.is_empty() {
        return Err(FolhaError::EmptySelection);
    }

    let bytes = exporter.encode(selection, records)?;
    std::fs::write(path, bytes).map_err(|e| FolhaError::DestinationUnwritable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::info!(
        path = %path.display(),
        format = exporter.format_name(),
        records = records.len(),
        columns = selection.fields().len(),
        "exported records"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;

    fn record(id: &str, name: &str) -> PersonRecord {
        let mut r = PersonRecord::with_id(id);
        r.nome = name.to_string();
        r
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("out.CSV")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("out.xlsx")), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::from_path(Path::new("out")), ExportFormat::Xlsx);
    }

    #[test]
    fn test_rows_follow_selection_order() {
        let records = vec![record("1111111", "ANA"), record("2222222", "BRUNO")];
        let sel = FieldSelection::new([Field::Nome, Field::TotalLiquido, Field::Matricula]);
        let rows = rows(&sel, &records);
        assert_eq!(rows[0], vec!["ANA", "0,00", "1111111"]);
        assert_eq!(rows[1], vec!["BRUNO", "0,00", "2222222"]);
    }

    #[test]
    fn test_export_no_records_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vazio.xlsx");
        let err = export_records(&path, &CsvExporter::new(), &FieldSelection::all(), &[])
            .unwrap_err();
        assert!(matches!(err, FolhaError::NoData));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.csv");
        let err = export_records(
            &path,
            &CsvExporter::new(),
            &FieldSelection::new([]),
            &[record("1111111", "ANA")],
        )
        .unwrap_err();
        assert!(matches!(err, FolhaError::EmptySelection));
    }

    #[test]
    fn test_export_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nao-existe").join("x.csv");
        let err = export_records(
            &path,
            &CsvExporter::new(),
            &FieldSelection::all(),
            &[record("1111111", "ANA")],
        )
        .unwrap_err();
        assert!(matches!(err, FolhaError::DestinationUnwritable { .. }));
    }
}
