use crate::error::FolhaError;
use crate::export::{rows, Exporter};
use crate::model::{FieldSelection, PersonRecord};

/// Comma-separated output with a header row. Fields are quoted as needed.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    delimiter: u8,
}

impl CsvExporter {
    pub fn new() -> Self {
        CsvExporter { delimiter: b',' }
    }

    /// Use another delimiter, e.g. `;` for spreadsheet locales with decimal commas.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for CsvExporter {
    fn encode(
        &self,
        selection: &FieldSelection,
        records: &[PersonRecord],
    ) -> Result<Vec<u8>, FolhaError> {
        let mut writer = ::csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        writer.write_record(selection.headers())?;
        for row in rows(selection, records) {
            writer.write_record(&row)?;
        }

        writer
            .into_inner()
            .map_err(|e| FolhaError::Io(e.into_error()))
    }

    fn format_name(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;

    #[test]
    fn test_csv_header_and_quoting() {
        let mut r = PersonRecord::with_id("1234567");
        r.nome = "ANA LIMA".into();
        r.valores_desconto = "150,00; 80,10".into();
        let sel = FieldSelection::new([Field::Matricula, Field::Nome, Field::ValoresDesconto]);

        let bytes = CsvExporter::new().encode(&sel, &[r]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "Matrícula,Nome,Valores Desconto\n1234567,ANA LIMA,\"150,00; 80,10\"\n"
        );
    }

    #[test]
    fn test_csv_semicolon_delimiter() {
        let r = PersonRecord::with_id("1234567");
        let sel = FieldSelection::new([Field::Matricula, Field::TotalLiquido]);
        let bytes = CsvExporter::new()
            .with_delimiter(b';')
            .encode(&sel, &[r])
            .unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Matrícula;Total Líquido\n1234567;0,00\n"
        );
    }
}
