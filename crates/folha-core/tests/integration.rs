//! Integration tests for the parse/export pipeline.
//!
//! Uses a MockExtractor that returns pre-built PageContent without
//! invoking pdftotext, so these tests run without poppler-utils.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use folha_core::error::FolhaError;
use folha_core::export::{CsvExporter, Exporter, XlsxExporter};
use folha_core::extraction::{PageContent, PdfExtractor};
use folha_core::model::{Field, FieldSelection};
use folha_core::profile::builtin::load_preset;
use folha_core::{export_text, parse_file, parse_pdf, parse_text};

struct MockExtractor {
    pages: Vec<PageContent>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, FolhaError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct FailingExtractor;

impl PdfExtractor for FailingExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, FolhaError> {
        Err(FolhaError::PdftotextNotFound)
    }

    fn backend_name(&self) -> &str {
        "failing"
    }
}

fn page(number: usize, lines: &[&str]) -> PageContent {
    PageContent {
        page_number: number,
        text: lines.join("\n"),
    }
}

fn delimiter() -> String {
    "-".repeat(132)
}

fn page_header(n: usize) -> String {
    format!(
        "PREFEITURA MUNICIPAL - INSTITUTO DE PREVIDENCIA\nRELACAO DE PAGAMENTOS - COMPETENCIA 03/2024   PAGINA : {n}"
    )
}

fn ana_block() -> &'static str {
    "0012345 1 ANA MARIA LIMA 237-2 0012345-7\n\
     CPF: 123.456.789-01  DT.APOSENT.: 15/03/2015  CARGO: PROFESSORA\n\
     001 SALARIO BASE 5.000,00\n\
     01 30211 BANCO BRADESCO EMPRESTIMO 012 350,00\n\
     02 30877 CAIXA ECONOMICA AMORT 003 120,50\n\
     TOTAL RENDIMENTOS : ******5.000,00   TOTAL DESCONTOS : ******470,50\n\
     DEPOSITO FGTS : ******0,00   TOTAL LIQUIDO : ******4.529,50\n\
     MARGEM CONSIG. 30%: 1.029,50   MARGEM CONSIG. 70%: 3.029,50"
}

fn bruno_block() -> &'static str {
    "7654321 BRUNO COSTA\n\
     AG/CC 104-0 00098765-X\n\
     CPF 987654321-00 ADMISSAO 02/05/1988\n\
     TOTAL LIQUIDO : ***1.100,00"
}

fn document() -> String {
    [
        page_header(1),
        delimiter(),
        ana_block().to_string(),
        delimiter(),
        "TOTAIS DA PAGINA".to_string(),
        delimiter(),
        page_header(2),
        delimiter(),
        bruno_block().to_string(),
        delimiter(),
    ]
    .join("\n")
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------
#[test]
fn full_document_yields_records_in_order() {
    let parsed = parse_text(&document());

    assert_eq!(parsed.records.len(), 2);
    let ana = &parsed.records[0];
    assert_eq!(ana.matricula, "0012345");
    assert_eq!(ana.nome, "ANA MARIA LIMA");
    assert_eq!(ana.cpf, "123.456.789-01");
    assert_eq!(ana.banco_agencia, "237-2");
    assert_eq!(ana.conta_corrente, "0012345-7");
    assert_eq!(ana.data_aposentadoria, "15/03/2015");
    assert_eq!(ana.total_rendimentos, "5.000,00");
    assert_eq!(ana.total_descontos, "470,50");
    assert_eq!(ana.deposito_fgts, "0,00");
    assert_eq!(ana.total_liquido, "4.529,50");
    assert_eq!(ana.margem_30, "1.029,50");
    assert_eq!(ana.margem_70, "3.029,50");
    assert_eq!(ana.bancos_desconto, "BANCO BRADESCO EMPRESTIMO; CAIXA ECONOMICA AMORT");
    assert_eq!(ana.parcelas_desconto, "012; 003");
    assert_eq!(ana.valores_desconto, "350,00; 120,50");

    let bruno = &parsed.records[1];
    assert_eq!(bruno.nome, "BRUNO COSTA");
    assert_eq!(bruno.banco_agencia, "104-0");
    assert_eq!(bruno.conta_corrente, "00098765-X");
    assert_eq!(bruno.cpf, "987654321-00");
    assert_eq!(bruno.data_aposentadoria, "02/05/1988");
    assert_eq!(bruno.total_rendimentos, "0,00");
    assert_eq!(bruno.total_liquido, "1.100,00");
    assert_eq!(bruno.margem_30, "");
    assert_eq!(bruno.bancos_desconto, "");

    // "TOTAIS DA PAGINA" has a single line and no ID
    assert_eq!(parsed.skipped_blocks.len(), 1);
    assert_eq!(parsed.skipped_blocks[0].first_line, "TOTAIS DA PAGINA");
}

#[test]
fn one_record_plus_page_header_yields_one_record_with_default_totals() {
    let doc = format!(
        "RELATORIO\nPAGINA : 1\n{}\n1234567 10 CARLOS SOUZA\nCPF 111.222.333-44",
        delimiter()
    );
    let parsed = parse_text(&doc);
    assert_eq!(parsed.records.len(), 1);
    let r = &parsed.records[0];
    assert_eq!(r.nome, "CARLOS SOUZA");
    assert_eq!(r.total_rendimentos, "0,00");
    assert_eq!(r.total_descontos, "0,00");
    assert_eq!(r.deposito_fgts, "0,00");
    assert_eq!(r.total_liquido, "0,00");
}

#[test]
fn document_without_records_is_empty_not_error() {
    let parsed = parse_text(&format!("{}\n{}", page_header(1), delimiter()));
    assert!(parsed.is_empty());
}

#[test]
fn parsing_is_deterministic() {
    let doc = document();
    let a = parse_text(&doc);
    let b = parse_text(&doc);
    assert_eq!(a.records, b.records);
}

#[test]
fn parse_pdf_joins_pages_and_skips_blank_ones() {
    let ana_lines: Vec<&str> = ana_block().lines().collect();
    let delim = delimiter();
    let extractor = MockExtractor {
        pages: vec![
            page(1, &["RELACAO DE PAGAMENTOS", "PAGINA : 1", delim.as_str()]),
            page(2, &[]),
            page(3, &ana_lines),
            page(4, &[delim.as_str(), "7654321 BRUNO COSTA", "TOTAL LIQUIDO : ***9,00"]),
        ],
    };

    let parsed = parse_pdf(&[], &extractor).unwrap();
    assert_eq!(parsed.records.len(), 2);
    assert_eq!(parsed.records[0].matricula, "0012345");
    assert_eq!(parsed.records[1].total_liquido, "9,00");
}

#[test]
fn parse_pdf_propagates_extractor_errors() {
    let err = parse_pdf(&[], &FailingExtractor).unwrap_err();
    assert!(matches!(err, FolhaError::PdftotextNotFound));
}

#[test]
fn parse_file_reads_text_and_reports_unreadable_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relatorio.txt");
    std::fs::write(&path, document()).unwrap();

    let parsed = parse_file(&path, &FailingExtractor).unwrap();
    assert_eq!(parsed.records.len(), 2);

    let missing = dir.path().join("nao-existe.pdf");
    let err = parse_file(&missing, &FailingExtractor).unwrap_err();
    assert!(matches!(err, FolhaError::SourceUnreadable { .. }));
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------
#[test]
fn export_xlsx_with_preset_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dados.xlsx");
    let profile = load_preset("resumo").unwrap();
    let selection = profile.selection().unwrap();
    let exporter = XlsxExporter::new(profile.sheet_name());

    let parsed = export_text(&document(), &path, &exporter, &selection).unwrap();
    assert_eq!(parsed.records.len(), 2);

    let bytes = std::fs::read(&path).unwrap();
    let mut wb: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let range = wb.worksheet_range("Resumo").unwrap();

    assert_eq!(range.get_size(), (3, selection.fields().len()));
    let header: Vec<String> = (0..selection.fields().len() as u32)
        .map(|c| range.get_value((0, c)).map(|d| d.to_string()).unwrap_or_default())
        .collect();
    assert_eq!(header, selection.headers());
    assert_eq!(range.get_value((1, 1)), Some(&Data::String("ANA MARIA LIMA".into())));
    assert_eq!(range.get_value((2, 6)), Some(&Data::String("1.100,00".into())));
}

#[test]
fn export_csv_selected_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dados.csv");
    let selection = FieldSelection::new([Field::Nome, Field::TotalLiquido]);

    export_text(&document(), &path, &CsvExporter::new(), &selection).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Nome,Total Líquido");
    assert_eq!(lines[1], "ANA MARIA LIMA,\"4.529,50\"");
    assert_eq!(lines[2], "BRUNO COSTA,\"1.100,00\"");
}

#[test]
fn export_without_records_is_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vazio.xlsx");
    let err = export_text(
        &page_header(1),
        &path,
        &XlsxExporter::default(),
        &FieldSelection::all(),
    )
    .unwrap_err();
    assert!(matches!(err, FolhaError::NoData));
    assert!(!path.exists());
}

#[test]
fn xlsx_encoding_contains_every_selected_header() {
    let parsed = parse_text(&document());
    let bytes = XlsxExporter::default()
        .encode(&FieldSelection::all(), &parsed.records)
        .unwrap();
    let mut wb: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let range = wb.worksheet_range("Dados Financeiros").unwrap();
    assert_eq!(range.get_size(), (3, Field::ALL.len()));
    assert_eq!(
        range.get_value((1, 12)),
        Some(&Data::String("BANCO BRADESCO EMPRESTIMO; CAIXA ECONOMICA AMORT".into()))
    );
}
