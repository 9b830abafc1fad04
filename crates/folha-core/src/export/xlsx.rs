//! Minimal Office Open XML workbook writer.
//!
//! Produces a single worksheet with a bold header row and shared-string
//! cells. Every value is written as text so decimal-comma amounts survive
//! unchanged.

use std::collections::HashMap;
use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::FolhaError;
use crate::export::{rows, Exporter, DEFAULT_SHEET_NAME};
use crate::model::{FieldSelection, PersonRecord};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_SHARED_STRINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";

/// Excel rejects sheet names longer than this.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const COLUMN_WIDTH: f64 = 30.0;

/// Style index of the bold header cells in `styles.xml`.
const BOLD_STYLE: &str = "1";

#[derive(Debug, Clone)]
pub struct XlsxExporter {
    sheet_name: String,
}

impl XlsxExporter {
    pub fn new(sheet_name: &str) -> Self {
        XlsxExporter {
            sheet_name: sanitize_sheet_name(sheet_name),
        }
    }
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self::new(DEFAULT_SHEET_NAME)
    }
}

impl Exporter for XlsxExporter {
    fn encode(
        &self,
        selection: &FieldSelection,
        records: &[PersonRecord],
    ) -> Result<Vec<u8>, FolhaError> {
        let mut strings = SharedStrings::default();
        let header = selection.headers();
        let body = rows(selection, records);

        let sheet = worksheet_xml(&header, &body, COLUMN_WIDTH, &mut strings)?;
        let parts: [(&str, Vec<u8>); 7] = [
            ("[Content_Types].xml", content_types_xml()?),
            ("_rels/.rels", root_rels_xml()?),
            ("xl/workbook.xml", workbook_xml(&self.sheet_name)?),
            ("xl/_rels/workbook.xml.rels", workbook_rels_xml()?),
            ("xl/styles.xml", styles_xml()?),
            ("xl/sharedStrings.xml", strings.to_xml()?),
            ("xl/worksheets/sheet1.xml", sheet),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, bytes) in parts {
            zip.start_file(name, options)?;
            zip.write_all(&bytes)?;
        }
        Ok(zip.finish()?.into_inner())
    }

    fn format_name(&self) -> &str {
        "xlsx"
    }
}

/// Replace characters Excel forbids in sheet names and cap the length.
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').to_string();
    if cleaned.is_empty() {
        DEFAULT_SHEET_NAME.to_string()
    } else {
        cleaned
    }
}

/// Spreadsheet column letters for a zero-based index: 0 -> A, 26 -> AA.
pub fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

#[derive(Default)]
struct SharedStrings {
    index: HashMap<String, usize>,
    ordered: Vec<String>,
    references: usize,
}

impl SharedStrings {
    fn intern(&mut self, s: &str) -> usize {
        self.references += 1;
        if let Some(&i) = self.index.get(s) {
            return i;
        }
        let i = self.ordered.len();
        self.ordered.push(s.to_string());
        self.index.insert(s.to_string(), i);
        i
    }

    fn to_xml(&self) -> Result<Vec<u8>, FolhaError> {
        let count = self.references.to_string();
        let unique = self.ordered.len().to_string();
        let mut xml = XmlBuilder::new()?;
        xml.start(
            "sst",
            &[
                ("xmlns", NS_MAIN),
                ("count", count.as_str()),
                ("uniqueCount", unique.as_str()),
            ],
        )?;
        for s in &self.ordered {
            xml.start("si", &[])?;
            xml.start("t", &[("xml:space", "preserve")])?;
            xml.text(s)?;
            xml.end("t")?;
            xml.end("si")?;
        }
        xml.end("sst")?;
        Ok(xml.finish())
    }
}

fn worksheet_xml(
    header: &[&str],
    body: &[Vec<&str>],
    column_width: f64,
    strings: &mut SharedStrings,
) -> Result<Vec<u8>, FolhaError> {
    let mut xml = XmlBuilder::new()?;
    xml.start("worksheet", &[("xmlns", NS_MAIN), ("xmlns:r", NS_REL)])?;

    if !header.is_empty() {
        let last = header.len().to_string();
        let width = column_width.to_string();
        xml.start("cols", &[])?;
        xml.empty(
            "col",
            &[
                ("min", "1"),
                ("max", last.as_str()),
                ("width", width.as_str()),
                ("customWidth", "1"),
            ],
        )?;
        xml.end("cols")?;
    }

    xml.start("sheetData", &[])?;
    write_row(&mut xml, 1, header, Some(BOLD_STYLE), strings)?;
    for (i, row) in body.iter().enumerate() {
        write_row(&mut xml, i + 2, row, None, strings)?;
    }
    xml.end("sheetData")?;

    xml.end("worksheet")?;
    Ok(xml.finish())
}

fn write_row(
    xml: &mut XmlBuilder,
    row_number: usize,
    values: &[&str],
    style: Option<&str>,
    strings: &mut SharedStrings,
) -> Result<(), FolhaError> {
    let r = row_number.to_string();
    xml.start("row", &[("r", r.as_str())])?;
    for (col, value) in values.iter().enumerate() {
        // Empty values still get a cell so the row keeps its width.
        let reference = format!("{}{}", column_letter(col), row_number);
        let idx = strings.intern(value).to_string();
        let mut attrs: Vec<(&str, &str)> = vec![("r", reference.as_str()), ("t", "s")];
        if let Some(s) = style {
            attrs.push(("s", s));
        }
        xml.start("c", &attrs)?;
        xml.start("v", &[])?;
        xml.text(&idx)?;
        xml.end("v")?;
        xml.end("c")?;
    }
    xml.end("row")?;
    Ok(())
}

fn content_types_xml() -> Result<Vec<u8>, FolhaError> {
    let mut xml = XmlBuilder::new()?;
    xml.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.relationships+xml",
            ),
        ],
    )?;
    xml.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    let overrides = [
        (
            "/xl/workbook.xml",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
        ),
        (
            "/xl/worksheets/sheet1.xml",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml",
        ),
        (
            "/xl/styles.xml",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml",
        ),
        (
            "/xl/sharedStrings.xml",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml",
        ),
    ];
    for (part, content_type) in overrides {
        xml.empty(
            "Override",
            &[("PartName", part), ("ContentType", content_type)],
        )?;
    }
    xml.end("Types")?;
    Ok(xml.finish())
}

fn root_rels_xml() -> Result<Vec<u8>, FolhaError> {
    let mut xml = XmlBuilder::new()?;
    xml.start("Relationships", &[("xmlns", NS_PKG_REL)])?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            ("Type", REL_OFFICE_DOCUMENT),
            ("Target", "xl/workbook.xml"),
        ],
    )?;
    xml.end("Relationships")?;
    Ok(xml.finish())
}

fn workbook_xml(sheet_name: &str) -> Result<Vec<u8>, FolhaError> {
    let mut xml = XmlBuilder::new()?;
    xml.start("workbook", &[("xmlns", NS_MAIN), ("xmlns:r", NS_REL)])?;
    xml.start("sheets", &[])?;
    xml.empty(
        "sheet",
        &[("name", sheet_name), ("sheetId", "1"), ("r:id", "rId1")],
    )?;
    xml.end("sheets")?;
    xml.end("workbook")?;
    Ok(xml.finish())
}

fn workbook_rels_xml() -> Result<Vec<u8>, FolhaError> {
    let mut xml = XmlBuilder::new()?;
    xml.start("Relationships", &[("xmlns", NS_PKG_REL)])?;
    let rels = [
        ("rId1", REL_WORKSHEET, "worksheets/sheet1.xml"),
        ("rId2", REL_STYLES, "styles.xml"),
        ("rId3", REL_SHARED_STRINGS, "sharedStrings.xml"),
    ];
    for (id, kind, target) in rels {
        xml.empty(
            "Relationship",
            &[("Id", id), ("Type", kind), ("Target", target)],
        )?;
    }
    xml.end("Relationships")?;
    Ok(xml.finish())
}

// Font 0 is regular, font 1 bold; cell format 1 points at the bold font.
fn styles_xml() -> Result<Vec<u8>, FolhaError> {
    let mut xml = XmlBuilder::new()?;
    xml.start("styleSheet", &[("xmlns", NS_MAIN)])?;

    xml.start("fonts", &[("count", "2")])?;
    for bold in [false, true] {
        xml.start("font", &[])?;
        if bold {
            xml.empty("b", &[])?;
        }
        xml.empty("sz", &[("val", "11")])?;
        xml.empty("name", &[("val", "Calibri")])?;
        xml.end("font")?;
    }
    xml.end("fonts")?;

    xml.start("fills", &[("count", "2")])?;
    for pattern in ["none", "gray125"] {
        xml.start("fill", &[])?;
        xml.empty("patternFill", &[("patternType", pattern)])?;
        xml.end("fill")?;
    }
    xml.end("fills")?;

    xml.start("borders", &[("count", "1")])?;
    xml.empty("border", &[])?;
    xml.end("borders")?;

    xml.start("cellStyleXfs", &[("count", "1")])?;
    xml.empty(
        "xf",
        &[("numFmtId", "0"), ("fontId", "0"), ("fillId", "0"), ("borderId", "0")],
    )?;
    xml.end("cellStyleXfs")?;

    xml.start("cellXfs", &[("count", "2")])?;
    xml.empty(
        "xf",
        &[
            ("numFmtId", "0"),
            ("fontId", "0"),
            ("fillId", "0"),
            ("borderId", "0"),
            ("xfId", "0"),
        ],
    )?;
    xml.empty(
        "xf",
        &[
            ("numFmtId", "0"),
            ("fontId", "1"),
            ("fillId", "0"),
            ("borderId", "0"),
            ("xfId", "0"),
            ("applyFont", "1"),
        ],
    )?;
    xml.end("cellXfs")?;

    xml.end("styleSheet")?;
    Ok(xml.finish())
}

/// Thin wrapper over `quick_xml::Writer` that maps errors into [`FolhaError`].
struct XmlBuilder {
    writer: Writer<Vec<u8>>,
}

impl XmlBuilder {
    fn new() -> Result<Self, FolhaError> {
        let mut builder = XmlBuilder {
            writer: Writer::new(Vec::new()),
        };
        builder.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(builder)
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), FolhaError> {
        self.writer
            .write_event(event)
            .map_err(|e| FolhaError::Xlsx(e.to_string()))
    }

    fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
        let mut el = BytesStart::new(name);
        for &attr in attrs {
            el.push_attribute(attr);
        }
        el
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), FolhaError> {
        self.write(Event::Start(Self::element(name, attrs)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), FolhaError> {
        self.write(Event::Empty(Self::element(name, attrs)))
    }

    fn end(&mut self, name: &str) -> Result<(), FolhaError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> Result<(), FolhaError> {
        self.write(Event::Text(BytesText::new(text)))
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}
