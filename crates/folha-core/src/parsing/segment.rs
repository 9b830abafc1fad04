use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::RecordBlock;

/// Runs of this many dashes (or more) separate one record from the next.
pub const DELIMITER_MIN_DASHES: usize = 100;

/// Blocks containing any of these are page headers or report titles.
pub const BOILERPLATE_MARKERS: &[&str] = &["PAGINA :", "RELACAO DE PAGAMENTOS"];

static DELIMITER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("-{{{DELIMITER_MIN_DASHES},}}")).expect("delimiter regex is valid")
});

/// Split a document into per-record blocks.
///
/// Shorter dash runs are table rules inside a record and do not split.
/// Blank segments and boilerplate segments are dropped; order is kept.
pub fn segment(document: &str) -> Vec<RecordBlock> {
    DELIMITER_RE
        .split(document)
        .filter(|raw| !raw.trim().is_empty())
        .filter(|raw| !is_boilerplate(raw))
        .map(RecordBlock::from_text)
        .collect()
}

/// Check whether a raw segment is a page header or title block.
pub fn is_boilerplate(raw: &str) -> bool {
    BOILERPLATE_MARKERS.iter().any(|m| raw.contains(m))
}
