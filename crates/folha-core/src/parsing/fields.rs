use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::model::{PersonRecord, RecordBlock};
use crate::parsing::deductions::{extract_deductions, join_columns};
use crate::parsing::labels::LABEL_RULES;

/// Number of leading lines searched for the retirement date.
const DATE_SEARCH_LINES: usize = 5;

static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{7})").expect("id regex is valid"));

// ID, sequence number, then an uppercase name ending before a digit token or EOL.
static NAME_AFTER_SEQ_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{7}\s+\d+\s+([A-ZÀ-Ú][A-ZÀ-Ú\s\-]+[A-ZÀ-Ú])(?:\s+\d|$)")
        .expect("name regex is valid")
});

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{7}\s+([A-ZÀ-Ú][A-ZÀ-Ú\s\-]+[A-ZÀ-Ú])(?:\s+\d|$)")
        .expect("name regex is valid")
});

static CPF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{3}\.\d{3}\.\d{3}-\d{2}|\d{9}-\d{2}").expect("cpf regex is valid")
});

static BANK_ACCOUNT_EOL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{3,}-[A-Z0-9])\s+(\d{4,}-[\dXx\-]+)$").expect("bank regex is valid")
});

static BANK_ACCOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{3,}-[A-Z0-9])\s+(\d{4,}-[\dXx\-]+)").expect("bank regex is valid")
});

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}/\d{2}/\d{4}").expect("date regex is valid"));

/// Why a block was not turned into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    TooFewLines,
    MissingId,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewLines => write!(f, "fewer than 2 lines"),
            SkipReason::MissingId => write!(f, "first line has no leading 7-digit ID"),
        }
    }
}

/// Extract a record from a block, or `None` if the block is not a record.
pub fn extract(block: &RecordBlock) -> Option<PersonRecord> {
    try_extract(block).ok()
}

/// Like [`extract`], but reports why a block was rejected.
///
/// Every field rule fails soft to its default; only the two header checks
/// reject a block.
pub fn try_extract(block: &RecordBlock) -> Result<PersonRecord, SkipReason> {
    let lines = &block.lines;
    if lines.len() < 2 {
        return Err(SkipReason::TooFewLines);
    }
    let header = lines[0].as_str();

    let matricula = ID_RE
        .captures(header)
        .and_then(|c| c.get(1))
        .ok_or(SkipReason::MissingId)?
        .as_str();

    let mut record = PersonRecord::with_id(matricula);
    record.nome = extract_name(header);
    record.cpf = extract_cpf(lines);

    if let Some((branch, account)) = extract_bank_account(header, &lines[1]) {
        record.banco_agencia = branch;
        record.conta_corrente = account;
    }

    record.data_aposentadoria = extract_retirement_date(lines);

    for rule in LABEL_RULES.iter() {
        *record.slot_mut(rule.field) = rule.apply(lines);
    }

    let deductions = extract_deductions(lines);
    let (banks, installments, values) = join_columns(&deductions);
    record.bancos_desconto = banks;
    record.parcelas_desconto = installments;
    record.valores_desconto = values;

    Ok(record)
}

/// Uppercase name on the header line, with or without a sequence number
/// between the ID and the name.
pub fn extract_name(header: &str) -> String {
    NAME_AFTER_SEQ_RE
        .captures(header)
        .or_else(|| NAME_RE.captures(header))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// First CPF anywhere in the block, punctuated or not.
pub fn extract_cpf(lines: &[String]) -> String {
    CPF_RE
        .find(&lines.join("\n"))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Branch and account: end of the header line first, then anywhere on line 2.
pub fn extract_bank_account(header: &str, second: &str) -> Option<(String, String)> {
    let caps = BANK_ACCOUNT_EOL_RE
        .captures(header)
        .or_else(|| BANK_ACCOUNT_RE.captures(second))?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

pub fn extract_retirement_date(lines: &[String]) -> String {
    lines
        .iter()
        .take(DATE_SEARCH_LINES)
        .find_map(|l| DATE_RE.find(l))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
