use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Deduction, LIST_SEPARATOR};

/// Only lines mentioning one of these are considered deduction lines.
pub const CANDIDATE_MARKERS: &[&str] = &["EMPREST", "AMORT", "CONTRIB"];

// code, 5-digit rubric, bank name, installment, value
static DEDUCTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,2}\s+\d{5}\s+([A-Z \-]+)\s+(\d{1,3})\s+([\d.,]+)")
        .expect("deduction regex is valid")
});

pub fn is_candidate(line: &str) -> bool {
    CANDIDATE_MARKERS.iter().any(|m| line.contains(m))
}

/// Parse one line into a deduction, if it is a candidate and matches.
pub fn parse_deduction(line: &str) -> Option<Deduction> {
    if !is_candidate(line) {
        return None;
    }
    let caps = DEDUCTION_RE.captures(line)?;
    Some(Deduction {
        bank: caps[1].trim().to_string(),
        installment: caps[2].trim().to_string(),
        value: caps[3].trim().to_string(),
    })
}

/// Collect itemized deductions from every line, in line order.
pub fn extract_deductions(lines: &[String]) -> Vec<Deduction> {
    lines.iter().filter_map(|l| parse_deduction(l)).collect()
}

/// Join deductions into the parallel (banks, installments, values) columns.
pub fn join_columns(deductions: &[Deduction]) -> (String, String, String) {
    let mut banks = Vec::with_capacity(deductions.len());
    let mut installments = Vec::with_capacity(deductions.len());
    let mut values = Vec::with_capacity(deductions.len());
    for d in deductions {
        banks.push(d.bank.as_str());
        installments.push(d.installment.as_str());
        values.push(d.value.as_str());
    }
    (
        banks.join(LIST_SEPARATOR),
        installments.join(LIST_SEPARATOR),
        values.join(LIST_SEPARATOR),
    )
}
