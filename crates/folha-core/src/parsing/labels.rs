//! Label-driven fields: totals and consignable margins.
//!
//! Totals take the first line containing the label that also carries a
//! starred amount. Margins read the first line containing the label. Adding a labeled field means adding a row to
//! [`LABEL_RULES`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Field;

/// How the value following a label is captured.
#[derive(Debug)]
pub enum Capture {
    /// Label, optional whitespace, a run of `*` padding, then `[\d.,]+`.
    Starred(Regex),
    /// First whitespace-delimited token after the label.
    FirstToken,
}

#[derive(Debug)]
pub struct LabelRule {
    pub field: Field,
    pub label: &'static str,
    pub capture: Capture,
}

impl LabelRule {
    pub fn starred(field: Field, label: &'static str) -> Self {
        let pattern = format!(r"{}\s*\*+([\d.,]+)", regex::escape(label));
        let re = Regex::new(&pattern).expect("escaped label regex is valid");
        LabelRule {
            field,
            label,
            capture: Capture::Starred(re),
        }
    }

    pub fn first_token(field: Field, label: &'static str) -> Self {
        LabelRule {
            field,
            label,
            capture: Capture::FirstToken,
        }
    }

    /// Apply the rule to a block's lines, falling back to the field default.
    pub fn apply(&self, lines: &[String]) -> String {
        self.capture_from(lines)
            .map(str::to_string)
            .unwrap_or_else(|| self.field.default_value().to_string())
    }

    fn capture_from<'a>(&self, lines: &'a [String]) -> Option<&'a str> {
        let mut labeled = lines.iter().filter(|l| l.contains(self.label));
        match &self.capture {
            Capture::Starred(re) => labeled
                .find_map(|l| re.captures(l)?.get(1))
                .map(|m| m.as_str()),
            Capture::FirstToken => {
                let line = labeled.next()?;
                line.split(self.label).nth(1)?.split_whitespace().next()
            }
        }
    }
}

pub static LABEL_RULES: Lazy<Vec<LabelRule>> = Lazy::new(|| {
    vec![
        LabelRule::starred(Field::TotalRendimentos, "TOTAL RENDIMENTOS :"),
        LabelRule::starred(Field::TotalDescontos, "TOTAL DESCONTOS :"),
        LabelRule::starred(Field::DepositoFgts, "DEPOSITO FGTS :"),
        LabelRule::starred(Field::TotalLiquido, "TOTAL LIQUIDO :"),
        LabelRule::first_token(Field::Margem30, "MARGEM CONSIG. 30%:"),
        LabelRule::first_token(Field::Margem70, "MARGEM CONSIG. 70%:"),
    ]
});
