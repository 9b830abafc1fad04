use folha_core::model::{FieldSelection, PersonRecord};

/// Render records as an aligned text table, one row per record.
pub fn format_records(records: &[PersonRecord], selection: &FieldSelection) -> String {
    let headers = selection.headers();
    let fields = selection.fields();

    let widths: Vec<usize> = fields
        .iter()
        .zip(&headers)
        .map(|(f, h)| {
            records
                .iter()
                .map(|r| display_width(r.get(*f)))
                .chain(std::iter::once(display_width(h)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for r in records {
        push_row(&mut out, fields.iter().map(|f| r.get(*f)), &widths);
    }

    // Drop the final newline; callers print with println!
    out.pop();
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(c, w)| format!("{}{}", c, " ".repeat(w - display_width(c))))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}
