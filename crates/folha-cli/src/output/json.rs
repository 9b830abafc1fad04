use folha_core::error::FolhaError;
use folha_core::model::{FieldSelection, PersonRecord};

/// Records as a JSON array of objects keyed by field header, in selection order.
pub fn format_records(
    records: &[PersonRecord],
    selection: &FieldSelection,
) -> Result<String, FolhaError> {
    let rows: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            let map: serde_json::Map<String, serde_json::Value> = selection
                .fields()
                .iter()
                .map(|f| (f.name().to_string(), serde_json::Value::from(r.get(*f))))
                .collect();
            serde_json::Value::Object(map)
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}
