use serde::{Deserialize, Serialize};

/// A named, ordered selection of export columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Worksheet name for xlsx output.
    #[serde(default)]
    pub sheet_name: Option<String>,
    /// Field headers or ASCII keys, in column order.
    pub fields: Vec<String>,
}
