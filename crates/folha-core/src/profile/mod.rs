pub mod builtin;
pub mod schema;

use crate::error::FolhaError;
use crate::export::DEFAULT_SHEET_NAME;
use crate::model::{Field, FieldSelection};
use schema::ExportProfile;
use std::path::Path;

/// Load a profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<ExportProfile, FolhaError> {
    let content = std::fs::read_to_string(path).map_err(|e| FolhaError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<ExportProfile, FolhaError> {
    let profile: ExportProfile =
        serde_json::from_str(json).map_err(|e| FolhaError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<ExportProfile, FolhaError> {
    let profile: ExportProfile = serde_json::from_str(json).map_err(FolhaError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed.
pub fn validate_profile(profile: &ExportProfile) -> Result<(), FolhaError> {
    if profile.name.trim().is_empty() {
        return Err(FolhaError::ProfileInvalid("name must not be empty".into()));
    }

    if profile.fields.is_empty() {
        return Err(FolhaError::ProfileInvalid("fields must not be empty".into()));
    }

    let mut seen: Vec<Field> = Vec::new();
    for name in &profile.fields {
        let field = Field::from_name(name).ok_or_else(|| {
            FolhaError::ProfileInvalid(format!("unknown field '{}'", name))
        })?;
        if seen.contains(&field) {
            return Err(FolhaError::ProfileInvalid(format!(
                "field '{}' listed more than once",
                field
            )));
        }
        seen.push(field);
    }

    if let Some(ref sheet) = profile.sheet_name {
        if sheet.trim().is_empty() {
            return Err(FolhaError::ProfileInvalid(
                "sheet_name must not be blank when given".into(),
            ));
        }
    }

    Ok(())
}

impl ExportProfile {
    /// Column selection described by this profile.
    pub fn selection(&self) -> Result<FieldSelection, FolhaError> {
        FieldSelection::from_names(self.fields.as_slice())
    }

    pub fn sheet_name(&self) -> &str {
        self.sheet_name.as_deref().unwrap_or(DEFAULT_SHEET_NAME)
    }
}
