use crate::error::FolhaError;
use crate::profile::schema::ExportProfile;

const COMPLETO_JSON: &str = include_str!("../../../../profiles/completo.json");
const RESUMO_JSON: &str = include_str!("../../../../profiles/resumo.json");
const CONSIGNADO_JSON: &str = include_str!("../../../../profiles/consignado.json");

/// Available predefined export profiles.
pub const PRESETS: &[&str] = &["completo", "resumo", "consignado"];

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Result<ExportProfile, FolhaError> {
    let json = match name {
        "completo" => COMPLETO_JSON,
        "resumo" => RESUMO_JSON,
        "consignado" => CONSIGNADO_JSON,
        _ => {
            return Err(FolhaError::ProfileInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    crate::profile::parse_profile_str(json)
}
