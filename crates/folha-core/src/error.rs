use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FolhaError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("source unreadable: {path}: {reason}")]
    SourceUnreadable { path: PathBuf, reason: String },

    #[error("destination unwritable: {path}: {reason}")]
    DestinationUnwritable { path: PathBuf, reason: String },

    #[error("no payment records found in document")]
    NoData,

    #[error("no fields selected for export")]
    EmptySelection,

    #[error("unknown field '{0}'. Run `folha fields` to list the available fields")]
    UnknownField(String),

    #[error("failed to load profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid profile: {0}")]
    ProfileInvalid(String),

    #[error("spreadsheet encoding failed: {0}")]
    Xlsx(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
