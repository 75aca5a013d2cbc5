//! JSON export/import of résumé documents.
//!
//! `deserialize` separates the two ways an import can fail: text that is not
//! JSON at all (`AppError::Parse`) and JSON that is not a valid résumé
//! (`AppError::Schema`). Neither ever falls back to a default document.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::form::validation::validate;
use crate::models::ResumeDocument;

/// Pretty-printed JSON with two-space indentation.
pub fn serialize(doc: &ResumeDocument) -> Result<String, AppError> {
    serde_json::to_string_pretty(doc).map_err(|e| AppError::Schema(e.to_string()))
}

/// Parses a document without applying the validation rules.
pub fn parse_document(text: &str) -> Result<ResumeDocument, AppError> {
    // Syntax first, so shape errors are never reported as parse errors.
    let value: serde_json::Value = serde_json::from_str(text).map_err(AppError::Parse)?;

    serde_json::from_value(value).map_err(|e| AppError::Schema(e.to_string()))
}

/// Parses and validates an imported document.
pub fn deserialize(text: &str) -> Result<ResumeDocument, AppError> {
    let doc = parse_document(text)?;

    validate(&doc).map_err(|errors| AppError::Schema(errors.to_string()))?;
    debug!(
        experience = doc.experience.len(),
        education = doc.education.len(),
        "Deserialized document"
    );
    Ok(doc)
}

/// Reads and deserializes a document file.
pub fn import_file(path: &Path) -> Result<ResumeDocument, AppError> {
    let text = fs::read_to_string(path)?;
    let doc = deserialize(&text)?;
    info!("Imported document from {}", path.display());
    Ok(doc)
}

/// Writes `bytes` next to `path` and atomically moves them into place.
/// A failed write leaves any previous file untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| AppError::Io(e.error))?;
    Ok(())
}

/// Serializes a document and writes it to `path`.
pub fn export_file(doc: &ResumeDocument, path: &Path) -> Result<(), AppError> {
    let mut text = serialize(doc)?;
    text.push('\n');
    write_atomic(path, text.as_bytes())?;
    info!("Exported document to {}", path.display());
    Ok(())
}
