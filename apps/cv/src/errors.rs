#![allow(dead_code)]

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Application-level error type.
/// Every variant is recoverable: callers report it and the user retries or
/// goes back to editing.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Import text is not well-formed JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Import text is JSON but not a valid résumé document.
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Stable machine-readable code, used in CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Parse(_) => "PARSE_ERROR",
            AppError::Schema(_) => "SCHEMA_ERROR",
            AppError::Render(_) => "RENDER_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }
}

/// Raised when a document that should be renderable is not.
/// A validated document never produces one; seeing it means a defect upstream.
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("required section '{0}' is empty")]
    EmptySection(&'static str),

    #[error("experience {index} is not current and has no end date")]
    MissingEndDate { index: usize },

    #[error("PDF assembly failed: {0}")]
    Pdf(String),

    #[error("HTML template failed: {0}")]
    Template(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(e: lopdf::Error) -> Self {
        RenderError::Pdf(e.to_string())
    }
}

impl From<handlebars::TemplateError> for RenderError {
    fn from(e: handlebars::TemplateError) -> Self {
        RenderError::Template(e.to_string())
    }
}

impl From<handlebars::RenderError> for RenderError {
    fn from(e: handlebars::RenderError) -> Self {
        RenderError::Template(e.to_string())
    }
}

/// A single field-tagged validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted path into the document, e.g. `experience.0.endDate`.
    pub path: String,
    pub message: String,
}

/// Every validation failure found in one pass over a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The first message attached to `path`, if any.
    pub fn message_for(&self, path: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.message.as_str())
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_display_joins_fields() {
        let mut errors = ValidationErrors::default();
        errors.push("profile", "El perfil profesional es requerido");
        errors.push("experience.0.endDate", "La fecha de fin es requerida");
        assert_eq!(
            errors.to_string(),
            "profile: El perfil profesional es requerido; experience.0.endDate: La fecha de fin es requerida"
        );
        assert_eq!(
            errors.message_for("experience.0.endDate"),
            Some("La fecha de fin es requerida")
        );
    }

    #[test]
    fn test_empty_validation_errors_into_ok() {
        assert!(ValidationErrors::default().into_result().is_ok());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Schema("x".into()).code(), "SCHEMA_ERROR");
        assert_eq!(
            AppError::from(RenderError::EmptySection("experience")).code(),
            "RENDER_ERROR"
        );
        assert_eq!(
            AppError::from(ValidationErrors::default()).code(),
            "VALIDATION_ERROR"
        );
    }
}
