//! Whole-record validation for résumé documents.
//!
//! Every rule runs over the full document and failures are collected rather
//! than short-circuited, so a form can show all of them next to their fields.
//! Messages are user-facing and follow the fixed `es-ES` locale.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::errors::ValidationErrors;
use crate::models::{
    ComplementaryEntry, EducationEntry, ExperienceEntry, LanguageEntry, PersonalInfo,
    ResumeDocument, SkillGroup,
};

const MSG_DATE_FORMAT: &str = "La fecha debe tener el formato AAAA-MM";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("email regex: {e}"))
    })
}

fn month_regex() -> &'static Regex {
    // YYYY-MM, or YYYY-MM-DD as produced by native date inputs; the day is ignored.
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}-(0[1-9]|1[0-2])(-\d{2})?$")
            .unwrap_or_else(|e| panic!("month regex: {e}"))
    })
}

/// Validates a document against every field and cross-field rule.
pub fn validate(doc: &ResumeDocument) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    validate_personal_info(&doc.personal_info, &mut errors);

    if is_blank(&doc.profile) {
        errors.push("profile", "El perfil profesional es requerido");
    }

    if doc.education.is_empty() {
        errors.push("education", "Al menos una entrada de educación es requerida");
    }
    for (i, entry) in doc.education.iter().enumerate() {
        validate_education(i, entry, &mut errors);
    }

    if doc.experience.is_empty() {
        errors.push("experience", "Al menos una experiencia laboral es requerida");
    }
    for (i, entry) in doc.experience.iter().enumerate() {
        validate_experience(i, entry, &mut errors);
    }

    for (i, group) in doc.skills.iter().enumerate() {
        validate_skill_group(i, group, &mut errors);
    }
    for (i, entry) in doc.languages.iter().enumerate() {
        validate_language(i, entry, &mut errors);
    }
    for (i, entry) in doc.complementary.iter().enumerate() {
        validate_complementary(i, entry, &mut errors);
    }

    errors.into_result()
}

fn validate_personal_info(info: &PersonalInfo, errors: &mut ValidationErrors) {
    require(&info.name, "personalInfo.name", "El nombre es requerido", errors);
    require(
        &info.title,
        "personalInfo.title",
        "El título profesional es requerido",
        errors,
    );
    if !is_valid_email(&info.email) {
        errors.push("personalInfo.email", "Email inválido");
    }
    require(&info.phone, "personalInfo.phone", "El teléfono es requerido", errors);

    let links = [
        (&info.linkedin, "personalInfo.linkedin", "URL de LinkedIn inválida"),
        (&info.github, "personalInfo.github", "URL de GitHub inválida"),
        (&info.website, "personalInfo.website", "URL del sitio web inválida"),
    ];
    for (value, path, message) in links {
        if let Some(url) = value.as_deref() {
            // The empty string is an explicit "no link".
            if !url.is_empty() && !is_valid_url(url) {
                errors.push(path, message);
            }
        }
    }
}

fn validate_education(i: usize, entry: &EducationEntry, errors: &mut ValidationErrors) {
    let path = |field: &str| format!("education.{i}.{field}");
    require(
        &entry.institution,
        path("institution"),
        "La institución es requerida",
        errors,
    );
    require(&entry.degree, path("degree"), "El título es requerido", errors);
    require_month(
        &entry.start_date,
        path("startDate"),
        "La fecha de inicio es requerida",
        errors,
    );
    require_month(
        &entry.end_date,
        path("endDate"),
        "La fecha de fin es requerida",
        errors,
    );
}

fn validate_experience(i: usize, entry: &ExperienceEntry, errors: &mut ValidationErrors) {
    let path = |field: &str| format!("experience.{i}.{field}");
    require(&entry.company, path("company"), "La empresa es requerida", errors);
    require(&entry.position, path("position"), "El cargo es requerido", errors);
    require_month(
        &entry.start_date,
        path("startDate"),
        "La fecha de inicio es requerida",
        errors,
    );
    require(
        &entry.description,
        path("description"),
        "La descripción es requerida",
        errors,
    );

    // A current position ignores whatever end date is left over.
    if !entry.is_current {
        let end = entry.end_date.as_deref().unwrap_or("");
        require_month(end, path("endDate"), "La fecha de fin es requerida", errors);
    }
}

fn validate_skill_group(i: usize, group: &SkillGroup, errors: &mut ValidationErrors) {
    require(
        &group.category,
        format!("skills.{i}.category"),
        "La categoría es requerida",
        errors,
    );
    if group.items.is_empty() {
        errors.push(
            format!("skills.{i}.items"),
            "Al menos una habilidad es requerida",
        );
    }
    for (j, item) in group.items.iter().enumerate() {
        require(
            item,
            format!("skills.{i}.items.{j}"),
            "La habilidad es requerida",
            errors,
        );
    }
}

fn validate_language(i: usize, entry: &LanguageEntry, errors: &mut ValidationErrors) {
    require(
        &entry.language,
        format!("languages.{i}.language"),
        "El idioma es requerido",
        errors,
    );
    require(
        &entry.level,
        format!("languages.{i}.level"),
        "El nivel es requerido",
        errors,
    );
}

fn validate_complementary(i: usize, entry: &ComplementaryEntry, errors: &mut ValidationErrors) {
    let path = |field: &str| format!("complementary.{i}.{field}");
    require(&entry.title, path("title"), "El título es requerido", errors);
    require(
        &entry.institution,
        path("institution"),
        "La institución es requerida",
        errors,
    );
    require_month(
        &entry.start_date,
        path("startDate"),
        "La fecha de inicio es requerida",
        errors,
    );
    require(&entry.kind, path("type"), "El tipo es requerido", errors);

    // End date is optional here; when given (and the entry is not current) it must be well-formed.
    if !entry.is_current {
        if let Some(end) = entry.end_date.as_deref().filter(|e| !e.is_empty()) {
            if !is_valid_month(end) {
                errors.push(path("endDate"), MSG_DATE_FORMAT);
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field predicates
// ────────────────────────────────────────────────────────────────────────────

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Absolute `http`/`https` URL with a host.
pub fn is_valid_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}

/// `YYYY-MM` (optionally followed by `-DD`) with a month in 1..=12.
pub fn is_valid_month(value: &str) -> bool {
    month_regex().is_match(value)
}

fn require(
    value: &str,
    path: impl Into<String>,
    message: &str,
    errors: &mut ValidationErrors,
) {
    if is_blank(value) {
        errors.push(path, message);
    }
}

fn require_month(
    value: &str,
    path: impl Into<String>,
    message: &str,
    errors: &mut ValidationErrors,
) {
    if is_blank(value) {
        errors.push(path, message);
    } else if !is_valid_month(value) {
        errors.push(path, MSG_DATE_FORMAT);
    }
}
