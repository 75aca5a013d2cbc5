use serde::{Deserialize, Serialize};

/// One résumé, exactly as it is exported to and imported from `data.json`.
///
/// Optional text fields keep the distinction between an absent key and an
/// empty string so that a document survives a serialize/deserialize round trip
/// field for field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub profile: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<SkillGroup>,
    pub languages: Vec<LanguageEntry>,
    /// Older exports predate this section; a missing key reads as empty.
    #[serde(default)]
    pub complementary: Vec<ComplementaryEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    /// Newline-delimited bullet text.
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub language: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplementaryEntry {
    pub title: String,
    pub institution: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResumeDocument {
    /// The blank document a new session starts from: one empty row in each
    /// list the form shows by default, and no complementary rows.
    pub fn blank() -> Self {
        Self {
            personal_info: PersonalInfo {
                location: Some(String::new()),
                linkedin: Some(String::new()),
                ..PersonalInfo::default()
            },
            profile: String::new(),
            education: vec![EducationEntry::default()],
            experience: vec![ExperienceEntry {
                end_date: Some(String::new()),
                ..ExperienceEntry::default()
            }],
            skills: vec![SkillGroup {
                category: String::new(),
                items: vec![String::new()],
            }],
            languages: vec![LanguageEntry::default()],
            complementary: Vec::new(),
        }
    }
}

/// Returns the value when it is present and not blank.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
