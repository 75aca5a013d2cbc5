//! Layout Projector: turns a résumé into the ordered, renderer-neutral
//! sections of the Harvard layout.
//!
//! # Section order
//! header, links, profile, experience, education, skills, complementary,
//! languages. Optional sections are omitted when they have nothing to show;
//! experience and education are always present.
//!
//! The projection is a structural map: entries keep their input order and are
//! never filtered or deduplicated. Both the HTML preview and the PDF export
//! consume the same [`ProjectedResume`], so they can only differ in styling.

use serde::Serialize;
use tracing::debug;

use crate::errors::RenderError;
use crate::layout::dates::{format_month_year, format_optional};
use crate::models::resume::non_blank;
use crate::models::{
    ComplementaryEntry, EducationEntry, ExperienceEntry, PersonalInfo, ResumeDocument,
};

pub const PRESENT: &str = "Presente";
pub const LINK_SEPARATOR: &str = " • ";

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedResume {
    pub header: Header,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    /// `"<NAME>, <TITLE>"`, uppercased.
    pub name_line: String,
    /// Non-empty values of location, phone, and email joined with `", "`.
    pub contact_line: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkKind {
    LinkedIn,
    Github,
    Website,
}

impl LinkKind {
    /// Display label; the URL text itself is never shown.
    pub fn label(self) -> &'static str {
        match self {
            LinkKind::LinkedIn => "LinkedIn",
            LinkKind::Github => "Github",
            LinkKind::Website => "Sitio Web",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub kind: LinkKind,
    pub url: String,
}

impl Link {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceBlock {
    pub date_range: String,
    pub location: String,
    /// `"<position>, <company>"`.
    pub heading: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationBlock {
    pub date_range: String,
    pub location: String,
    pub institution: String,
    pub degree: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillLine {
    pub category: String,
    /// Items joined with `", "`.
    pub items: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplementaryBlock {
    pub date_range: String,
    pub title: String,
    pub institution: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageLine {
    pub language: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Section {
    Links(Vec<Link>),
    Profile(String),
    Experience(Vec<ExperienceBlock>),
    Education(Vec<EducationBlock>),
    Skills(Vec<SkillLine>),
    Complementary(Vec<ComplementaryBlock>),
    Languages(Vec<LanguageLine>),
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Links(_) => "LINKS",
            Section::Profile(_) => "PERFIL PROFESIONAL",
            Section::Experience(_) => "EXPERIENCIA LABORAL",
            Section::Education(_) => "FORMACIÓN",
            Section::Skills(_) => "COMPETENCIAS",
            Section::Complementary(_) => "COMPLEMENTARIOS",
            Section::Languages(_) => "IDIOMAS",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Projection
// ────────────────────────────────────────────────────────────────────────────

/// Projects a document into its ordered sections.
///
/// Fails only on documents validation would have rejected: empty experience
/// or education, or a finished position with no end date.
pub fn project(doc: &ResumeDocument) -> Result<ProjectedResume, RenderError> {
    if doc.experience.is_empty() {
        return Err(RenderError::EmptySection("experience"));
    }
    if doc.education.is_empty() {
        return Err(RenderError::EmptySection("education"));
    }

    let mut sections = Vec::with_capacity(7);

    let links = project_links(&doc.personal_info);
    if !links.is_empty() {
        sections.push(Section::Links(links));
    }

    if !doc.profile.trim().is_empty() {
        sections.push(Section::Profile(doc.profile.trim().to_string()));
    }

    let experience = doc
        .experience
        .iter()
        .enumerate()
        .map(|(i, e)| project_experience(i, e))
        .collect::<Result<Vec<_>, _>>()?;
    sections.push(Section::Experience(experience));

    sections.push(Section::Education(
        doc.education.iter().map(project_education).collect(),
    ));

    if !doc.skills.is_empty() {
        sections.push(Section::Skills(
            doc.skills
                .iter()
                .map(|g| SkillLine {
                    category: g.category.clone(),
                    items: g
                        .items
                        .iter()
                        .map(|item| item.trim())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
                .collect(),
        ));
    }

    if !doc.complementary.is_empty() {
        sections.push(Section::Complementary(
            doc.complementary.iter().map(project_complementary).collect(),
        ));
    }

    if !doc.languages.is_empty() {
        sections.push(Section::Languages(
            doc.languages
                .iter()
                .map(|l| LanguageLine {
                    language: l.language.clone(),
                    level: l.level.clone(),
                })
                .collect(),
        ));
    }

    debug!(sections = sections.len(), "Projected document");

    Ok(ProjectedResume {
        header: project_header(&doc.personal_info),
        sections,
    })
}

fn project_header(info: &PersonalInfo) -> Header {
    let name_line = format!("{}, {}", info.name.trim(), info.title.trim()).to_uppercase();

    let contact_line = [
        non_blank(&info.location),
        Some(info.phone.trim()).filter(|p| !p.is_empty()),
        Some(info.email.trim()).filter(|e| !e.is_empty()),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ");

    Header {
        name_line,
        contact_line,
    }
}

/// LinkedIn, then GitHub, then website; each only when set.
pub fn project_links(info: &PersonalInfo) -> Vec<Link> {
    [
        (LinkKind::LinkedIn, &info.linkedin),
        (LinkKind::Github, &info.github),
        (LinkKind::Website, &info.website),
    ]
    .into_iter()
    .filter_map(|(kind, url)| {
        non_blank(url).map(|url| Link {
            kind,
            url: url.to_string(),
        })
    })
    .collect()
}

fn project_experience(index: usize, entry: &ExperienceEntry) -> Result<ExperienceBlock, RenderError> {
    let end = if entry.is_current {
        PRESENT.to_string()
    } else {
        match non_blank(&entry.end_date) {
            Some(end) => format_month_year(end),
            None => return Err(RenderError::MissingEndDate { index }),
        }
    };

    Ok(ExperienceBlock {
        date_range: format!("{} — {}", format_month_year(&entry.start_date), end),
        location: non_blank(&entry.location).unwrap_or_default().to_string(),
        heading: format!("{}, {}", entry.position.trim(), entry.company.trim()),
        bullets: split_bullets(&entry.description),
    })
}

fn project_education(entry: &EducationEntry) -> EducationBlock {
    EducationBlock {
        date_range: format!(
            "{} — {}",
            format_month_year(&entry.start_date),
            format_month_year(&entry.end_date)
        ),
        location: non_blank(&entry.location).unwrap_or_default().to_string(),
        institution: entry.institution.clone(),
        degree: entry.degree.clone(),
        description: non_blank(&entry.description).map(str::to_string),
    }
}

fn project_complementary(entry: &ComplementaryEntry) -> ComplementaryBlock {
    let start = format_month_year(&entry.start_date);
    let date_range = if entry.is_current {
        format!("{start} - {PRESENT}")
    } else {
        match non_blank(&entry.end_date) {
            Some(end) => format!("{start} - {}", format_optional(Some(end))),
            None => start,
        }
    };

    ComplementaryBlock {
        date_range,
        title: entry.title.clone(),
        institution: entry.institution.clone(),
        kind: entry.kind.clone(),
    }
}

/// Splits newline-delimited text into bullets.
///
/// Each line is trimmed and loses any bullet markers it already carries
/// (`•`, `- `, `* `), so text pasted from a rendered CV does not get a double
/// marker. Lines left empty are dropped.
pub fn split_bullets(text: &str) -> Vec<String> {
    text.split('\n')
        .map(strip_bullet_markers)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_bullet_markers(line: &str) -> &str {
    let mut rest = line.trim();
    loop {
        let stripped = rest
            .strip_prefix('•')
            .or_else(|| rest.strip_prefix("- "))
            .or_else(|| rest.strip_prefix("* "));
        match stripped {
            Some(s) => rest = s.trim_start(),
            None => return rest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{make_full_document, make_valid_document};

    fn section<'a>(projected: &'a ProjectedResume, title: &str) -> Option<&'a Section> {
        projected.sections.iter().find(|s| s.title() == title)
    }

    fn titles(projected: &ProjectedResume) -> Vec<&'static str> {
        projected.sections.iter().map(Section::title).collect()
    }

    // ── End-to-end ──────────────────────────────────────────────────────────

    #[test]
    fn test_ana_ruiz_example() {
        let projected = project(&make_valid_document()).unwrap();
        assert!(projected.header.name_line.starts_with("ANA RUIZ, "));
        assert_eq!(projected.header.name_line, "ANA RUIZ, SOFTWARE ENGINEER");

        let Some(Section::Experience(blocks)) = section(&projected, "EXPERIENCIA LABORAL") else {
            panic!("experience section missing");
        };
        assert_eq!(blocks[0].date_range, "Marzo 2021 — Presente");
        assert_eq!(blocks[0].heading, "Engineer, Acme");
        assert_eq!(blocks[0].bullets, vec!["Shipped feature A", "Mentored 2 engineers"]);
    }

    #[test]
    fn test_full_document_section_order() {
        let projected = project(&make_full_document()).unwrap();
        assert_eq!(
            titles(&projected),
            vec![
                "LINKS",
                "PERFIL PROFESIONAL",
                "EXPERIENCIA LABORAL",
                "FORMACIÓN",
                "COMPETENCIAS",
                "COMPLEMENTARIOS",
                "IDIOMAS",
            ]
        );
    }

    // ── Header ──────────────────────────────────────────────────────────────

    #[test]
    fn test_contact_line_skips_missing_location() {
        let mut doc = make_valid_document();
        assert_eq!(
            project(&doc).unwrap().header.contact_line,
            "Madrid, +34 600 000 000, ana@example.com"
        );
        doc.personal_info.location = None;
        assert_eq!(
            project(&doc).unwrap().header.contact_line,
            "+34 600 000 000, ana@example.com"
        );
    }

    // ── Omission rules ──────────────────────────────────────────────────────

    #[test]
    fn test_optional_sections_omitted_when_empty() {
        let mut doc = make_valid_document();
        doc.profile = String::new();
        doc.personal_info.linkedin = None;
        let projected = project(&doc).unwrap();
        assert_eq!(titles(&projected), vec!["EXPERIENCIA LABORAL", "FORMACIÓN"]);
    }

    #[test]
    fn test_profile_present_when_non_empty() {
        let projected = project(&make_valid_document()).unwrap();
        assert!(section(&projected, "PERFIL PROFESIONAL").is_some());
        assert!(section(&projected, "COMPETENCIAS").is_none());
        assert!(section(&projected, "IDIOMAS").is_none());
        assert!(section(&projected, "COMPLEMENTARIOS").is_none());
    }

    #[test]
    fn test_empty_experience_is_render_error() {
        let mut doc = make_valid_document();
        doc.experience.clear();
        assert_eq!(project(&doc), Err(RenderError::EmptySection("experience")));

        let mut doc = make_valid_document();
        doc.education.clear();
        assert_eq!(project(&doc), Err(RenderError::EmptySection("education")));
    }

    #[test]
    fn test_finished_job_without_end_date_is_render_error() {
        let mut doc = make_valid_document();
        doc.experience[0].is_current = false;
        doc.experience[0].end_date = Some(String::new());
        assert_eq!(project(&doc), Err(RenderError::MissingEndDate { index: 0 }));
    }

    // ── Links ───────────────────────────────────────────────────────────────

    #[test]
    fn test_links_only_linkedin() {
        let links = project_links(&make_valid_document().personal_info);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].label(), "LinkedIn");
    }

    #[test]
    fn test_links_order_and_labels() {
        let mut info = make_full_document().personal_info;
        let labels: Vec<_> = project_links(&info).iter().map(Link::label).collect();
        assert_eq!(labels, vec!["LinkedIn", "Github", "Sitio Web"]);

        info.linkedin = None;
        let labels: Vec<_> = project_links(&info).iter().map(Link::label).collect();
        assert_eq!(labels, vec!["Github", "Sitio Web"]);
    }

    // ── Entries ─────────────────────────────────────────────────────────────

    #[test]
    fn test_finished_experience_range_and_location() {
        let projected = project(&make_full_document()).unwrap();
        let Some(Section::Experience(blocks)) = section(&projected, "EXPERIENCIA LABORAL") else {
            panic!("experience section missing");
        };
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].date_range, "Julio 2018 — Febrero 2021");
        assert_eq!(blocks[1].location, "Barcelona");
        assert_eq!(
            blocks[1].bullets,
            vec!["Built the billing service", "Cut deploy time by 40%"]
        );
    }

    #[test]
    fn test_current_experience_ignores_stale_end_date() {
        let mut doc = make_valid_document();
        doc.experience[0].end_date = Some("2022-01".to_string());
        let projected = project(&doc).unwrap();
        let Some(Section::Experience(blocks)) = section(&projected, "EXPERIENCIA LABORAL") else {
            panic!("experience section missing");
        };
        assert_eq!(blocks[0].date_range, "Marzo 2021 — Presente");
    }

    #[test]
    fn test_education_block() {
        let projected = project(&make_full_document()).unwrap();
        let Some(Section::Education(blocks)) = section(&projected, "FORMACIÓN") else {
            panic!("education section missing");
        };
        assert_eq!(blocks[0].date_range, "Septiembre 2014 — Junio 2018");
        assert_eq!(blocks[0].location, "Madrid");
        assert_eq!(
            blocks[0].description.as_deref(),
            Some("Matrícula de honor en Sistemas Operativos")
        );
    }

    #[test]
    fn test_skills_joined_with_commas() {
        let projected = project(&make_full_document()).unwrap();
        let Some(Section::Skills(lines)) = section(&projected, "COMPETENCIAS") else {
            panic!("skills section missing");
        };
        assert_eq!(lines[0].category, "Lenguajes");
        assert_eq!(lines[0].items, "Rust, Go, TypeScript");
        assert_eq!(lines[1].items, "Kubernetes");
    }

    #[test]
    fn test_complementary_date_ranges() {
        let projected = project(&make_full_document()).unwrap();
        let Some(Section::Complementary(blocks)) = section(&projected, "COMPLEMENTARIOS") else {
            panic!("complementary section missing");
        };
        let ranges: Vec<_> = blocks.iter().map(|b| b.date_range.as_str()).collect();
        assert_eq!(
            ranges,
            vec!["Mayo 2022", "Octubre 2023 - Presente", "Enero 2019 - Diciembre 2019"]
        );
        assert_eq!(blocks[0].kind, "Certificación");
    }

    #[test]
    fn test_languages_keep_order() {
        let projected = project(&make_full_document()).unwrap();
        let Some(Section::Languages(lines)) = section(&projected, "IDIOMAS") else {
            panic!("languages section missing");
        };
        assert_eq!(lines[0].language, "Español");
        assert_eq!(lines[1].level, "C1");
    }

    // ── Bullets ─────────────────────────────────────────────────────────────

    #[test]
    fn test_split_bullets_no_trailing_empty() {
        assert_eq!(split_bullets("Built X\nLed Y\n"), vec!["Built X", "Led Y"]);
    }

    #[test]
    fn test_split_bullets_strips_existing_markers() {
        assert_eq!(
            split_bullets("• Built X\n• • Led Y\n- Ran Z\n  * Wrote W  \r\n"),
            vec!["Built X", "Led Y", "Ran Z", "Wrote W"]
        );
    }

    #[test]
    fn test_split_bullets_keeps_inner_hyphens() {
        assert_eq!(split_bullets("-40% latency"), vec!["-40% latency"]);
        assert!(split_bullets("\n\n  \n").is_empty());
    }
}
