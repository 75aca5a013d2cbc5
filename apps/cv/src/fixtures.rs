//! Shared test documents.

use crate::models::{
    ComplementaryEntry, EducationEntry, ExperienceEntry, LanguageEntry, PersonalInfo,
    ResumeDocument, SkillGroup,
};

/// A minimal valid document: one current experience, one education entry,
/// no skills, languages, or complementary entries.
pub fn make_valid_document() -> ResumeDocument {
    ResumeDocument {
        personal_info: PersonalInfo {
            name: "Ana Ruiz".to_string(),
            title: "Software Engineer".to_string(),
            email: "ana@example.com".to_string(),
            phone: "+34 600 000 000".to_string(),
            location: Some("Madrid".to_string()),
            linkedin: Some("https://linkedin.com/in/anaruiz".to_string()),
            website: None,
            github: Some(String::new()),
        },
        profile: "Ingeniera de software con foco en sistemas distribuidos.".to_string(),
        education: vec![EducationEntry {
            institution: "Universidad Politécnica de Madrid".to_string(),
            degree: "Grado en Ingeniería Informática".to_string(),
            start_date: "2014-09".to_string(),
            end_date: "2018-06".to_string(),
            location: None,
            description: None,
        }],
        experience: vec![ExperienceEntry {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            start_date: "2021-03".to_string(),
            end_date: None,
            is_current: true,
            description: "Shipped feature A\nMentored 2 engineers".to_string(),
            location: None,
        }],
        skills: vec![],
        languages: vec![],
        complementary: vec![],
    }
}

/// A document with every optional section filled in.
pub fn make_full_document() -> ResumeDocument {
    let mut doc = make_valid_document();
    doc.personal_info.github = Some("https://github.com/anaruiz".to_string());
    doc.personal_info.website = Some("https://anaruiz.dev".to_string());
    doc.experience.push(ExperienceEntry {
        company: "Globex".to_string(),
        position: "Junior Developer".to_string(),
        start_date: "2018-07".to_string(),
        end_date: Some("2021-02".to_string()),
        is_current: false,
        description: "• Built the billing service\n• • Cut deploy time by 40%\n\n".to_string(),
        location: Some("Barcelona".to_string()),
    });
    doc.education[0].location = Some("Madrid".to_string());
    doc.education[0].description = Some("Matrícula de honor en Sistemas Operativos".to_string());
    doc.skills = vec![
        SkillGroup {
            category: "Lenguajes".to_string(),
            items: vec!["Rust".to_string(), " Go".to_string(), "TypeScript".to_string()],
        },
        SkillGroup {
            category: "Infraestructura".to_string(),
            items: vec!["Kubernetes".to_string()],
        },
    ];
    doc.languages = vec![
        LanguageEntry {
            language: "Español".to_string(),
            level: "Nativo".to_string(),
        },
        LanguageEntry {
            language: "Inglés".to_string(),
            level: "C1".to_string(),
        },
    ];
    doc.complementary = vec![
        ComplementaryEntry {
            title: "AWS Solutions Architect".to_string(),
            institution: "Amazon Web Services".to_string(),
            start_date: "2022-05".to_string(),
            end_date: None,
            is_current: false,
            kind: "Certificación".to_string(),
        },
        ComplementaryEntry {
            title: "Máster en IA".to_string(),
            institution: "UNED".to_string(),
            start_date: "2023-10".to_string(),
            end_date: None,
            is_current: true,
            kind: "Posgrado".to_string(),
        },
        ComplementaryEntry {
            title: "Voluntariado".to_string(),
            institution: "Cruz Roja".to_string(),
            start_date: "2019-01".to_string(),
            end_date: Some("2019-12".to_string()),
            is_current: false,
            kind: "Voluntariado".to_string(),
        },
    ];
    doc
}
