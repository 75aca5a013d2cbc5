pub mod resume;

pub use resume::{
    ComplementaryEntry, EducationEntry, ExperienceEntry, LanguageEntry, PersonalInfo,
    ResumeDocument, SkillGroup,
};
