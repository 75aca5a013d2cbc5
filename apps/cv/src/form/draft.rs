//! Working draft: the one mutable résumé owned by the form.
//!
//! Every mutation bumps `revision`, so observers can tell two states of the
//! draft apart without diffing. `submit` validates the whole record and
//! freezes it into an immutable [`Snapshot`].
#![allow(dead_code)]

use std::ops::Deref;
use std::sync::Arc;

use tracing::debug;

use crate::errors::ValidationErrors;
use crate::form::validation::validate;
use crate::models::{
    ComplementaryEntry, EducationEntry, ExperienceEntry, LanguageEntry, ResumeDocument,
    SkillGroup,
};

/// Immutable, validated copy of a draft. Cheap to clone and share between
/// the preview and the exporters.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot(Arc<ResumeDocument>);

impl Snapshot {
    pub fn document(&self) -> &ResumeDocument {
        &self.0
    }
}

impl Deref for Snapshot {
    type Target = ResumeDocument;

    fn deref(&self) -> &ResumeDocument {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct ResumeDraft {
    doc: ResumeDocument,
    revision: u64,
}

impl Default for ResumeDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeDraft {
    pub fn new() -> Self {
        Self::from_document(ResumeDocument::blank())
    }

    /// Starts a draft from an existing document (an imported file or the
    /// snapshot being re-edited).
    pub fn from_document(doc: ResumeDocument) -> Self {
        Self { doc, revision: 0 }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.doc
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies a field-level edit.
    pub fn edit(&mut self, f: impl FnOnce(&mut ResumeDocument)) {
        f(&mut self.doc);
        self.revision += 1;
    }

    // ── Row operations ──────────────────────────────────────────────────────

    pub fn push_education(&mut self, entry: EducationEntry) {
        self.edit(|doc| doc.education.push(entry));
    }

    pub fn remove_education(&mut self, index: usize) -> Option<EducationEntry> {
        let removed = remove_at(&mut self.doc.education, index);
        self.bump_if(removed.is_some());
        removed
    }

    pub fn push_experience(&mut self, entry: ExperienceEntry) {
        self.edit(|doc| doc.experience.push(entry));
    }

    pub fn remove_experience(&mut self, index: usize) -> Option<ExperienceEntry> {
        let removed = remove_at(&mut self.doc.experience, index);
        self.bump_if(removed.is_some());
        removed
    }

    pub fn push_skill_group(&mut self, group: SkillGroup) {
        self.edit(|doc| doc.skills.push(group));
    }

    pub fn remove_skill_group(&mut self, index: usize) -> Option<SkillGroup> {
        let removed = remove_at(&mut self.doc.skills, index);
        self.bump_if(removed.is_some());
        removed
    }

    pub fn push_language(&mut self, entry: LanguageEntry) {
        self.edit(|doc| doc.languages.push(entry));
    }

    pub fn remove_language(&mut self, index: usize) -> Option<LanguageEntry> {
        let removed = remove_at(&mut self.doc.languages, index);
        self.bump_if(removed.is_some());
        removed
    }

    pub fn push_complementary(&mut self, entry: ComplementaryEntry) {
        self.edit(|doc| doc.complementary.push(entry));
    }

    pub fn remove_complementary(&mut self, index: usize) -> Option<ComplementaryEntry> {
        let removed = remove_at(&mut self.doc.complementary, index);
        self.bump_if(removed.is_some());
        removed
    }

    /// Sets the skill items from a comma-separated input line.
    pub fn set_skill_items(&mut self, index: usize, input: &str) -> bool {
        let Some(group) = self.doc.skills.get_mut(index) else {
            return false;
        };
        group.items = input.split(',').map(str::to_string).collect();
        self.revision += 1;
        true
    }

    // ── isCurrent toggles ───────────────────────────────────────────────────

    /// Marks an experience as the current position. Checking the box clears
    /// the end date. Returns false when the index is out of range.
    pub fn set_experience_current(&mut self, index: usize, current: bool) -> bool {
        let Some(entry) = self.doc.experience.get_mut(index) else {
            return false;
        };
        entry.is_current = current;
        if current {
            entry.end_date = Some(String::new());
        }
        self.revision += 1;
        true
    }

    pub fn set_complementary_current(&mut self, index: usize, current: bool) -> bool {
        let Some(entry) = self.doc.complementary.get_mut(index) else {
            return false;
        };
        entry.is_current = current;
        if current {
            entry.end_date = None;
        }
        self.revision += 1;
        true
    }

    // ── Submit ──────────────────────────────────────────────────────────────

    /// Validates the draft and freezes it. The draft itself is left as is so
    /// the user can keep editing after a failed submit.
    pub fn submit(&self) -> Result<Snapshot, ValidationErrors> {
        validate(&self.doc)?;
        let mut doc = self.doc.clone();
        clear_current_end_dates(&mut doc);
        debug!(revision = self.revision, "Draft submitted");
        Ok(Snapshot(Arc::new(doc)))
    }

    fn bump_if(&mut self, changed: bool) {
        if changed {
            self.revision += 1;
        }
    }
}

/// Drops end dates that `isCurrent` makes meaningless.
fn clear_current_end_dates(doc: &mut ResumeDocument) {
    for entry in doc.experience.iter_mut().filter(|e| e.is_current) {
        entry.end_date = None;
    }
    for entry in doc.complementary.iter_mut().filter(|e| e.is_current) {
        entry.end_date = None;
    }
}

fn remove_at<T>(rows: &mut Vec<T>, index: usize) -> Option<T> {
    (index < rows.len()).then(|| rows.remove(index))
}
