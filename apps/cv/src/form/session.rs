#![allow(dead_code)]

use tracing::info;

use crate::errors::{AppError, ValidationErrors};
use crate::form::draft::{ResumeDraft, Snapshot};
use crate::serializer;

/// Which side of the app the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Form,
    Preview,
}

/// One editing session: the working draft, the last submitted snapshot, and
/// the current view. Failed operations leave all three untouched.
#[derive(Debug, Clone)]
pub struct Session {
    draft: ResumeDraft,
    snapshot: Option<Snapshot>,
    view: View,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            draft: ResumeDraft::new(),
            snapshot: None,
            view: View::Form,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn draft(&self) -> &ResumeDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ResumeDraft {
        &mut self.draft
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Validates the draft; on success replaces the snapshot and shows the preview.
    pub fn submit(&mut self) -> Result<&Snapshot, ValidationErrors> {
        let snapshot = self.draft.submit()?;
        self.view = View::Preview;
        Ok(self.snapshot.insert(snapshot))
    }

    /// Goes back to the form, editing a fresh draft of the current snapshot.
    pub fn edit(&mut self) {
        if let Some(snapshot) = &self.snapshot {
            self.draft = ResumeDraft::from_document(snapshot.document().clone());
        }
        self.view = View::Form;
    }

    /// Replaces the whole session with an imported document and shows it.
    pub fn import(&mut self, text: &str) -> Result<&Snapshot, AppError> {
        let doc = serializer::deserialize(text)?;
        let draft = ResumeDraft::from_document(doc);
        let snapshot = draft
            .submit()
            .map_err(|e| AppError::Schema(e.to_string()))?;
        info!("Imported document replaced the working draft");
        self.draft = draft;
        self.view = View::Preview;
        Ok(self.snapshot.insert(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::make_valid_document;

    #[test]
    fn test_new_session_starts_on_form() {
        let session = Session::new();
        assert_eq!(session.view(), View::Form);
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn test_failed_submit_stays_on_form() {
        let mut session = Session::new();
        assert!(session.submit().is_err());
        assert_eq!(session.view(), View::Form);
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn test_submit_then_edit_round_trip() {
        let mut session = Session::new();
        session
            .draft_mut()
            .edit(|doc| *doc = make_valid_document());
        session.submit().unwrap();
        assert_eq!(session.view(), View::Preview);

        session.edit();
        assert_eq!(session.view(), View::Form);
        assert_eq!(session.draft().document(), &make_valid_document());
        assert_eq!(session.draft().revision(), 0);
    }

    #[test]
    fn test_import_replaces_document_and_shows_preview() {
        let mut session = Session::new();
        let text = serializer::serialize(&make_valid_document()).unwrap();
        let snapshot = session.import(&text).unwrap();
        assert_eq!(snapshot.personal_info.name, "Ana Ruiz");
        assert_eq!(session.view(), View::Preview);
    }

    #[test]
    fn test_failed_import_leaves_session_unchanged() {
        let mut session = Session::new();
        session.draft_mut().edit(|doc| doc.profile = "borrador".to_string());

        let err = session.import("{ not json").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));

        let err = session.import(r#"{"profile": 3}"#).unwrap_err();
        assert!(matches!(err, AppError::Schema(_)));

        assert_eq!(session.view(), View::Form);
        assert_eq!(session.draft().document().profile, "borrador");
        assert!(session.snapshot().is_none());
    }
}
