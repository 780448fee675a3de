//! Presentation adapters: plain screen-state holders driven by use cases.
//!
//! Nothing here observes or renders. A host calls `begin()`, runs the use case
//! (or one of the async `*_with` helpers does it), then feeds the result to the
//! matching `apply_*` transition and reads the fields back.

pub mod auth;
pub mod recipe_detail;
pub mod recipe_editor;
pub mod recipe_import;
pub mod recipe_list;
pub mod search;

pub use auth::{AuthState, PasswordStrength, SignUpForm};
pub use recipe_detail::RecipeDetailState;
pub use recipe_editor::{EditorMode, RecipeEditorState};
pub use recipe_import::RecipeImportState;
pub use recipe_list::RecipeListState;
pub use search::SearchRecipesState;

use crate::domain::DomainError;

/// Loading and alert flags shared by every screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenStatus {
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub is_showing_alert: bool,
}

impl ScreenStatus {
    pub fn begin(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    pub fn finish(&mut self) {
        self.is_loading = false;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.is_showing_alert = true;
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
        self.is_showing_alert = false;
    }
}

/// Validation failures speak for themselves; anything else gets a generic prefix.
pub fn error_message(err: &DomainError) -> String {
    match err {
        DomainError::Validation(v) => v.to_string(),
        other => format!("An error occurred: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RepositoryError, ValidationError};

    #[test]
    fn test_error_message_prefix() {
        assert_eq!(
            error_message(&ValidationError::TitleRequired.into()),
            "A title is required"
        );
        assert_eq!(
            error_message(&RepositoryError::NotFound.into()),
            "An error occurred: Resource not found"
        );
    }

    #[test]
    fn test_status_transitions() {
        let mut status = ScreenStatus::default();
        status.fail("boom");
        status.begin();
        assert!(status.is_loading);
        assert_eq!(status.error_message, None);
        assert!(status.is_showing_alert);

        status.finish();
        status.clear_error();
        assert_eq!(status, ScreenStatus::default());
    }
}
