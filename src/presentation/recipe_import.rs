//! Import a recipe from a web page, then hand it to the editor.

use super::{RecipeEditorState, ScreenStatus, error_message};
use crate::domain::{DomainError, RecipeDetail};
use crate::usecases::FetchRecipeFromUrlUseCase;

#[derive(Debug, Clone, Default)]
pub struct RecipeImportState {
    pub url: String,
    pub recipe: Option<RecipeDetail>,
    pub status: ScreenStatus,
}

impl RecipeImportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.recipe = None;
        self.status.begin();
    }

    pub fn apply_recipe(&mut self, result: Result<RecipeDetail, DomainError>) {
        match result {
            Ok(recipe) => self.recipe = Some(recipe),
            Err(err) => self.status.fail(error_message(&err)),
        }
        self.status.finish();
    }

    pub async fn import_with(&mut self, fetch: &FetchRecipeFromUrlUseCase) {
        self.begin();
        let result = fetch.execute(&self.url).await;
        self.apply_recipe(result);
    }

    /// Create-mode editor prefilled with the imported recipe.
    pub fn to_editor(&self) -> Option<RecipeEditorState> {
        self.recipe.as_ref().map(RecipeEditorState::from_import)
    }
}
