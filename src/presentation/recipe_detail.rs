//! Single recipe screen for a fixed recipe id.

use super::{ScreenStatus, error_message};
use crate::domain::{DomainError, IngredientGroup, RecipeDetail};
use crate::usecases::{DeleteRecipeUseCase, GetRecipeDetailUseCase};

#[derive(Debug, Clone)]
pub struct RecipeDetailState {
    pub recipe_id: String,
    pub recipe: Option<RecipeDetail>,
    pub is_deleting: bool,
    pub is_deleted: bool,
    pub status: ScreenStatus,
}

impl RecipeDetailState {
    pub fn new(recipe_id: impl Into<String>) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            recipe: None,
            is_deleting: false,
            is_deleted: false,
            status: ScreenStatus::default(),
        }
    }

    pub fn begin(&mut self) {
        self.status.begin();
    }

    pub fn apply_recipe(&mut self, result: Result<RecipeDetail, DomainError>) {
        match result {
            Ok(recipe) => self.recipe = Some(recipe),
            Err(err) => self.status.fail(error_message(&err)),
        }
        self.status.finish();
    }

    pub fn begin_delete(&mut self) {
        self.is_deleting = true;
        self.status.error_message = None;
    }

    pub fn apply_deleted(&mut self, result: Result<String, DomainError>) {
        match result {
            Ok(_) => self.is_deleted = true,
            Err(err) => self.status.fail(error_message(&err)),
        }
        self.is_deleting = false;
    }

    pub async fn load_with(&mut self, detail: &GetRecipeDetailUseCase) {
        self.begin();
        let result = detail.execute(&self.recipe_id).await;
        self.apply_recipe(result);
    }

    pub async fn delete_with(&mut self, delete: &DeleteRecipeUseCase) {
        self.begin_delete();
        let result = delete.execute(&self.recipe_id).await;
        self.apply_deleted(result);
    }

    pub fn has_recipe(&self) -> bool {
        self.recipe.is_some()
    }

    pub fn recipe_title(&self) -> &str {
        self.recipe.as_ref().map_or("", |r| r.title.as_str())
    }

    pub fn ingredient_groups(&self) -> &[IngredientGroup] {
        self.recipe
            .as_ref()
            .map(|r| r.ingredient_groups.as_slice())
            .unwrap_or_default()
    }
}
