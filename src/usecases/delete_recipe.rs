//! Delete a recipe by id.

use super::{is_invalid_recipe_id, rejected};
use crate::domain::{DomainError, ValidationError};
use crate::ports::RecipeRepository;
use std::sync::Arc;
use tracing::info;

pub struct DeleteRecipeUseCase {
    repo: Arc<dyn RecipeRepository>,
}

impl DeleteRecipeUseCase {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    /// Returns the server's confirmation message.
    pub async fn execute(&self, recipe_id: &str) -> Result<String, DomainError> {
        if is_invalid_recipe_id(recipe_id) {
            return Err(rejected("delete_recipe", ValidationError::InvalidRecipeId));
        }
        let message = self.repo.delete_recipe(recipe_id).await?;
        info!(recipe_id, "recipe deleted");
        Ok(message)
    }
}
