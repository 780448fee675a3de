//! Load a single recipe.

use super::{is_invalid_recipe_id, rejected};
use crate::domain::{DomainError, RecipeDetail, ValidationError};
use crate::ports::RecipeRepository;
use std::sync::Arc;

pub struct GetRecipeDetailUseCase {
    repo: Arc<dyn RecipeRepository>,
}

impl GetRecipeDetailUseCase {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, recipe_id: &str) -> Result<RecipeDetail, DomainError> {
        if is_invalid_recipe_id(recipe_id) {
            return Err(rejected("get_recipe_detail", ValidationError::InvalidRecipeId));
        }
        self.repo.fetch_recipe_detail(recipe_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{FakeRepository, detail};

    #[tokio::test]
    async fn test_blank_id_rejected() {
        let repo = Arc::new(FakeRepository::new());
        let use_case = GetRecipeDetailUseCase::new(repo.clone());

        let err = use_case.execute("").await.unwrap_err();
        assert_eq!(err, DomainError::Validation(ValidationError::InvalidRecipeId));
        let err = use_case.execute("..").await.unwrap_err();
        assert_eq!(err, DomainError::Validation(ValidationError::InvalidRecipeId));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_detail_returned() {
        let repo = Arc::new(FakeRepository::with_detail(detail("r1", "Ramen")));
        let use_case = GetRecipeDetailUseCase::new(repo.clone());

        let recipe = use_case.execute("r1").await.unwrap();
        assert_eq!(recipe.title, "Ramen");
        assert_eq!(repo.calls(), ["fetch_recipe_detail:r1"]);
    }
}
