//! Update an existing recipe.

use super::{is_blank, rejected};
use crate::domain::{
    DomainError, RecipeDetail, UpdateRecipeRequest, ValidationError, validate_ingredient_names,
};
use crate::ports::RecipeRepository;
use std::sync::Arc;
use tracing::info;

pub struct UpdateRecipeUseCase {
    repo: Arc<dyn RecipeRepository>,
}

impl UpdateRecipeUseCase {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, request: &UpdateRecipeRequest) -> Result<RecipeDetail, DomainError> {
        validate(request).map_err(|e| rejected("update_recipe", e))?;
        let updated = self.repo.update_recipe(request).await?;
        info!(recipe_id = %updated.recipe_id, "recipe updated");
        Ok(updated)
    }
}

/// Recipe id, then title, then ingredient names.
pub fn validate(request: &UpdateRecipeRequest) -> Result<(), ValidationError> {
    if is_blank(&request.recipe_id) {
        return Err(ValidationError::InvalidRecipeId);
    }
    if is_blank(&request.title) {
        return Err(ValidationError::TitleRequired);
    }
    validate_ingredient_names(&request.ingredient_groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Ingredient, IngredientGroup};
    use crate::usecases::test_support::FakeRepository;

    fn request(id: &str, title: &str, names: &[&str]) -> UpdateRecipeRequest {
        UpdateRecipeRequest {
            recipe_id: id.to_string(),
            title: title.to_string(),
            thumbnail_url: None,
            media_url: None,
            memo: None,
            ingredient_groups: names
                .iter()
                .enumerate()
                .map(|(i, n)| IngredientGroup {
                    group_id: format!("g{i}"),
                    title: None,
                    order_num: i as i32 + 1,
                    ingredients: vec![Ingredient {
                        id: format!("i{i}"),
                        ingredient_name: n.to_string(),
                        amount: None,
                        order_num: 1,
                    }],
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_blank_recipe_id_checked_first() {
        let repo = Arc::new(FakeRepository::new());
        let use_case = UpdateRecipeUseCase::new(repo.clone());

        let err = use_case.execute(&request(" ", "", &[""])).await.unwrap_err();
        assert_eq!(err, DomainError::Validation(ValidationError::InvalidRecipeId));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_blank_ingredient_in_any_group_rejected() {
        let repo = Arc::new(FakeRepository::new());
        let use_case = UpdateRecipeUseCase::new(repo.clone());

        let err = use_case
            .execute(&request("r1", "Stew", &["beef", "carrot", "\t"]))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation(ValidationError::IngredientNameRequired)
        );
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_valid_update_returns_repository_result() {
        let repo = Arc::new(FakeRepository::new());
        let use_case = UpdateRecipeUseCase::new(repo.clone());

        let updated = use_case
            .execute(&request("r1", "Beef stew", &["beef"]))
            .await
            .unwrap();
        assert_eq!(updated.title, "Beef stew");
        assert_eq!(repo.calls(), ["update_recipe:r1"]);
    }
}
