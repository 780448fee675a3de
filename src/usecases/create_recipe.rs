//! Create a recipe after checking its title and ingredient names.

use super::{is_blank, rejected};
use crate::domain::{
    CreateRecipeRequest, DomainError, ValidationError, validate_ingredient_names,
};
use crate::ports::RecipeRepository;
use std::sync::Arc;
use tracing::info;

pub struct CreateRecipeUseCase {
    repo: Arc<dyn RecipeRepository>,
}

impl CreateRecipeUseCase {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    /// Returns the server's message for the new recipe.
    pub async fn execute(&self, request: &CreateRecipeRequest) -> Result<String, DomainError> {
        validate(request).map_err(|e| rejected("create_recipe", e))?;
        let message = self.repo.create_recipe(request).await?;
        info!(
            groups = request.ingredient_groups.len(),
            "recipe created"
        );
        Ok(message)
    }
}

/// Title must be non-blank; groups may be empty, but every ingredient needs a name.
pub fn validate(request: &CreateRecipeRequest) -> Result<(), ValidationError> {
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

    fn request(title: &str, names: &[&str]) -> CreateRecipeRequest {
        CreateRecipeRequest {
            title: title.to_string(),
            thumbnail_url: None,
            media_url: None,
            memo: None,
            ingredient_groups: vec![IngredientGroup {
                group_id: "g1".into(),
                title: Some("Main".into()),
                order_num: 1,
                ingredients: names
                    .iter()
                    .enumerate()
                    .map(|(i, n)| Ingredient {
                        id: format!("i{i}"),
                        ingredient_name: n.to_string(),
                        amount: None,
                        order_num: i as i32 + 1,
                    })
                    .collect(),
            }],
        }
    }

    #[tokio::test]
    async fn test_blank_title_rejected_before_repository() {
        let repo = Arc::new(FakeRepository::new());
        let use_case = CreateRecipeUseCase::new(repo.clone());

        for title in ["", "   ", "\n\t"] {
            let err = use_case.execute(&request(title, &["egg"])).await.unwrap_err();
            assert_eq!(err, DomainError::Validation(ValidationError::TitleRequired));
        }
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_blank_ingredient_rejected_before_repository() {
        let repo = Arc::new(FakeRepository::new());
        let use_case = CreateRecipeUseCase::new(repo.clone());

        let err = use_case
            .execute(&request("Omelette", &["egg", "  "]))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation(ValidationError::IngredientNameRequired)
        );
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_title_checked_before_ingredients() {
        let use_case = CreateRecipeUseCase::new(Arc::new(FakeRepository::new()));
        let err = use_case.execute(&request(" ", &[""])).await.unwrap_err();
        assert_eq!(err, DomainError::Validation(ValidationError::TitleRequired));
    }

    #[tokio::test]
    async fn test_empty_groups_allowed() {
        let repo = Arc::new(FakeRepository::new());
        let use_case = CreateRecipeUseCase::new(repo.clone());
        let mut req = request("Toast", &[]);
        req.ingredient_groups.clear();

        assert_eq!(use_case.execute(&req).await.unwrap(), "new-recipe-id");
        assert_eq!(repo.calls(), ["create_recipe:Toast"]);
    }
}
