//! List all recipes, newest first.

use crate::domain::{DomainError, RecipeSummary};
use crate::ports::RecipeRepository;
use std::sync::Arc;
use tracing::info;

pub struct GetRecipeListUseCase {
    repo: Arc<dyn RecipeRepository>,
}

impl GetRecipeListUseCase {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> Result<Vec<RecipeSummary>, DomainError> {
        let mut recipes = self.repo.fetch_recipes().await?;
        sort_newest_first(&mut recipes);
        info!(count = recipes.len(), "recipe list loaded");
        Ok(recipes)
    }
}

/// Stable sort by `created_at` descending.
pub fn sort_newest_first(recipes: &mut [RecipeSummary]) {
    recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{FakeRepository, ids, summary};

    #[tokio::test]
    async fn test_sorted_newest_first() {
        let repo = Arc::new(FakeRepository::with_recipes(vec![
            summary("old", "Bread", 1, &[]),
            summary("new", "Cake", 9, &[]),
            summary("mid", "Soup", 5, &[]),
        ]));
        let recipes = GetRecipeListUseCase::new(repo).execute().await.unwrap();

        assert_eq!(ids(&recipes), ["new", "mid", "old"]);
        assert!(recipes.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn test_ties_keep_server_order() {
        let mut recipes = vec![
            summary("a", "A", 3, &[]),
            summary("b", "B", 3, &[]),
            summary("c", "C", 4, &[]),
        ];
        sort_newest_first(&mut recipes);
        assert_eq!(ids(&recipes), ["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_repository_error_forwarded() {
        let repo = Arc::new(FakeRepository::failing(DomainError::Unknown("boom".into())));
        let err = GetRecipeListUseCase::new(repo).execute().await.unwrap_err();
        assert_eq!(err, DomainError::Unknown("boom".into()));
    }
}
