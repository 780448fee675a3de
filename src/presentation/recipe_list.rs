//! Home screen: the recipe list with an inline title search and delete.

use super::{ScreenStatus, error_message};
use crate::domain::{DomainError, RecipeSummary};
use crate::usecases::{DeleteRecipeUseCase, GetRecipeListUseCase, SearchRecipesUseCase};

#[derive(Debug, Clone, Default)]
pub struct RecipeListState {
    pub recipes: Vec<RecipeSummary>,
    pub search_text: String,
    pub status: ScreenStatus,
}

impl RecipeListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.status.begin();
    }

    /// Replace the list on success; keep the previous list on failure.
    pub fn apply_recipes(&mut self, result: Result<Vec<RecipeSummary>, DomainError>) {
        match result {
            Ok(recipes) => self.recipes = recipes,
            Err(err) => self.status.fail(error_message(&err)),
        }
        self.status.finish();
    }

    pub async fn load_with(&mut self, list: &GetRecipeListUseCase) {
        self.begin();
        self.apply_recipes(list.execute().await);
    }

    /// Title search on `search_text`; a blank search reloads the full list.
    pub async fn search_with(&mut self, list: &GetRecipeListUseCase, search: &SearchRecipesUseCase) {
        if !self.is_searching() {
            return self.load_with(list).await;
        }
        self.begin();
        let result = search.search_by_title(&self.search_text).await;
        self.apply_recipes(result);
    }

    pub async fn delete_with(
        &mut self,
        delete: &DeleteRecipeUseCase,
        list: &GetRecipeListUseCase,
        recipe_id: &str,
    ) {
        self.begin();
        match delete.execute(recipe_id).await {
            Ok(_) => self.apply_recipes(list.execute().await),
            Err(err) => {
                self.status.fail(error_message(&err));
                self.status.finish();
            }
        }
    }

    pub fn has_recipes(&self) -> bool {
        !self.recipes.is_empty()
    }

    pub fn is_searching(&self) -> bool {
        !self.search_text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepositoryError;
    use crate::usecases::test_support::{FakeRepository, ids, summary};
    use std::sync::Arc;

    fn recipes() -> Vec<RecipeSummary> {
        vec![
            summary("old", "Bread", 1, &[]),
            summary("new", "Banana bread", 9, &[]),
        ]
    }

    #[tokio::test]
    async fn test_load_sorts_and_clears_loading() {
        let repo = Arc::new(FakeRepository::with_recipes(recipes()));
        let mut state = RecipeListState::new();

        state.load_with(&GetRecipeListUseCase::new(repo)).await;
        assert_eq!(ids(&state.recipes), ["new", "old"]);
        assert!(state.has_recipes());
        assert!(!state.status.is_loading);
    }

    #[tokio::test]
    async fn test_blank_search_reloads() {
        let repo = Arc::new(FakeRepository::with_recipes(recipes()));
        let list = GetRecipeListUseCase::new(repo.clone());
        let search = SearchRecipesUseCase::new(repo.clone());
        let mut state = RecipeListState {
            search_text: "   ".into(),
            ..RecipeListState::default()
        };

        state.search_with(&list, &search).await;
        assert!(!state.is_searching());
        assert_eq!(repo.calls(), ["fetch_recipes"]);

        state.search_text = "bread".into();
        state.search_with(&list, &search).await;
        assert_eq!(repo.calls()[1], "search_recipes_by_title:bread");
    }

    #[tokio::test]
    async fn test_delete_then_reload() {
        let repo = Arc::new(FakeRepository::with_recipes(recipes()));
        let mut state = RecipeListState::new();

        state
            .delete_with(
                &DeleteRecipeUseCase::new(repo.clone()),
                &GetRecipeListUseCase::new(repo.clone()),
                "old",
            )
            .await;
        assert_eq!(repo.calls(), ["delete_recipe:old", "fetch_recipes"]);
        assert!(!state.status.is_loading);
    }

    #[tokio::test]
    async fn test_failure_shows_prefixed_alert() {
        let repo = Arc::new(FakeRepository::failing(RepositoryError::Timeout.into()));
        let mut state = RecipeListState {
            recipes: recipes(),
            ..RecipeListState::default()
        };

        state.load_with(&GetRecipeListUseCase::new(repo)).await;
        assert_eq!(
            state.status.error_message.as_deref(),
            Some("An error occurred: Connection timed out")
        );
        assert!(state.status.is_showing_alert);
        assert_eq!(state.recipes.len(), 2);
    }
}
