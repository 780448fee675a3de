//! Dedicated search screen: title or ingredient search with friendlier errors.

use super::ScreenStatus;
use crate::domain::{DomainError, RecipeSummary, RepositoryError};
use crate::usecases::SearchRecipesUseCase;

#[derive(Debug, Clone, Default)]
pub struct SearchRecipesState {
    pub results: Vec<RecipeSummary>,
    pub status: ScreenStatus,
}

impl SearchRecipesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` (and changes nothing) while a search is already running.
    pub fn begin(&mut self) -> bool {
        if self.status.is_loading {
            return false;
        }
        self.status.begin();
        self.status.clear_error();
        true
    }

    pub fn apply_results(&mut self, result: Result<Vec<RecipeSummary>, DomainError>) {
        match result {
            Ok(results) => self.results = results,
            Err(err) => self.status.fail(search_error_message(&err)),
        }
        self.status.finish();
    }

    pub async fn search_by_title_with(&mut self, search: &SearchRecipesUseCase, title: &str) {
        if self.begin() {
            self.apply_results(search.search_by_title(title).await);
        }
    }

    pub async fn search_by_ingredient_with(
        &mut self,
        search: &SearchRecipesUseCase,
        ingredient: &str,
    ) {
        if self.begin() {
            self.apply_results(search.search_by_ingredient(ingredient).await);
        }
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
        self.status.clear_error();
    }
}

pub fn search_error_message(err: &DomainError) -> String {
    match err {
        DomainError::Validation(v) => v.to_string(),
        DomainError::Repository(repo) => match repo {
            RepositoryError::Network(_) | RepositoryError::Timeout => {
                "A network error occurred".to_string()
            }
            RepositoryError::Server(_) => "A server error occurred".to_string(),
            RepositoryError::NotFound => "No matching recipes were found".to_string(),
            RepositoryError::Unauthorized => "Authentication is required".to_string(),
            _ => "Something went wrong while searching".to_string(),
        },
        other => format!("An unexpected error occurred: {other}"),
    }
}
