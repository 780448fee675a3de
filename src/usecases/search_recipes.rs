//! Search recipes by title or ingredient and rank the server's results.
//!
//! Ranking is a stable multi-key sort, not a relevance score:
//! - title search: title contains the query first, then newest first
//! - ingredient search: any ingredient contains the query first, then more
//!   matching ingredients, then newest first
//!
//! Containment is case-insensitive (Unicode lowercase on both sides).

use super::rejected;
use crate::domain::{DomainError, RecipeSummary, ValidationError};
use crate::ports::RecipeRepository;
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::info;

/// Minimum trimmed length of a title query, in characters.
pub const MIN_TITLE_QUERY_CHARS: usize = 2;
/// Minimum trimmed length of an ingredient query, in characters.
pub const MIN_INGREDIENT_QUERY_CHARS: usize = 1;

pub struct SearchRecipesUseCase {
    repo: Arc<dyn RecipeRepository>,
}

impl SearchRecipesUseCase {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    pub async fn search_by_title(&self, query: &str) -> Result<Vec<RecipeSummary>, DomainError> {
        let query = validate_query(query, MIN_TITLE_QUERY_CHARS)
            .map_err(|e| rejected("search_by_title", e))?;
        let recipes = self.repo.search_recipes_by_title(query).await?;
        let ranked = rank_by_title(recipes, query);
        info!(results = ranked.len(), "title search complete");
        Ok(ranked)
    }

    pub async fn search_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RecipeSummary>, DomainError> {
        let query = validate_query(ingredient, MIN_INGREDIENT_QUERY_CHARS)
            .map_err(|e| rejected("search_by_ingredient", e))?;
        let recipes = self.repo.search_recipes_by_ingredient(query).await?;
        let ranked = rank_by_ingredient(recipes, query);
        info!(results = ranked.len(), "ingredient search complete");
        Ok(ranked)
    }

    #[deprecated(note = "use search_by_title or search_by_ingredient")]
    pub async fn execute(&self, query: &str) -> Result<Vec<RecipeSummary>, DomainError> {
        self.search_by_title(query).await
    }
}

/// Trim, then reject empty or too-short queries.
pub fn validate_query(query: &str, min_chars: usize) -> Result<&str, ValidationError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }
    if trimmed.chars().count() < min_chars {
        return Err(ValidationError::SearchQueryTooShort);
    }
    Ok(trimmed)
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub fn rank_by_title(recipes: Vec<RecipeSummary>, query: &str) -> Vec<RecipeSummary> {
    let needle = query.to_lowercase();
    let mut keyed: Vec<_> = recipes
        .into_iter()
        .map(|r| {
            let key = (
                Reverse(contains_ignore_case(&r.title, &needle)),
                Reverse(r.created_at),
            );
            (key, r)
        })
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, r)| r).collect()
}

pub fn rank_by_ingredient(recipes: Vec<RecipeSummary>, query: &str) -> Vec<RecipeSummary> {
    let needle = query.to_lowercase();
    let mut keyed: Vec<_> = recipes
        .into_iter()
        .map(|r| {
            let matches = r
                .ingredients_name
                .iter()
                .filter(|name| contains_ignore_case(name, &needle))
                .count();
            let key = (Reverse(matches > 0), Reverse(matches), Reverse(r.created_at));
            (key, r)
        })
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, r)| r).collect()
}
