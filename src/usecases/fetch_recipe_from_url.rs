//! Import a recipe from an external page (blog, video, social post) via the backend scraper.

use super::rejected;
use crate::domain::{DomainError, RecipeDetail, ValidationError};
use crate::ports::RecipeRepository;
use std::sync::Arc;
use tracing::info;

pub struct FetchRecipeFromUrlUseCase {
    repo: Arc<dyn RecipeRepository>,
}

impl FetchRecipeFromUrlUseCase {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, url: &str) -> Result<RecipeDetail, DomainError> {
        let url = validate_url(url).map_err(|e| rejected("fetch_recipe_from_url", e))?;
        let recipe = self.repo.fetch_recipe_from_url(url).await?;
        info!(recipe_id = %recipe.recipe_id, "recipe imported from url");
        Ok(recipe)
    }
}

/// Trimmed URL with an http(s) scheme.
pub fn validate_url(url: &str) -> Result<&str, ValidationError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ValidationError::InvalidUrlFormat);
    }
    Ok(trimmed)
}
