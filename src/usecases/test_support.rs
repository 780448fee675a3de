//! Scripted in-memory repository for use case and presentation tests.

use crate::domain::{
    AuthUser, CreateRecipeRequest, DomainError, RecipeDetail, RecipeSummary, UpdateRecipeRequest,
};
use crate::ports::RecipeRepository;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeRepository {
    pub calls: Mutex<Vec<String>>,
    pub recipes: Vec<RecipeSummary>,
    pub detail: Option<RecipeDetail>,
    pub current_user: Option<AuthUser>,
    /// When set, every repository call fails with this error.
    pub failure: Option<DomainError>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipes(recipes: Vec<RecipeSummary>) -> Self {
        Self {
            recipes,
            ..Self::default()
        }
    }

    pub fn with_detail(detail: RecipeDetail) -> Self {
        Self {
            detail: Some(detail),
            ..Self::default()
        }
    }

    pub fn failing(err: DomainError) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) -> Result<(), DomainError> {
        self.calls.lock().unwrap().push(call.into());
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn detail_or_default(&self, id: &str) -> RecipeDetail {
        self.detail.clone().unwrap_or_else(|| detail(id, "Recipe"))
    }
}

#[async_trait::async_trait]
impl RecipeRepository for FakeRepository {
    async fn fetch_recipes(&self) -> Result<Vec<RecipeSummary>, DomainError> {
        self.record("fetch_recipes")?;
        Ok(self.recipes.clone())
    }

    async fn fetch_recipe_detail(&self, recipe_id: &str) -> Result<RecipeDetail, DomainError> {
        self.record(format!("fetch_recipe_detail:{recipe_id}"))?;
        Ok(self.detail_or_default(recipe_id))
    }

    async fn create_recipe(&self, request: &CreateRecipeRequest) -> Result<String, DomainError> {
        self.record(format!("create_recipe:{}", request.title))?;
        Ok("new-recipe-id".to_string())
    }

    async fn update_recipe(
        &self,
        request: &UpdateRecipeRequest,
    ) -> Result<RecipeDetail, DomainError> {
        self.record(format!("update_recipe:{}", request.recipe_id))?;
        let mut updated = self.detail_or_default(&request.recipe_id);
        updated.title = request.title.clone();
        updated.ingredient_groups = request.ingredient_groups.clone();
        Ok(updated)
    }

    async fn delete_recipe(&self, recipe_id: &str) -> Result<String, DomainError> {
        self.record(format!("delete_recipe:{recipe_id}"))?;
        Ok("recipe deleted successfully".to_string())
    }

    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipeSummary>, DomainError> {
        self.record(format!("search_recipes:{query}"))?;
        Ok(self.recipes.clone())
    }

    async fn search_recipes_by_title(
        &self,
        title: &str,
    ) -> Result<Vec<RecipeSummary>, DomainError> {
        self.record(format!("search_recipes_by_title:{title}"))?;
        Ok(self.recipes.clone())
    }

    async fn search_recipes_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RecipeSummary>, DomainError> {
        self.record(format!("search_recipes_by_ingredient:{ingredient}"))?;
        Ok(self.recipes.clone())
    }

    async fn fetch_recipe_from_url(&self, url: &str) -> Result<RecipeDetail, DomainError> {
        self.record(format!("fetch_recipe_from_url:{url}"))?;
        Ok(self.detail_or_default("imported"))
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<AuthUser, DomainError> {
        self.record(format!("sign_in:{email}"))?;
        Ok(AuthUser::new("user-1", email))
    }

    async fn sign_up(&self, email: &str, _password: &str) -> Result<(), DomainError> {
        self.record(format!("sign_up:{email}"))
    }

    async fn sign_out(&self) -> Result<(), DomainError> {
        self.record("sign_out")
    }

    async fn get_current_user(&self) -> Result<Option<AuthUser>, DomainError> {
        self.record("get_current_user")?;
        Ok(self.current_user.clone())
    }

    async fn delete_account(&self) -> Result<(), DomainError> {
        self.record("delete_account")
    }
}

pub fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
}

pub fn summary(id: &str, title: &str, day: u32, ingredients: &[&str]) -> RecipeSummary {
    RecipeSummary {
        recipe_id: id.to_string(),
        title: title.to_string(),
        thumbnail_url: None,
        created_at: at(day),
        ingredients_name: ingredients.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn detail(id: &str, title: &str) -> RecipeDetail {
    RecipeDetail {
        recipe_id: id.to_string(),
        title: title.to_string(),
        thumbnail_url: None,
        media_url: None,
        ingredient_groups: Vec::new(),
        memo: None,
        created_at: None,
        last_cooked_at: None,
    }
}

pub fn ids(recipes: &[RecipeSummary]) -> Vec<&str> {
    recipes.iter().map(|r| r.recipe_id.as_str()).collect()
}
