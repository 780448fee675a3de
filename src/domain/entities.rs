//! Domain entities. Pure value records for the recipe core.
//!
//! No wire/IO types here: DTOs are mapped into these by the API adapter.
//! Entities are never mutated in place; "updates" return a new value.

use super::errors::ValidationError;
use chrono::{DateTime, Utc};

/// Placeholder shown for an ingredient group without a title.
pub const DEFAULT_GROUP_TITLE: &str = "Ingredients";

/// Placeholder shown for a recipe without a title.
pub const UNTITLED_RECIPE: &str = "Untitled recipe";

/// Signed-in account. Identity is `user_id` alone.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
}

impl AuthUser {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
        }
    }

    /// Local part of the email (before `@`).
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

impl PartialEq for AuthUser {
    fn eq(&self, other: &Self) -> bool {
        self.user_id == other.user_id
    }
}

impl Eq for AuthUser {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: String,
    pub ingredient_name: String,
    pub amount: Option<String>,
    pub order_num: i32,
}

impl Ingredient {
    pub fn is_valid(&self) -> bool {
        !self.ingredient_name.trim().is_empty()
    }

    pub fn display_amount(&self) -> &str {
        self.amount.as_deref().unwrap_or("")
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationError::IngredientNameRequired)
        }
    }

    pub fn update_amount(&self, amount: Option<String>) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}

/// Ordered group of ingredients inside a recipe (e.g. "Sauce", "Dough").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientGroup {
    pub group_id: String,
    pub title: Option<String>,
    pub order_num: i32,
    pub ingredients: Vec<Ingredient>,
}

impl IngredientGroup {
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_GROUP_TITLE,
        }
    }

    pub fn has_ingredients(&self) -> bool {
        !self.ingredients.is_empty()
    }

    pub fn valid_ingredients(&self) -> Vec<&Ingredient> {
        self.ingredients.iter().filter(|i| i.is_valid()).collect()
    }
}

/// Full recipe as returned by the detail, update and URL-import endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetail {
    pub recipe_id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub media_url: Option<String>,
    pub ingredient_groups: Vec<IngredientGroup>,
    pub memo: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_cooked_at: Option<DateTime<Utc>>,
}

impl RecipeDetail {
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty()
    }

    pub fn has_ingredients(&self) -> bool {
        self.ingredient_groups.iter().any(IngredientGroup::has_ingredients)
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED_RECIPE
        } else {
            &self.title
        }
    }

    /// Title first, then every ingredient across all groups.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_valid() {
            return Err(ValidationError::TitleRequired);
        }
        validate_ingredient_names(&self.ingredient_groups)
    }

    pub fn mark_as_cooked(&self, at: DateTime<Utc>) -> Self {
        Self {
            last_cooked_at: Some(at),
            ..self.clone()
        }
    }

    pub fn update_memo(&self, memo: Option<String>) -> Self {
        Self {
            memo,
            ..self.clone()
        }
    }
}

/// List/search row. `created_at` is always present (see the DTO mapping).
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSummary {
    pub recipe_id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub ingredients_name: Vec<String>,
}

impl RecipeSummary {
    pub fn has_ingredients(&self) -> bool {
        !self.ingredients_name.is_empty()
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED_RECIPE
        } else {
            &self.title
        }
    }
}

/// Command for `POST /recipes`. The server assigns id, `created_at` and `last_cooked_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub media_url: Option<String>,
    pub memo: Option<String>,
    pub ingredient_groups: Vec<IngredientGroup>,
}

/// Command for `PUT /recipes`. `recipe_id` selects the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecipeRequest {
    pub recipe_id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub media_url: Option<String>,
    pub memo: Option<String>,
    pub ingredient_groups: Vec<IngredientGroup>,
}

/// Fails on the first ingredient whose trimmed name is empty, in group order.
pub fn validate_ingredient_names(groups: &[IngredientGroup]) -> Result<(), ValidationError> {
    groups
        .iter()
        .flat_map(|g| g.ingredients.iter())
        .try_for_each(Ingredient::validate)
}
