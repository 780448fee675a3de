//! Wire DTOs for the recipe backend and their mapping to domain entities.
//!
//! Mapping is total: it never validates and never fails. Dates are RFC 3339
//! strings; unparsable optional dates become `None`.

use crate::domain::{
    AuthUser, CreateRecipeRequest, Ingredient, IngredientGroup, RecipeDetail, RecipeSummary,
    UpdateRecipeRequest,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Strict RFC 3339 parse. Anything else yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDto {
    pub id: String,
    pub ingredient_name: String,
    #[serde(default)]
    pub amount: Option<String>,
    pub order_num: i32,
}

impl IngredientDto {
    pub fn into_domain(self) -> Ingredient {
        Ingredient {
            id: self.id,
            ingredient_name: self.ingredient_name,
            amount: self.amount,
            order_num: self.order_num,
        }
    }
}

impl From<&Ingredient> for IngredientDto {
    fn from(i: &Ingredient) -> Self {
        Self {
            id: i.id.clone(),
            ingredient_name: i.ingredient_name.clone(),
            amount: i.amount.clone(),
            order_num: i.order_num,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientGroupDto {
    pub group_id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub order_num: i32,
    #[serde(default)]
    pub ingredients: Option<Vec<IngredientDto>>,
}

impl IngredientGroupDto {
    pub fn into_domain(self) -> IngredientGroup {
        IngredientGroup {
            group_id: self.group_id,
            title: self.title,
            order_num: self.order_num,
            ingredients: self
                .ingredients
                .unwrap_or_default()
                .into_iter()
                .map(IngredientDto::into_domain)
                .collect(),
        }
    }
}

impl From<&IngredientGroup> for IngredientGroupDto {
    fn from(g: &IngredientGroup) -> Self {
        Self {
            group_id: g.group_id.clone(),
            title: g.title.clone(),
            order_num: g.order_num,
            ingredients: Some(g.ingredients.iter().map(IngredientDto::from).collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetailDto {
    pub recipe_id: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_cooked_at: Option<String>,
    #[serde(default)]
    pub ingredient_groups: Option<Vec<IngredientGroupDto>>,
}

impl RecipeDetailDto {
    pub fn into_domain(self) -> RecipeDetail {
        RecipeDetail {
            recipe_id: self.recipe_id,
            title: self.title,
            thumbnail_url: self.thumbnail_url,
            media_url: self.media_url,
            ingredient_groups: self
                .ingredient_groups
                .unwrap_or_default()
                .into_iter()
                .map(IngredientGroupDto::into_domain)
                .collect(),
            memo: self.memo,
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
            last_cooked_at: self.last_cooked_at.as_deref().and_then(parse_timestamp),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummaryDto {
    pub recipe_id: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub ingredients_name: Option<Vec<String>>,
}

impl RecipeSummaryDto {
    /// Unparsable `createdAt` falls back to the current time.
    pub fn into_domain(self) -> RecipeSummary {
        self.into_domain_with_fallback(Utc::now())
    }

    pub fn into_domain_with_fallback(self, fallback: DateTime<Utc>) -> RecipeSummary {
        RecipeSummary {
            created_at: parse_timestamp(&self.created_at).unwrap_or(fallback),
            recipe_id: self.recipe_id,
            title: self.title,
            thumbnail_url: self.thumbnail_url,
            ingredients_name: self.ingredients_name.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUserDto {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub email: String,
}

impl AuthUserDto {
    pub fn into_domain(self) -> AuthUser {
        AuthUser::new(self.user_id, self.email)
    }
}

/// `{"message": "..."}` body returned by create and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponseDto {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequestDto {
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub media_url: Option<String>,
    pub memo: Option<String>,
    pub ingredient_groups: Vec<IngredientGroupDto>,
}

impl From<&CreateRecipeRequest> for CreateRecipeRequestDto {
    fn from(r: &CreateRecipeRequest) -> Self {
        Self {
            title: r.title.clone(),
            thumbnail_url: r.thumbnail_url.clone(),
            media_url: r.media_url.clone(),
            memo: r.memo.clone(),
            ingredient_groups: r.ingredient_groups.iter().map(IngredientGroupDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequestDto {
    pub recipe_id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub media_url: Option<String>,
    pub memo: Option<String>,
    pub ingredient_groups: Vec<IngredientGroupDto>,
}

impl From<&UpdateRecipeRequest> for UpdateRecipeRequestDto {
    fn from(r: &UpdateRecipeRequest) -> Self {
        Self {
            recipe_id: r.recipe_id.clone(),
            title: r.title.clone(),
            thumbnail_url: r.thumbnail_url.clone(),
            media_url: r.media_url.clone(),
            memo: r.memo.clone(),
            ingredient_groups: r.ingredient_groups.iter().map(IngredientGroupDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRecipeFromUrlRequestDto {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequestDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequestDto {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
