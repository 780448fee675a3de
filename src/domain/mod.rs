//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{
    AuthUser, CreateRecipeRequest, Ingredient, IngredientGroup, RecipeDetail, RecipeSummary,
    UpdateRecipeRequest, validate_ingredient_names,
};
pub use errors::{AuthError, DomainError, RepositoryError, ValidationError};
