//! Repository adapter. Implements RecipeRepository over the API data source.

pub mod recipe_repository;

pub use recipe_repository::{RecipeRepositoryImpl, RepositoryOptions};
