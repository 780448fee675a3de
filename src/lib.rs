//! repi-recipe: recipe-management client core with Hexagonal Architecture.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod presentation;
pub mod shared;
pub mod usecases;
