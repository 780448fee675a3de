//! Infrastructure adapters. Implement outbound ports and drive the inbound one.
//!
//! REST transport, token cache, repository, terminal UI. Map errors to DomainError.

pub mod api;
pub mod persistence;
pub mod repository;
pub mod ui;
