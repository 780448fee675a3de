//! Cross-cutting concerns shared by the binary and the library.

pub mod config;
