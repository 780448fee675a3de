//! Local credential storage. Implements TokenStore.

pub mod memory_store;
pub mod token_json;

pub use memory_store::MemoryTokenStore;
pub use token_json::TokenJson;
