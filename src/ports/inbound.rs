//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: a front end drives the presentation adapters until the user quits.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive session (sign in, browse, search, import, edit).
    async fn run(&self) -> Result<(), DomainError>;
}
