//! Sign out and drop cached credentials.

use crate::domain::DomainError;
use crate::ports::RecipeRepository;
use std::sync::Arc;
use tracing::info;

pub struct SignOutUseCase {
    repo: Arc<dyn RecipeRepository>,
}

impl SignOutUseCase {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> Result<(), DomainError> {
        self.repo.sign_out().await?;
        info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthError;
    use crate::usecases::test_support::FakeRepository;

    #[tokio::test]
    async fn test_delegates_to_repository() {
        let repo = Arc::new(FakeRepository::new());
        SignOutUseCase::new(repo.clone()).execute().await.unwrap();
        assert_eq!(repo.calls(), ["sign_out"]);
    }

    #[tokio::test]
    async fn test_storage_failure_forwarded() {
        let failure = DomainError::Auth(AuthError::Storage("disk full".into()));
        let repo = Arc::new(FakeRepository::failing(failure.clone()));
        let err = SignOutUseCase::new(repo).execute().await.unwrap_err();
        assert_eq!(err, failure);
    }
}
