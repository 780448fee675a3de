//! Delete the signed-in account along with its server-side recipes.

use super::rejected;
use crate::domain::{DomainError, ValidationError};
use crate::ports::RecipeRepository;
use std::sync::Arc;
use tracing::info;

pub struct DeleteAccountUseCase {
    repo: Arc<dyn RecipeRepository>,
}

impl DeleteAccountUseCase {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> Result<(), DomainError> {
        let Some(user) = self.repo.get_current_user().await? else {
            return Err(rejected("delete_account", ValidationError::UserNotSignedIn));
        };
        self.repo.delete_account().await?;
        info!(user_id = %user.user_id, "account deleted");
        Ok(())
    }
}
