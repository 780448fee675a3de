//! Sign in with email and password.

use super::rejected;
use crate::domain::{AuthUser, DomainError, ValidationError};
use crate::ports::RecipeRepository;
use std::sync::Arc;
use tracing::info;

pub const MIN_SIGN_IN_PASSWORD_CHARS: usize = 6;

pub struct SignInUseCase {
    repo: Arc<dyn RecipeRepository>,
}

impl SignInUseCase {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, email: &str, password: &str) -> Result<AuthUser, DomainError> {
        validate(email, password).map_err(|e| rejected("sign_in", e))?;
        let user = self.repo.sign_in(email, password).await?;
        info!(user_id = %user.user_id, "signed in");
        Ok(user)
    }
}

/// Loose shape check only: the trimmed email must contain `@` and `.`.
pub fn validate(email: &str, password: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if !(email.contains('@') && email.contains('.')) {
        return Err(ValidationError::InvalidEmailFormat);
    }
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    // Counts Unicode scalar values, not grapheme clusters.
    if password.chars().count() < MIN_SIGN_IN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}
