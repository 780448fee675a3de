//! Register a new account.

use super::rejected;
use crate::domain::{DomainError, ValidationError};
use crate::ports::RecipeRepository;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::info;

pub const MIN_SIGN_UP_PASSWORD_CHARS: usize = 8;

/// Sign-up email pattern, anchored to the whole string.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$").unwrap()
});

pub struct SignUpUseCase {
    repo: Arc<dyn RecipeRepository>,
}

impl SignUpUseCase {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, email: &str, password: &str) -> Result<(), DomainError> {
        validate(email, password).map_err(|e| rejected("sign_up", e))?;
        self.repo.sign_up(email, password).await?;
        info!("account registered");
        Ok(())
    }
}

/// Full-string match against the sign-up email pattern.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Email presence, then password, then email format.
pub fn validate(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    // Counts Unicode scalar values, not grapheme clusters.
    if password.chars().count() < MIN_SIGN_UP_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmailFormat);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::FakeRepository;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("cook@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co"));
        assert!(!is_valid_email("cook@example"));
        assert!(!is_valid_email("cook example.com"));
        assert!(!is_valid_email(" cook@example.com"));
        assert!(!is_valid_email("cook@example.c"));
    }

    #[test]
    fn test_password_checked_before_email_format() {
        assert_eq!(validate("", ""), Err(ValidationError::EmailRequired));
        assert_eq!(validate("not-an-email", ""), Err(ValidationError::PasswordRequired));
        assert_eq!(validate("not-an-email", "1234567"), Err(ValidationError::PasswordTooShort));
        assert_eq!(validate("not-an-email", "12345678"), Err(ValidationError::InvalidEmailFormat));
        assert_eq!(validate("a@b.co", "12345678"), Ok(()));
    }

    #[tokio::test]
    async fn test_valid_request_reaches_repository() {
        let repo = Arc::new(FakeRepository::new());
        let use_case = SignUpUseCase::new(repo.clone());

        use_case.execute("a@b.co", "password1").await.unwrap();
        let err = use_case.execute("a@b.co", "short").await.unwrap_err();
        assert_eq!(err, DomainError::Validation(ValidationError::PasswordTooShort));
        assert_eq!(repo.calls(), ["sign_up:a@b.co"]);
    }
}
