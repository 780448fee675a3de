//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into `RepositoryError`; use cases raise
//! `ValidationError`; `DomainError` is what callers see.

use thiserror::Error;

/// Business-rule failures. Always detected locally, never retried.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("A title is required")]
    TitleRequired,

    #[error("Every ingredient needs a name")]
    IngredientNameRequired,

    #[error("An email address is required")]
    EmailRequired,

    #[error("A password is required")]
    PasswordRequired,

    #[error("The password is too short")]
    PasswordTooShort,

    #[error("Enter a valid email address")]
    InvalidEmailFormat,

    #[error("Enter a search keyword")]
    EmptyQuery,

    #[error("The search keyword is too short")]
    SearchQueryTooShort,

    #[error("Invalid recipe ID")]
    InvalidRecipeId,

    #[error("No user is signed in")]
    UserNotSignedIn,

    #[error("The URL is empty")]
    EmptyUrl,

    #[error("The URL must start with http:// or https://")]
    InvalidUrlFormat,

    #[error("Enter your email address")]
    EmptyEmail,

    #[error("Enter your password")]
    EmptyPassword,
}

/// Session and credential problems.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Sign-in required")]
    NotSignedIn,

    #[error("Incorrect email address or password")]
    InvalidCredentials,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Session expired, please sign in again")]
    SessionExpired,

    #[error("Token refresh failed")]
    TokenRefreshFailed,

    #[error("Token storage error: {0}")]
    Storage(String),
}

/// Transport and data-source failures, forwarded unchanged through the repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to encode request: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode response: {0}")]
    DecodingFailed(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    #[error("Server error (HTTP {0})")]
    Server(u16),

    #[error("HTTP error {0}")]
    Http(u16),

    #[error("Connection timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The host dropped interest in the operation before it finished.
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl DomainError {
    pub fn as_validation(&self) -> Option<ValidationError> {
        match self {
            Self::Validation(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_repository(&self) -> Option<&RepositoryError> {
        match self {
            Self::Repository(r) => Some(r),
            _ => None,
        }
    }
}
