//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    AuthError, AuthUser, CreateRecipeRequest, DomainError, RecipeDetail, RecipeSummary,
    RepositoryError, UpdateRecipeRequest,
};
use std::fmt;

/// Recipe repository. The single seam between use cases and network/storage.
///
/// Implementations inject the bearer token and translate DTOs, so use cases
/// only ever see domain entities. Transport failures are forwarded unchanged.
#[async_trait::async_trait]
pub trait RecipeRepository: Send + Sync {
    /// `GET /recipes`
    async fn fetch_recipes(&self) -> Result<Vec<RecipeSummary>, DomainError>;

    /// `GET /recipes/:id`
    async fn fetch_recipe_detail(&self, recipe_id: &str) -> Result<RecipeDetail, DomainError>;

    /// `POST /recipes`. Returns the server's message (id or confirmation text).
    async fn create_recipe(&self, request: &CreateRecipeRequest) -> Result<String, DomainError>;

    /// `PUT /recipes`
    async fn update_recipe(
        &self,
        request: &UpdateRecipeRequest,
    ) -> Result<RecipeDetail, DomainError>;

    /// `DELETE /recipes/:id`. Returns the server's message.
    async fn delete_recipe(&self, recipe_id: &str) -> Result<String, DomainError>;

    /// `GET /recipes/search?q=`
    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipeSummary>, DomainError>;

    /// `GET /recipes/search?title=`
    async fn search_recipes_by_title(
        &self,
        title: &str,
    ) -> Result<Vec<RecipeSummary>, DomainError>;

    /// `GET /recipes/search?ingredients=`
    async fn search_recipes_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RecipeSummary>, DomainError>;

    /// `POST /recipes/fetch`
    async fn fetch_recipe_from_url(&self, url: &str) -> Result<RecipeDetail, DomainError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, DomainError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), DomainError>;

    /// Clears cached credentials.
    async fn sign_out(&self) -> Result<(), DomainError>;

    /// `None` when nobody is signed in.
    async fn get_current_user(&self) -> Result<Option<AuthUser>, DomainError>;

    /// `DELETE /account`, then clears cached credentials.
    async fn delete_account(&self) -> Result<(), DomainError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One HTTP exchange. `path` is relative to the transport's base URL.
/// `segments` are appended after it as single path segments; they and the
/// `query` values are percent-encoded by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub path: String,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// Already-encoded JSON body.
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            segments: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append one raw path segment, e.g. a recipe id.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// `true` for `.` and `..`, including their `%2e` spellings.
pub fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    matches!(decoded.as_str(), "." | "..")
}

/// Raw transport. Non-2xx statuses are already partitioned into
/// `RepositoryError` variants; on success the raw body is returned.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn request(&self, request: TransportRequest) -> Result<Vec<u8>, RepositoryError>;
}

/// Local credential storage.
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self) -> Result<Option<String>, AuthError>;

    async fn set(&self, token: &str) -> Result<(), AuthError>;

    /// Removes both the access and the refresh token.
    async fn clear(&self) -> Result<(), AuthError>;

    async fn get_refresh(&self) -> Result<Option<String>, AuthError>;

    async fn set_refresh(&self, token: &str) -> Result<(), AuthError>;
}
