//! Remote data source. One method per REST route of the recipe backend.
//!
//! Encodes request DTOs, attaches the bearer token, and decodes response DTOs.
//! Status handling lives in the `HttpTransport`.

use super::dto::{
    AuthUserDto, CreateRecipeRequestDto, FetchRecipeFromUrlRequestDto, MessageResponseDto,
    RecipeDetailDto, RecipeSummaryDto, UpdateRecipeRequestDto,
};
use crate::domain::RepositoryError;
use crate::ports::{HttpMethod, HttpTransport, TransportRequest, is_dot_segment};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

pub struct RecipeApiDataSource {
    transport: Arc<dyn HttpTransport>,
}

impl RecipeApiDataSource {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    fn authorized(method: HttpMethod, path: impl Into<String>, token: &str) -> TransportRequest {
        TransportRequest::new(method, path).header("Authorization", format!("Bearer {}", token))
    }

    /// `/recipes/<id>` with the id as one path segment.
    fn recipe_request(
        method: HttpMethod,
        recipe_id: &str,
        token: &str,
    ) -> Result<TransportRequest, RepositoryError> {
        if is_dot_segment(recipe_id) {
            return Err(RepositoryError::InvalidUrl(format!(
                "{:?} is not a valid recipe id",
                recipe_id
            )));
        }
        Ok(Self::authorized(method, "/recipes", token).segment(recipe_id))
    }

    fn with_json<B: Serialize>(
        request: TransportRequest,
        body: &B,
    ) -> Result<TransportRequest, RepositoryError> {
        let bytes =
            serde_json::to_vec(body).map_err(|e| RepositoryError::EncodingFailed(e.to_string()))?;
        Ok(request
            .header("Content-Type", "application/json")
            .body(bytes))
    }

    async fn send<T: DeserializeOwned>(&self, request: TransportRequest) -> Result<T, RepositoryError> {
        let path = request.path.clone();
        let bytes = self.transport.request(request).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            debug!(path = %path, error = %e, "response decode failed");
            RepositoryError::DecodingFailed(e.to_string())
        })
    }

    /// GET /recipes
    pub async fn fetch_recipes(&self, token: &str) -> Result<Vec<RecipeSummaryDto>, RepositoryError> {
        self.send(Self::authorized(HttpMethod::Get, "/recipes", token))
            .await
    }

    /// GET /recipes/:id
    pub async fn fetch_recipe_detail(
        &self,
        recipe_id: &str,
        token: &str,
    ) -> Result<RecipeDetailDto, RepositoryError> {
        self.send(Self::recipe_request(HttpMethod::Get, recipe_id, token)?)
            .await
    }

    /// DELETE /recipes/:id
    pub async fn delete_recipe(
        &self,
        recipe_id: &str,
        token: &str,
    ) -> Result<MessageResponseDto, RepositoryError> {
        self.send(Self::recipe_request(HttpMethod::Delete, recipe_id, token)?)
            .await
    }

    /// POST /recipes
    pub async fn create_recipe(
        &self,
        recipe: &CreateRecipeRequestDto,
        token: &str,
    ) -> Result<MessageResponseDto, RepositoryError> {
        let request = Self::with_json(Self::authorized(HttpMethod::Post, "/recipes", token), recipe)?;
        self.send(request).await
    }

    /// PUT /recipes
    pub async fn update_recipe(
        &self,
        recipe: &UpdateRecipeRequestDto,
        token: &str,
    ) -> Result<RecipeDetailDto, RepositoryError> {
        let request = Self::with_json(Self::authorized(HttpMethod::Put, "/recipes", token), recipe)?;
        self.send(request).await
    }

    /// GET /recipes/search?q=
    pub async fn search_recipes(
        &self,
        query: &str,
        token: &str,
    ) -> Result<Vec<RecipeSummaryDto>, RepositoryError> {
        self.search("q", query, token).await
    }

    /// GET /recipes/search?title=
    pub async fn search_recipes_by_title(
        &self,
        title: &str,
        token: &str,
    ) -> Result<Vec<RecipeSummaryDto>, RepositoryError> {
        self.search("title", title, token).await
    }

    /// GET /recipes/search?ingredients=
    pub async fn search_recipes_by_ingredient(
        &self,
        ingredient: &str,
        token: &str,
    ) -> Result<Vec<RecipeSummaryDto>, RepositoryError> {
        self.search("ingredients", ingredient, token).await
    }

    async fn search(
        &self,
        param: &str,
        value: &str,
        token: &str,
    ) -> Result<Vec<RecipeSummaryDto>, RepositoryError> {
        self.send(Self::authorized(HttpMethod::Get, "/recipes/search", token).query(param, value))
            .await
    }

    /// POST /recipes/fetch
    pub async fn fetch_recipe_from_url(
        &self,
        url: &str,
        token: &str,
    ) -> Result<RecipeDetailDto, RepositoryError> {
        let body = FetchRecipeFromUrlRequestDto {
            url: url.to_string(),
        };
        let request =
            Self::with_json(Self::authorized(HttpMethod::Post, "/recipes/fetch", token), &body)?;
        self.send(request).await
    }

    /// GET /user/me
    pub async fn get_current_user(&self, token: &str) -> Result<AuthUserDto, RepositoryError> {
        self.send(Self::authorized(HttpMethod::Get, "/user/me", token))
            .await
    }

    /// DELETE /account. The response body is ignored (may be empty).
    pub async fn delete_account(&self, token: &str) -> Result<(), RepositoryError> {
        self.transport
            .request(Self::authorized(HttpMethod::Delete, "/account", token))
            .await?;
        Ok(())
    }
}
