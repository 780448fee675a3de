//! Implements RecipeRepository over the REST data source and the token cache.
//!
//! Every authenticated call carries the cached bearer token. DTOs are mapped
//! to entities inline; transport errors pass through untouched.
//!
//! Sign-in and sign-up are stand-ins until the backend exposes credential
//! exchange: sign-in caches the configured stand-in token and returns a fixed
//! test identity, sign-up succeeds after a short delay.

use crate::adapters::api::RecipeApiDataSource;
use crate::adapters::api::dto::{
    CreateRecipeRequestDto, RecipeDetailDto, RecipeSummaryDto, UpdateRecipeRequestDto,
};
use crate::domain::{
    AuthError, AuthUser, CreateRecipeRequest, DomainError, RecipeDetail, RecipeSummary,
    UpdateRecipeRequest,
};
use crate::ports::{RecipeRepository, TokenStore};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// User id the stand-in backend assigns to every session.
pub const STUB_USER_ID: &str = "user-1";
/// Email reported for the stand-in session when no sign-in email is known.
pub const STUB_USER_EMAIL: &str = "test@example.com";

#[derive(Debug, Clone)]
pub struct RepositoryOptions {
    /// Token used when the cache is empty. `None` makes a missing token an error.
    pub stub_token: Option<String>,
    /// Simulated latency of the stand-in sign-up.
    pub sign_up_delay: Duration,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            stub_token: Some(STUB_USER_ID.to_string()),
            sign_up_delay: Duration::from_secs(1),
        }
    }
}

pub struct RecipeRepositoryImpl {
    api: RecipeApiDataSource,
    tokens: Arc<dyn TokenStore>,
    options: RepositoryOptions,
    /// Serialises token writes (sign-in, sign-out, account deletion).
    token_writes: Mutex<()>,
    /// Email given at the last stand-in sign-in.
    signed_in_email: Mutex<Option<String>>,
}

impl RecipeRepositoryImpl {
    pub fn new(
        api: RecipeApiDataSource,
        tokens: Arc<dyn TokenStore>,
        options: RepositoryOptions,
    ) -> Self {
        Self {
            api,
            tokens,
            options,
            token_writes: Mutex::new(()),
            signed_in_email: Mutex::new(None),
        }
    }

    async fn token(&self) -> Result<String, DomainError> {
        match self.tokens.get().await? {
            Some(token) => Ok(token),
            None => self
                .options
                .stub_token
                .clone()
                .ok_or(DomainError::Auth(AuthError::NotSignedIn)),
        }
    }

    fn is_stub_token(&self, token: &str) -> bool {
        self.options.stub_token.as_deref() == Some(token)
    }

    /// Rows without a usable `createdAt` share one fallback, so they tie and keep server order.
    fn summaries(dtos: Vec<RecipeSummaryDto>) -> Vec<RecipeSummary> {
        let now = Utc::now();
        dtos.into_iter()
            .map(|dto| dto.into_domain_with_fallback(now))
            .collect()
    }
}

#[async_trait::async_trait]
impl RecipeRepository for RecipeRepositoryImpl {
    async fn fetch_recipes(&self) -> Result<Vec<RecipeSummary>, DomainError> {
        let token = self.token().await?;
        let dtos = self.api.fetch_recipes(&token).await?;
        debug!(count = dtos.len(), "fetched recipes");
        Ok(Self::summaries(dtos))
    }

    async fn fetch_recipe_detail(&self, recipe_id: &str) -> Result<RecipeDetail, DomainError> {
        let token = self.token().await?;
        let dto = self.api.fetch_recipe_detail(recipe_id, &token).await?;
        Ok(dto.into_domain())
    }

    async fn create_recipe(&self, request: &CreateRecipeRequest) -> Result<String, DomainError> {
        let token = self.token().await?;
        let dto = CreateRecipeRequestDto::from(request);
        let response = self.api.create_recipe(&dto, &token).await?;
        Ok(response.message)
    }

    async fn update_recipe(
        &self,
        request: &UpdateRecipeRequest,
    ) -> Result<RecipeDetail, DomainError> {
        let token = self.token().await?;
        let dto = UpdateRecipeRequestDto::from(request);
        let updated = self.api.update_recipe(&dto, &token).await?;
        Ok(updated.into_domain())
    }

    async fn delete_recipe(&self, recipe_id: &str) -> Result<String, DomainError> {
        let token = self.token().await?;
        let response = self.api.delete_recipe(recipe_id, &token).await?;
        Ok(response.message)
    }

    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipeSummary>, DomainError> {
        let token = self.token().await?;
        Ok(Self::summaries(self.api.search_recipes(query, &token).await?))
    }

    async fn search_recipes_by_title(
        &self,
        title: &str,
    ) -> Result<Vec<RecipeSummary>, DomainError> {
        let token = self.token().await?;
        Ok(Self::summaries(
            self.api.search_recipes_by_title(title, &token).await?,
        ))
    }

    async fn search_recipes_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RecipeSummary>, DomainError> {
        let token = self.token().await?;
        Ok(Self::summaries(
            self.api
                .search_recipes_by_ingredient(ingredient, &token)
                .await?,
        ))
    }

    async fn fetch_recipe_from_url(&self, url: &str) -> Result<RecipeDetail, DomainError> {
        let token = self.token().await?;
        let dto: RecipeDetailDto = self.api.fetch_recipe_from_url(url, &token).await?;
        Ok(dto.into_domain())
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<AuthUser, DomainError> {
        let _guard = self.token_writes.lock().await;
        let token = self
            .options
            .stub_token
            .clone()
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;
        self.tokens.set(&token).await?;
        *self.signed_in_email.lock().await = Some(email.to_string());
        info!(user_id = STUB_USER_ID, "signed in (stand-in session)");
        Ok(AuthUser::new(STUB_USER_ID, email))
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> Result<(), DomainError> {
        tokio::time::sleep(self.options.sign_up_delay).await;
        info!("sign-up accepted (stand-in)");
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), DomainError> {
        let _guard = self.token_writes.lock().await;
        self.tokens.clear().await?;
        *self.signed_in_email.lock().await = None;
        info!("signed out, credentials cleared");
        Ok(())
    }

    async fn get_current_user(&self) -> Result<Option<AuthUser>, DomainError> {
        let Some(token) = self.tokens.get().await? else {
            return Ok(None);
        };
        if self.is_stub_token(&token) {
            let email = self
                .signed_in_email
                .lock()
                .await
                .clone()
                .unwrap_or_else(|| STUB_USER_EMAIL.to_string());
            return Ok(Some(AuthUser::new(STUB_USER_ID, email)));
        }
        let dto = self.api.get_current_user(&token).await?;
        Ok(Some(dto.into_domain()))
    }

    async fn delete_account(&self) -> Result<(), DomainError> {
        let _guard = self.token_writes.lock().await;
        let token = self.token().await?;
        self.api.delete_account(&token).await?;
        self.tokens.clear().await?;
        *self.signed_in_email.lock().await = None;
        info!("account deleted, credentials cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::api::data_source::tests::RecordingTransport;
    use crate::adapters::persistence::MemoryTokenStore;
    use crate::domain::{Ingredient, IngredientGroup, RepositoryError};
    use crate::ports::HttpMethod;

    fn repo_with(
        transport: Arc<RecordingTransport>,
        tokens: Arc<MemoryTokenStore>,
        stub_token: Option<&str>,
    ) -> RecipeRepositoryImpl {
        RecipeRepositoryImpl::new(
            RecipeApiDataSource::new(transport),
            tokens,
            RepositoryOptions {
                stub_token: stub_token.map(String::from),
                sign_up_delay: Duration::from_millis(1),
            },
        )
    }

    #[tokio::test]
    async fn test_undated_rows_keep_server_order() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .push_json(
                r#"[
                    {"recipeId":"a","title":"A","createdAt":"bogus"},
                    {"recipeId":"b","title":"B"},
                    {"recipeId":"c","title":"C","createdAt":""}
                ]"#,
            )
            .await;
        let tokens = Arc::new(MemoryTokenStore::with_token("tok"));
        let repo: Arc<dyn RecipeRepository> = Arc::new(repo_with(transport, tokens, None));

        let list = crate::usecases::GetRecipeListUseCase::new(repo)
            .execute()
            .await
            .unwrap();
        let ids: Vec<_> = list.iter().map(|r| r.recipe_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(list.iter().all(|r| r.created_at == list[0].created_at));
    }

    #[tokio::test]
    async fn test_cached_token_is_sent_as_bearer() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .push_json(r#"[{"recipeId":"r1","title":"Soup","createdAt":"2024-01-01T00:00:00Z","ingredientsName":["water"]}]"#)
            .await;
        let tokens = Arc::new(MemoryTokenStore::with_token("real-token"));
        let repo = repo_with(transport.clone(), tokens, Some("user-1"));

        let recipes = repo.fetch_recipes().await.unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].ingredients_name, ["water"]);
        assert_eq!(
            transport.last().await.header_value("Authorization"),
            Some("Bearer real-token")
        );
    }

    #[tokio::test]
    async fn test_stand_in_token_used_when_cache_empty() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .push_json(r#"{"recipeId":"r1","title":"Soup"}"#)
            .await;
        let repo = repo_with(transport.clone(), Arc::new(MemoryTokenStore::new()), Some("user-1"));

        repo.fetch_recipe_detail("r1").await.unwrap();
        let req = transport.last().await;
        assert_eq!(req.path, "/recipes/r1");
        assert_eq!(req.header_value("Authorization"), Some("Bearer user-1"));
    }

    #[tokio::test]
    async fn test_missing_token_without_stand_in_is_auth_error() {
        let transport = Arc::new(RecordingTransport::new());
        let repo = repo_with(transport.clone(), Arc::new(MemoryTokenStore::new()), None);

        let err = repo.fetch_recipes().await.unwrap_err();
        assert_eq!(err, DomainError::Auth(AuthError::NotSignedIn));
        assert!(transport.requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_transport_errors_propagate_unchanged() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_err(RepositoryError::Unauthorized).await;
        let repo = repo_with(transport, Arc::new(MemoryTokenStore::new()), Some("user-1"));

        let err = repo.delete_recipe("r1").await.unwrap_err();
        assert_eq!(err, DomainError::Repository(RepositoryError::Unauthorized));
    }

    #[tokio::test]
    async fn test_update_sends_put_with_mirrored_body() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .push_json(r#"{"recipeId":"r1","title":"New title","ingredientGroups":[]}"#)
            .await;
        let repo = repo_with(transport.clone(), Arc::new(MemoryTokenStore::new()), Some("user-1"));
        let request = UpdateRecipeRequest {
            recipe_id: "r1".into(),
            title: "New title".into(),
            thumbnail_url: None,
            media_url: None,
            memo: Some("memo".into()),
            ingredient_groups: vec![IngredientGroup {
                group_id: "g1".into(),
                title: None,
                order_num: 1,
                ingredients: vec![Ingredient {
                    id: "i1".into(),
                    ingredient_name: "rice".into(),
                    amount: Some("1 cup".into()),
                    order_num: 1,
                }],
            }],
        };

        let updated = repo.update_recipe(&request).await.unwrap();
        assert_eq!(updated.title, "New title");

        let req = transport.last().await;
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "/recipes");
        let body: serde_json::Value = serde_json::from_slice(req.body.as_ref().unwrap()).unwrap();
        assert_eq!(body["recipeId"], "r1");
        assert_eq!(body["ingredientGroups"][0]["ingredients"][0]["amount"], "1 cup");
    }

    #[tokio::test]
    async fn test_create_returns_server_message() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .push_json(r#"{"message":"recipe created successfully"}"#)
            .await;
        let repo = repo_with(transport, Arc::new(MemoryTokenStore::new()), Some("user-1"));
        let request = CreateRecipeRequest {
            title: "Toast".into(),
            thumbnail_url: None,
            media_url: None,
            memo: None,
            ingredient_groups: vec![],
        };
        assert_eq!(
            repo.create_recipe(&request).await.unwrap(),
            "recipe created successfully"
        );
    }

    #[tokio::test]
    async fn test_sign_in_then_sign_out_clears_tokens() {
        let transport = Arc::new(RecordingTransport::new());
        let tokens = Arc::new(MemoryTokenStore::new());
        let repo = repo_with(transport, tokens.clone(), Some("user-1"));

        let user = repo.sign_in("cook@example.com", "secret1").await.unwrap();
        assert_eq!(user.user_id, STUB_USER_ID);
        assert_eq!(tokens.get().await.unwrap().as_deref(), Some("user-1"));
        let current = repo.get_current_user().await.unwrap().unwrap();
        assert_eq!(current.email, "cook@example.com");

        tokens.set_refresh("refresh").await.unwrap();
        repo.sign_out().await.unwrap();
        assert_eq!(tokens.get().await.unwrap(), None);
        assert_eq!(tokens.get_refresh().await.unwrap(), None);
        assert!(repo.get_current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_current_user_resolved_remotely_for_real_token() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .push_json(r#"{"userID":"abc","email":"real@example.com"}"#)
            .await;
        let tokens = Arc::new(MemoryTokenStore::with_token("jwt"));
        let repo = repo_with(transport.clone(), tokens, Some("user-1"));

        let user = repo.get_current_user().await.unwrap().unwrap();
        assert_eq!(user.user_id, "abc");
        assert_eq!(transport.last().await.path, "/user/me");
    }

    #[tokio::test]
    async fn test_delete_account_clears_tokens_after_call() {
        let transport = Arc::new(RecordingTransport::new());
        let tokens = Arc::new(MemoryTokenStore::with_token("jwt"));
        let repo = repo_with(transport.clone(), tokens.clone(), Some("user-1"));

        repo.delete_account().await.unwrap();
        let req = transport.last().await;
        assert_eq!(req.path, "/account");
        assert_eq!(req.header_value("Authorization"), Some("Bearer jwt"));
        assert_eq!(tokens.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_account_deletion_keeps_tokens() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_err(RepositoryError::Server(500)).await;
        let tokens = Arc::new(MemoryTokenStore::with_token("jwt"));
        let repo = repo_with(transport, tokens.clone(), Some("user-1"));

        assert!(repo.delete_account().await.is_err());
        assert_eq!(tokens.get().await.unwrap().as_deref(), Some("jwt"));
    }
}
