//! Composition root. Builds the object graph once and hands it to the front end.

use crate::adapters::api::{RecipeApiDataSource, ReqwestTransport};
use crate::adapters::persistence::TokenJson;
use crate::adapters::repository::{RecipeRepositoryImpl, RepositoryOptions};
use crate::domain::DomainError;
use crate::ports::{HttpTransport, RecipeRepository, TokenStore};
use crate::shared::config::AppConfig;
use crate::usecases::{
    CreateRecipeUseCase, DeleteAccountUseCase, DeleteRecipeUseCase, FetchRecipeFromUrlUseCase,
    GetRecipeDetailUseCase, GetRecipeListUseCase, SearchRecipesUseCase, SignInUseCase,
    SignOutUseCase, SignUpUseCase, UpdateRecipeUseCase,
};
use std::sync::Arc;
use tracing::info;

/// Every use case, sharing one repository.
pub struct UseCases {
    pub get_recipe_list: GetRecipeListUseCase,
    pub get_recipe_detail: GetRecipeDetailUseCase,
    pub create_recipe: CreateRecipeUseCase,
    pub update_recipe: UpdateRecipeUseCase,
    pub delete_recipe: DeleteRecipeUseCase,
    pub search_recipes: SearchRecipesUseCase,
    pub fetch_recipe_from_url: FetchRecipeFromUrlUseCase,
    pub sign_in: SignInUseCase,
    pub sign_up: SignUpUseCase,
    pub sign_out: SignOutUseCase,
    pub delete_account: DeleteAccountUseCase,
}

impl UseCases {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self {
            get_recipe_list: GetRecipeListUseCase::new(Arc::clone(&repo)),
            get_recipe_detail: GetRecipeDetailUseCase::new(Arc::clone(&repo)),
            create_recipe: CreateRecipeUseCase::new(Arc::clone(&repo)),
            update_recipe: UpdateRecipeUseCase::new(Arc::clone(&repo)),
            delete_recipe: DeleteRecipeUseCase::new(Arc::clone(&repo)),
            search_recipes: SearchRecipesUseCase::new(Arc::clone(&repo)),
            fetch_recipe_from_url: FetchRecipeFromUrlUseCase::new(Arc::clone(&repo)),
            sign_in: SignInUseCase::new(Arc::clone(&repo)),
            sign_up: SignUpUseCase::new(Arc::clone(&repo)),
            sign_out: SignOutUseCase::new(Arc::clone(&repo)),
            delete_account: DeleteAccountUseCase::new(repo),
        }
    }
}

pub struct AppContainer {
    pub repository: Arc<dyn RecipeRepository>,
    pub use_cases: Arc<UseCases>,
}

impl AppContainer {
    /// Wire already-built ports. Tests and embedding hosts start here.
    pub fn with_ports(
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenStore>,
        options: RepositoryOptions,
    ) -> Self {
        let api = RecipeApiDataSource::new(transport);
        let repository: Arc<dyn RecipeRepository> =
            Arc::new(RecipeRepositoryImpl::new(api, tokens, options));
        Self::with_repository(repository)
    }

    pub fn with_repository(repository: Arc<dyn RecipeRepository>) -> Self {
        let use_cases = Arc::new(UseCases::new(Arc::clone(&repository)));
        Self {
            repository,
            use_cases,
        }
    }

    /// Production graph: reqwest transport and the JSON token cache.
    pub async fn from_config(cfg: &AppConfig) -> Result<Self, DomainError> {
        let base_url = cfg.base_url_or_default();
        let transport = ReqwestTransport::new(base_url.clone(), cfg.request_timeout_or_default())?;

        let token_path = cfg.token_path_or_default();
        let tokens = TokenJson::new(&token_path);
        tokens.load().await?;
        info!(%base_url, token_path = %token_path.display(), "container ready");

        let options = RepositoryOptions {
            stub_token: cfg.stub_token_or_default(),
            sign_up_delay: cfg.sign_up_delay_or_default(),
        };
        Ok(Self::with_ports(
            Arc::new(transport),
            Arc::new(tokens),
            options,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::api::data_source::tests::RecordingTransport;
    use crate::adapters::persistence::MemoryTokenStore;
    use crate::presentation::RecipeListState;

    #[tokio::test]
    async fn test_container_drives_list_screen_end_to_end() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .push_json(
                r#"[
                    {"recipeId":"r1","title":"Old","createdAt":"2024-01-01T00:00:00Z"},
                    {"recipeId":"r2","title":"New","createdAt":"2024-03-01T00:00:00Z"}
                ]"#,
            )
            .await;
        let container = AppContainer::with_ports(
            transport.clone(),
            Arc::new(MemoryTokenStore::with_token("tok")),
            RepositoryOptions::default(),
        );

        let mut list = RecipeListState::new();
        list.load_with(&container.use_cases.get_recipe_list).await;

        let ids: Vec<_> = list.recipes.iter().map(|r| r.recipe_id.as_str()).collect();
        assert_eq!(ids, ["r2", "r1"]);
        let request = transport.last().await;
        assert_eq!(request.path, "/recipes");
        assert_eq!(request.header_value("authorization"), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_from_config_with_temp_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig {
            token_path: Some(dir.path().join("tokens.json").display().to_string()),
            ..AppConfig::default()
        };
        let container = AppContainer::from_config(&cfg).await.unwrap();
        assert_eq!(container.repository.get_current_user().await.unwrap(), None);
    }
}
