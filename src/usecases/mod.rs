//! Application use cases. One business operation each, orchestrated via the repository port.
//!
//! Every use case validates its input first (failing on the first broken rule,
//! before any I/O), then makes at most one repository call and optionally
//! reorders the result. No use case holds state or retries.

pub mod create_recipe;
pub mod delete_account;
pub mod delete_recipe;
pub mod fetch_recipe_from_url;
pub mod get_recipe_detail;
pub mod get_recipe_list;
pub mod search_recipes;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod update_recipe;

#[cfg(test)]
pub(crate) mod test_support;

pub use create_recipe::CreateRecipeUseCase;
pub use delete_account::DeleteAccountUseCase;
pub use delete_recipe::DeleteRecipeUseCase;
pub use fetch_recipe_from_url::FetchRecipeFromUrlUseCase;
pub use get_recipe_detail::GetRecipeDetailUseCase;
pub use get_recipe_list::GetRecipeListUseCase;
pub use search_recipes::SearchRecipesUseCase;
pub use sign_in::SignInUseCase;
pub use sign_out::SignOutUseCase;
pub use sign_up::SignUpUseCase;
pub use update_recipe::UpdateRecipeUseCase;

use crate::domain::{DomainError, ValidationError};
use crate::ports::is_dot_segment;
use std::future::Future;
use tracing::debug;

/// Race `operation` against `cancel`. If `cancel` resolves first the
/// operation is dropped and `DomainError::Cancelled` is returned.
pub async fn with_cancellation<T, F, C>(operation: F, cancel: C) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
    C: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = cancel => {
            debug!("operation cancelled by host");
            Err(DomainError::Cancelled)
        }
        result = operation => result,
    }
}

/// `true` when `value` is empty after trimming whitespace.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Blank ids and `.`/`..` cannot address a recipe.
pub(crate) fn is_invalid_recipe_id(recipe_id: &str) -> bool {
    is_blank(recipe_id) || is_dot_segment(recipe_id.trim())
}

fn rejected(use_case: &'static str, err: ValidationError) -> DomainError {
    debug!(use_case, error = %err, "input rejected");
    DomainError::Validation(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_signal_wins() {
        let result: Result<u32, _> = with_cancellation(
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(1)
            },
            std::future::ready(()),
        )
        .await;
        assert_eq!(result, Err(DomainError::Cancelled));
    }

    #[tokio::test]
    async fn test_operation_completes_without_signal() {
        let result = with_cancellation(async { Ok(7) }, std::future::pending()).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_operation_errors_are_not_rewritten() {
        let result: Result<(), _> = with_cancellation(
            async { Err(DomainError::Validation(ValidationError::EmptyUrl)) },
            std::future::pending(),
        )
        .await;
        assert_eq!(result, Err(DomainError::Validation(ValidationError::EmptyUrl)));
    }
}
