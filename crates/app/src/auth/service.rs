use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{
        repository::{AuthRepository, AuthRepositoryError},
        token,
    },
    uuids::OwnerUuid,
};

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("Unknown token")]
    NotFound,

    #[error(transparent)]
    Sql(sqlx::Error),
}

impl From<AuthRepositoryError> for AuthServiceError {
    fn from(error: AuthRepositoryError) -> Self {
        match error {
            // Registration retries on hash collision instead of
            // surfacing AlreadyExists, so both map to NotFound here.
            AuthRepositoryError::NotFound | AuthRepositoryError::AlreadyExists => Self::NotFound,
            AuthRepositoryError::Sql(error) => Self::Sql(error),
        }
    }
}

/// Credentials issued for a newly registered owner. The token is only
/// available here; afterwards the store holds just its hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOwnerCredentials {
    pub owner: OwnerUuid,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthServiceImpl {
    repository: Arc<dyn AuthRepository>,
}

impl fmt::Debug for AuthServiceImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthServiceImpl").finish_non_exhaustive()
    }
}

impl AuthServiceImpl {
    #[must_use]
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn authenticate_bearer(&self, token: &str) -> Result<OwnerUuid, AuthServiceError> {
        let hash = token::hash_token(token);

        Ok(self.repository.find_owner_by_token_hash(&hash).await?)
    }

    async fn register_owner(&self) -> Result<NewOwnerCredentials, AuthServiceError> {
        let owner = self.repository.create_owner().await?;
        let token = token::generate_token();

        self.repository
            .create_api_token(owner, &token::hash_token(&token))
            .await?;

        Ok(NewOwnerCredentials { owner, token })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the owner it belongs to.
    async fn authenticate_bearer(&self, token: &str) -> Result<OwnerUuid, AuthServiceError>;

    /// Create a new owner and issue their first API token.
    async fn register_owner(&self) -> Result<NewOwnerCredentials, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::auth::repository::MockAuthRepository;

    use super::*;

    #[tokio::test]
    async fn authenticate_looks_up_by_hash_not_raw_token() -> TestResult {
        let owner = OwnerUuid::new();
        let expected_hash = token::hash_token("tr_secret");

        let mut repository = MockAuthRepository::new();

        repository
            .expect_find_owner_by_token_hash()
            .once()
            .withf(move |hash| hash == expected_hash)
            .return_once(move |_| Ok(owner));

        let resolved = AuthServiceImpl::new(Arc::new(repository))
            .authenticate_bearer("tr_secret")
            .await?;

        assert_eq!(resolved, owner);

        Ok(())
    }

    #[tokio::test]
    async fn authenticate_unknown_token_is_not_found() {
        let mut repository = MockAuthRepository::new();

        repository
            .expect_find_owner_by_token_hash()
            .once()
            .return_once(|_| Err(AuthRepositoryError::NotFound));

        let result = AuthServiceImpl::new(Arc::new(repository))
            .authenticate_bearer("tr_unknown")
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn register_owner_stores_only_the_token_hash() -> TestResult {
        let owner = OwnerUuid::new();

        let mut repository = MockAuthRepository::new();

        repository
            .expect_create_owner()
            .once()
            .return_once(move || Ok(owner));

        repository
            .expect_create_api_token()
            .once()
            .withf(move |o, hash| {
                *o == owner && hash.len() == 64 && hash.chars().all(|c| c.is_ascii_hexdigit())
            })
            .return_once(|_, _| Ok(()));

        let credentials = AuthServiceImpl::new(Arc::new(repository))
            .register_owner()
            .await?;

        assert_eq!(credentials.owner, owner);
        assert!(credentials.token.starts_with("tr_"));

        Ok(())
    }
}
