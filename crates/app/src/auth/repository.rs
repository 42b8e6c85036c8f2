use async_trait::async_trait;
use mockall::automock;
use sqlx::{
    Error, PgPool, Row,
    error::{DatabaseError, ErrorKind},
    query, query_scalar,
};
use uuid::Uuid;

use crate::uuids::OwnerUuid;

const FIND_OWNER_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_owner_by_token_hash.sql");
const CREATE_OWNER_SQL: &str = include_str!("sql/create_owner.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");

#[derive(Debug, thiserror::Error)]
pub enum AuthRepositoryError {
    #[error("Token not found")]
    NotFound,

    #[error("Token already exists")]
    AlreadyExists,

    #[error(transparent)]
    Sql(Error),
}

impl From<Error> for AuthRepositoryError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(_) | None => Self::Sql(error),
        }
    }
}

#[automock]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Resolve a stored token hash to its owner.
    async fn find_owner_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<OwnerUuid, AuthRepositoryError>;

    async fn create_owner(&self) -> Result<OwnerUuid, AuthRepositoryError>;

    async fn create_api_token(
        &self,
        owner: OwnerUuid,
        token_hash: &str,
    ) -> Result<(), AuthRepositoryError>;
}

/// Postgres-backed auth repository.
#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthRepository for PgAuthRepository {
    async fn find_owner_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<OwnerUuid, AuthRepositoryError> {
        let owner = query(FIND_OWNER_BY_TOKEN_HASH_SQL)
            .bind(token_hash)
            .fetch_one(&self.pool)
            .await?
            .try_get::<Uuid, _>("owner_uuid")
            .map_err(AuthRepositoryError::Sql)?;

        Ok(OwnerUuid::from_uuid(owner))
    }

    async fn create_owner(&self) -> Result<OwnerUuid, AuthRepositoryError> {
        let owner = OwnerUuid::new();

        query_scalar::<_, Uuid>(CREATE_OWNER_SQL)
            .bind(owner.into_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(owner)
    }

    async fn create_api_token(
        &self,
        owner: OwnerUuid,
        token_hash: &str,
    ) -> Result<(), AuthRepositoryError> {
        query(CREATE_API_TOKEN_SQL)
            .bind(Uuid::now_v7())
            .bind(owner.into_uuid())
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
