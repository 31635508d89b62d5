//! Account repository backed by PostgreSQL

use super::{AccountStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use taskboard_shared::PublicUser;

/// Credential record, only fetched for login
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountRecord {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
}

/// Public columns of the users table
#[derive(Debug, Clone, sqlx::FromRow)]
struct PublicUserRecord {
    id: i32,
    email: String,
    nick_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PublicUserRecord> for PublicUser {
    fn from(record: PublicUserRecord) -> Self {
        PublicUser {
            id: record.id,
            email: record.email,
            nick_name: record.nick_name,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Account store for database operations
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, email: &str, password_hash: &str) -> StoreResult<PublicUser> {
        let user = sqlx::query_as::<_, PublicUserRecord>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, nick_name, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)?;

        Ok(user.into())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<AccountRecord>> {
        let account = sqlx::query_as::<_, AccountRecord>(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<PublicUser>> {
        let user = sqlx::query_as::<_, PublicUserRecord>(
            r#"
            SELECT id, email, nick_name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.map(Into::into))
    }

    async fn update_nick_name(
        &self,
        id: i32,
        nick_name: Option<String>,
    ) -> StoreResult<Option<PublicUser>> {
        let user = sqlx::query_as::<_, PublicUserRecord>(
            r#"
            UPDATE users SET
                nick_name = COALESCE($2, nick_name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, nick_name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(nick_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.map(Into::into))
    }
}
