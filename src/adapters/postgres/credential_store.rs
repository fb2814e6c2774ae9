//! PostgreSQL implementation of the credential store.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::account::StoredAccount;
use crate::domain::foundation::{Actor, DomainError, ErrorCode, UserId};
use crate::ports::{AccountRecord, CredentialStore};

use super::rows::{db_error, is_unique_violation, password_hash, row_to_actor, USER_COLUMNS};

#[derive(Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_api_token(&self, digest: &str) -> Result<Option<Actor>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.username, u.full_name, u.email, u.role
            FROM api_tokens t
            JOIN users u ON u.id = t.user_id
            WHERE t.token_digest = $1
            "#,
        )
        .bind(digest)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("look up api token"))?;

        row.as_ref().map(row_to_actor).transpose()
    }

    async fn find_by_login(&self, identifier: &str) -> Result<Option<StoredAccount>, DomainError> {
        let sql = format!(
            "SELECT {} FROM users WHERE email = LOWER($1) OR username = $1 LIMIT 1",
            USER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("look up account"))?;

        match row {
            Some(row) => Ok(Some(StoredAccount {
                actor: row_to_actor(&row)?,
                password_hash: password_hash(&row)?,
            })),
            None => Ok(None),
        }
    }

    async fn create_account(&self, record: &AccountRecord) -> Result<Actor, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO users (full_name, username, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&record.full_name)
            .bind(&record.username)
            .bind(&record.email)
            .bind(&record.password_hash)
            .bind(record.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::new(ErrorCode::Conflict, "email or username already exists")
                } else {
                    db_error("create account")(e)
                }
            })?;

        row_to_actor(&row)
    }

    async fn touch_last_login(&self, user_id: UserId) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(db_error("record last login"))?;
        Ok(())
    }
}
