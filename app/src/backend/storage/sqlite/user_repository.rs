use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use shared::{AuthResponse, LoginRequest, RegisterRequest};
use sqlx::Row;
use tracing::info;
use uuid::Uuid;

use crate::backend::error::{StoreError, StoreResult};
use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::AuthStorage;

fn hash_password(password: &str) -> StoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, stored_hash: &str) -> StoreResult<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| StoreError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Local accounts. Sessions are a random token that lives as long as the process.
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    async fn email_taken(&self, email: &str) -> StoreResult<bool> {
        let row = sqlx::query("SELECT 1 FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(row.is_some())
    }
}

#[async_trait]
impl AuthStorage for UserRepository {
    async fn login(&self, request: &LoginRequest) -> StoreResult<AuthResponse> {
        let email = request.email.trim();
        let row = sqlx::query(
            r#"
            SELECT id, name, last_name, email, phone, password_hash
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.pool())
        .await?;

        let row = row.ok_or(StoreError::InvalidCredentials)?;
        let stored_hash: String = row.get("password_hash");
        if !verify_password(&request.password, &stored_hash)? {
            return Err(StoreError::InvalidCredentials);
        }

        Ok(AuthResponse {
            id: Some(row.get("id")),
            name: row.get("name"),
            last_name: row.get("last_name"),
            email: row.get("email"),
            phone: row.get("phone"),
            token: Uuid::new_v4().to_string(),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> StoreResult<AuthResponse> {
        let email = request.email.trim();
        if self.email_taken(email).await? {
            return Err(StoreError::Conflict(format!("email {} is already registered", email)));
        }

        let password_hash = hash_password(&request.password)?;
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, last_name, email, phone, password_hash)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.name.trim())
        .bind(request.last_name.trim())
        .bind(email)
        .bind(&request.phone)
        .bind(&password_hash)
        .execute(self.db.pool())
        .await?;

        let id = result.last_insert_rowid();
        info!("Registered local user {} with id {}", email, id);

        Ok(AuthResponse {
            id: Some(id),
            name: request.name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email: email.to_string(),
            phone: request.phone.clone(),
            token: Uuid::new_v4().to_string(),
        })
    }
}
