/**
 * User Records and the Credential Store
 *
 * The store is the only component that touches user rows. Everything
 * above it (handlers, middleware) works against the `UserStore` trait,
 * so the HTTP pipeline runs identically over Postgres or the in-memory
 * store the server falls back to when `DATABASE_URL` is absent.
 *
 * Callers pass emails already normalized (trimmed, lowercased); the
 * store compares and persists them verbatim. Uniqueness is enforced
 * here, not in the handlers: the Postgres unique constraint and the
 * memory store's map under a single write lock are the authoritative
 * guards, and both report a duplicate as `StoreError::DuplicateEmail`.
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::auth::roles::Role;

/// A stored user record, including the bcrypt digest.
///
/// Never serialized into a response as-is; handlers convert to the
/// sanitized response shape first.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a user record. The store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Failures from the credential store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The email already has an account.
    #[error("email already registered")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence boundary for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Looks up a user by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Creates a user record, failing with [`StoreError::DuplicateEmail`]
    /// if the email is already taken.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// All user records, oldest first.
    async fn list(&self) -> Result<Vec<User>, StoreError>;
}

/// Postgres-backed store.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, role, created_at
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateEmail
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}

/// SQLSTATE 23505 is Postgres `unique_violation`, raised by the unique
/// constraint on `users.email`.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        if let Some(code) = db_err.code() {
            return code == "23505";
        }
    }
    false
}

/// In-memory store used when no database is configured and in the
/// integration tests. Records live only as long as the process.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    users: Vec<User>,
    next_id: i64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        // One write lock spans the duplicate check and the insert, so
        // two concurrent signups for the same email cannot interleave.
        let mut inner = self.inner.write().await;

        if inner.users.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: Utc::now(),
        };

        inner.users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(email: &str) -> NewUser {
        NewUser {
            name: "Sample User".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$fakedigestfakedigestfake".to_string(),
            role: Role::Student,
        }
    }

    #[tokio::test]
    async fn test_create_then_find_by_email() {
        let store = MemoryUserStore::new();
        let created = store.create(sample("a@example.com")).await.unwrap();

        let found = store.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.email, "a@example.com");
    }

    #[tokio::test]
    async fn test_find_by_email_misses_unknown() {
        let store = MemoryUserStore::new();
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = MemoryUserStore::new();
        store.create(sample("dup@example.com")).await.unwrap();

        let err = store.create(sample("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_ids_are_assigned_sequentially() {
        let store = MemoryUserStore::new();
        let first = store.create(sample("one@example.com")).await.unwrap();
        let second = store.create(sample("two@example.com")).await.unwrap();

        assert_eq!(second.id, first.id + 1);
    }

    #[tokio::test]
    async fn test_find_by_id_and_list() {
        let store = MemoryUserStore::new();
        let created = store.create(sample("x@example.com")).await.unwrap();

        let by_id = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "x@example.com");

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    // Needs a real database: run with `cargo test -- --ignored` and
    // DATABASE_URL set.
    #[tokio::test]
    #[ignore]
    async fn test_pg_store_round_trip() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL for the ignored test");
        let pool = PgPool::connect(&url).await.unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();

        let store = PgUserStore::new(pool);
        let email = format!("pg-{}@example.com", Utc::now().timestamp_micros());

        let created = store.create(sample(&email)).await.unwrap();
        let found = store.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.role, Role::Student);

        let err = store.create(sample(&email)).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }
}
