/**
 * Server Configuration
 *
 * Loads everything the pipeline needs from the environment once, at
 * startup. Request-path code never reads an environment variable; the
 * signing secret and bcrypt cost travel inside `AuthConfig` so tests
 * can construct them directly.
 *
 * # Configuration Sources
 *
 * - `JWT_SECRET`: token signing secret. Falls back to a well-known
 *   development value with a warning.
 * - `BCRYPT_COST`: bcrypt cost factor, default 12.
 * - `APP_ENV`: set to `production` to make the secret rules fatal.
 * - `DATABASE_URL`: optional Postgres connection string.
 *
 * # Error Handling
 *
 * A missing database is logged and tolerated; the server falls back
 * to the in-memory store. A production deployment running on the
 * development secret is not tolerated: `from_env` fails and the
 * server refuses to start.
 */
use bcrypt::DEFAULT_COST;
use sqlx::PgPool;
use thiserror::Error;

/// Well-known development fallback secret. Fine for local work, fatal
/// in production mode.
pub const DEV_SECRET: &str = "internmatch-dev-secret-change-me";

/// Minimum secret length accepted in production mode.
const MIN_SECRET_BYTES: usize = 32;

// bcrypt only accepts cost factors in this range.
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Auth settings injected into the router and middleware.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret shared by token issue and verification.
    pub secret: String,
    /// Cost factor for new password hashes.
    pub bcrypt_cost: u32,
}

/// Fatal configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-default value in production")]
    DefaultSecretInProduction,

    #[error("JWT_SECRET must be at least {} bytes in production", MIN_SECRET_BYTES)]
    SecretTooShort,
}

impl AuthConfig {
    /// Resolves the auth configuration from the environment.
    ///
    /// In production mode (`APP_ENV=production`) the development
    /// fallback secret and any secret under 32 bytes are rejected, and
    /// the caller is expected to abort startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        let production = matches!(std::env::var("APP_ENV").as_deref(), Ok("production"));

        let secret = match std::env::var("JWT_SECRET") {
            Ok(value) if !value.is_empty() => value,
            _ => {
                tracing::warn!("JWT_SECRET not set, using the development default");
                DEV_SECRET.to_string()
            }
        };

        if production {
            if secret == DEV_SECRET {
                return Err(ConfigError::DefaultSecretInProduction);
            }
            if secret.len() < MIN_SECRET_BYTES {
                return Err(ConfigError::SecretTooShort);
            }
        }

        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(DEFAULT_COST)
            .clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST);

        Ok(Self {
            secret,
            bcrypt_cost,
        })
    }
}

/// Loads the optional Postgres pool.
///
/// This function:
/// 1. Reads `DATABASE_URL` from the environment
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is reachable
/// - `None` if `DATABASE_URL` is not set or the connection fails, in
///   which case the caller falls back to the in-memory store
pub async fn load_database() -> Option<PgPool> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, user records will not be persisted");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to the in-memory store");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed");
        }
        Err(e) => {
            // Migrations might have already been applied by an earlier run.
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing, database might not be up to date");
        }
    }

    Some(pool)
}
