use std::env;

use anyhow::{Context, Result};
use url::Url;

use crate::db::{DEFAULT_CONNECT_ATTEMPTS, DEFAULT_MAX_POOL_SIZE};

pub const DEFAULT_MAX_DATE_DIFFERENCE_DAYS: i64 = 28;
pub const DEFAULT_PAGE_LIMIT: i64 = 20;
pub const DEFAULT_SORT: &str = "created_at asc";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_pool_size: u32,
    pub database_min_idle: u32,
    pub database_max_lifetime_secs: u64,
    pub database_connect_attempts: u32,
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_expiry_minutes: i64,
    pub cors_allowed_origin: Option<String>,
    pub max_date_difference_days: i64,
    pub pagination_default_limit: i64,
    pub pagination_default_sort: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let database_max_pool_size = env::var("DATABASE_MAX_POOL_SIZE")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_MAX_POOL_SIZE);
        let database_min_idle = env::var("DATABASE_MIN_IDLE")
            .unwrap_or_else(|_| "2".to_string())
            .parse()
            .context("DATABASE_MIN_IDLE must be an integer")?;
        let database_max_lifetime_secs = env::var("DATABASE_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .context("DATABASE_MAX_LIFETIME_SECS must be an integer")?;
        let database_connect_attempts = env::var("DATABASE_CONNECT_ATTEMPTS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_CONNECT_ATTEMPTS);
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("SERVER_PORT must be a valid u16")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let jwt_issuer =
            env::var("JWT_ISSUER").unwrap_or_else(|_| "campaign-backend".to_string());
        let jwt_audience =
            env::var("JWT_AUDIENCE").unwrap_or_else(|_| "campaign-backend-clients".to_string());
        let jwt_expiry_minutes = env::var("JWT_EXPIRY_MINUTES")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .context("JWT_EXPIRY_MINUTES must be an integer")?;
        let cors_allowed_origin = env::var("CORS_ALLOWED_ORIGIN").ok();
        let max_date_difference_days = env::var("CAMPAIGN_MAX_DATE_DIFFERENCE_DAYS")
            .unwrap_or_else(|_| DEFAULT_MAX_DATE_DIFFERENCE_DAYS.to_string())
            .parse()
            .context("CAMPAIGN_MAX_DATE_DIFFERENCE_DAYS must be an integer")?;
        let pagination_default_limit = env::var("PAGINATION_DEFAULT_LIMIT")
            .unwrap_or_else(|_| DEFAULT_PAGE_LIMIT.to_string())
            .parse()
            .context("PAGINATION_DEFAULT_LIMIT must be an integer")?;
        let pagination_default_sort =
            env::var("PAGINATION_DEFAULT_SORT").unwrap_or_else(|_| DEFAULT_SORT.to_string());

        Ok(Self {
            database_url,
            database_max_pool_size,
            database_min_idle,
            database_max_lifetime_secs,
            database_connect_attempts,
            server_host,
            server_port,
            jwt_secret,
            jwt_issuer,
            jwt_audience,
            jwt_expiry_minutes,
            cors_allowed_origin,
            max_date_difference_days,
            pagination_default_limit,
            pagination_default_sort,
        })
    }

    pub fn redacted_database_url(&self) -> String {
        redact_database_url(&self.database_url)
    }
}

fn redact_database_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("*****"));
            }
            parsed.to_string()
        }
        Err(_) => "***".to_string(),
    }
}
