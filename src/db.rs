use std::thread;
use std::time::Duration;

use anyhow::anyhow;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::config::AppConfig;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

pub const DEFAULT_MAX_POOL_SIZE: u32 = 10;
pub const DEFAULT_CONNECT_ATTEMPTS: u32 = 3;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Builds the pool, retrying the initial handshake a fixed number of times.
pub fn init_pool(config: &AppConfig) -> anyhow::Result<PgPool> {
    let attempts = config.database_connect_attempts.max(1);
    let mut attempt = 1;
    loop {
        match build_pool(config) {
            Ok(pool) => return Ok(pool),
            Err(err) if attempt < attempts => {
                tracing::warn!(attempt, error = %err, "database not reachable, retrying");
                thread::sleep(CONNECT_RETRY_DELAY);
                attempt += 1;
            }
            Err(err) => {
                return Err(anyhow!(
                    "failed to connect to database after {attempts} attempts: {err}"
                ))
            }
        }
    }
}

fn build_pool(config: &AppConfig) -> Result<PgPool, diesel::r2d2::PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
    let pool_size = config.database_max_pool_size.max(1);
    Pool::builder()
        .max_size(pool_size)
        .min_idle(Some(config.database_min_idle.min(pool_size)))
        .max_lifetime(Some(Duration::from_secs(config.database_max_lifetime_secs)))
        .connection_timeout(Duration::from_secs(10))
        .build(manager)
}

pub fn run_migrations(conn: &mut PgConnection) -> anyhow::Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow!("failed to run migrations: {err}"))?;
    if !applied.is_empty() {
        tracing::info!(count = applied.len(), "applied database migrations");
    }
    Ok(())
}
