use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::ports::{BookingRepository, CatalogRepository};
use crate::domain::services::booking_service::BookingService;
use crate::error::AppError;
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_catalog_repo::PostgresCatalogRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_catalog_repo::SqliteCatalogRepo,
};
use crate::infra::seed::seed_catalog;
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let database_url = &config.database_url;

    let (catalog_repo, booking_repo): (Arc<dyn CatalogRepository>, Arc<dyn BookingRepository>) = if config.is_postgres() {
        info!("Initializing PostgreSQL connection...");

        let opts = PgConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Config(format!("Invalid Postgres URL: {}", e)))?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect_with(opts)
            .await
            .map_err(AppError::Database)?;

        run_postgres_migrations(&pool).await?;

        (
            Arc::new(PostgresCatalogRepo::new(pool.clone())),
            Arc::new(PostgresBookingRepo::new(pool)),
        )
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Config(format!("Invalid SQLite connection string: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        ensure_sqlite_parent_dir(opts.get_filename())?;

        let pool = SqlitePoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect_with(opts)
            .await
            .map_err(AppError::Database)?;

        run_sqlite_migrations(&pool).await?;

        (
            Arc::new(SqliteCatalogRepo::new(pool.clone())),
            Arc::new(SqliteBookingRepo::new(pool)),
        )
    };

    if config.seed_catalog {
        seed_catalog(catalog_repo.as_ref()).await?;
    }

    Ok(build_state(config.clone(), catalog_repo, booking_repo))
}

pub fn build_state(
    config: Config,
    catalog_repo: Arc<dyn CatalogRepository>,
    booking_repo: Arc<dyn BookingRepository>,
) -> AppState {
    let booking_service = Arc::new(BookingService::new(catalog_repo.clone(), booking_repo.clone()));
    AppState {
        config,
        catalog_repo,
        booking_repo,
        booking_service,
    }
}

fn ensure_sqlite_parent_dir(path: &std::path::Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists() {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::Config(format!("Cannot create database directory {}: {}", parent.display(), e)))?;
    }
    Ok(())
}

pub async fn run_postgres_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/postgres").run(pool).await?;
    Ok(())
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await?;
    Ok(())
}
