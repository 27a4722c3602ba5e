//! Connection to the PostgreSQL mirror and its reachability check.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr, Statement};
use std::time::Duration;
use tracing::debug;
use tracing::log::LevelFilter;

use super::work_time;
use crate::config::DatabaseConfig;
use crate::models::ReportPeriod;

/// What `check` found on the mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorStatus {
    pub server: String,
    pub month_rows: i64,
}

/// Open a small pool against the configured mirror.
///
/// A report run issues one query, so the pool stays at two connections.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    debug!("Connecting to {}:{}/{}", config.host, config.port, config.name);

    let mut opt = ConnectOptions::new(config.connection_string());
    opt.max_connections(2)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(opt).await
}

/// Confirm the server answers and count the period's rows in the work-time table.
pub async fn check(db: &DatabaseConnection, config: &DatabaseConfig, period: ReportPeriod) -> Result<MirrorStatus, DbErr> {
    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT version() AS version",
        ))
        .await?;

    let server = match row {
        Some(row) => short_version(&row.try_get::<String>("", "version")?),
        None => "PostgreSQL (unknown version)".to_owned(),
    };
    let month_rows = work_time::count_by_period(db, config, period).await?;

    Ok(MirrorStatus { server, month_rows })
}

/// `PostgreSQL 16.2 on x86_64-pc-linux-gnu, ...` -> `PostgreSQL 16.2`.
fn short_version(full: &str) -> String {
    full.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}
