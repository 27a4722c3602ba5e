//! Loading a month of work-time rows from the configured source.

use std::path::Path;

use crate::analytics::parse_record_date;
use crate::client::WarehouseClient;
use crate::config::{AppConfig, SourceKind};
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{AttendanceRecord, ReportPeriod};
use tracing::{info, warn};

/// Load every row of the period from the source selected in config.
pub async fn load_records(config: &AppConfig, period: ReportPeriod) -> Result<Vec<AttendanceRecord>> {
    let start = std::time::Instant::now();

    let records = match config.source.kind {
        SourceKind::Warehouse => {
            let client = WarehouseClient::from_env(&config.warehouse)?;
            client.fetch_month(&config.warehouse.table_path(), period).await?
        }
        SourceKind::Database => {
            let conn = db::connect(&config.database).await?;
            db::work_time::get_by_period(&conn, &config.database, period).await?
        }
        SourceKind::File => load_file(&config.file.path, period)?,
    };

    let undated = records.iter().filter(|r| parse_record_date(&r.date).is_none()).count();
    if undated > 0 {
        warn!("{undated} rows have an unparseable date and will not count toward weekly hours");
    }

    info!(
        "Loaded {} rows for {period} from {:?} (took {:.1}s)",
        records.len(),
        config.source.kind,
        start.elapsed().as_secs_f64()
    );
    Ok(records)
}

/// Read a JSON array of warehouse rows and keep those dated within the period.
///
/// Rows whose date does not parse are kept; they are still part of the batch
/// the dump was taken for.
pub fn load_file(path: &Path, period: ReportPeriod) -> Result<Vec<AttendanceRecord>> {
    let content = std::fs::read_to_string(path)?;
    let rows: Vec<AttendanceRecord> = serde_json::from_str(&content)?;
    let total = rows.len();

    let records: Vec<AttendanceRecord> = rows
        .into_iter()
        .filter(|row| match parse_record_date(&row.date) {
            Some(date) => date >= period.start_date() && date <= period.end_date(),
            None => true,
        })
        .collect();

    if records.len() < total {
        info!("Skipped {} rows outside {period}", total - records.len());
    }
    Ok(records)
}

/// Check that the configured source is reachable.
pub async fn check_source(config: &AppConfig) -> Result<String> {
    match config.source.kind {
        SourceKind::Warehouse => {
            let client = WarehouseClient::from_env(&config.warehouse)?;
            if client.test_connection().await? {
                Ok(format!("Warehouse reachable: {}", config.warehouse.table_path()))
            } else {
                Err(AppError::warehouse("Warehouse rejected the test query"))
            }
        }
        SourceKind::Database => {
            let conn = db::connect(&config.database).await?;
            let status = db::check(&conn, &config.database, ReportPeriod::current()).await?;
            Ok(format!("{}; {} rows this month", status.server, status.month_rows))
        }
        SourceKind::File => {
            if config.file.path.exists() {
                Ok(format!("File source: {}", config.file.path.display()))
            } else {
                Err(AppError::config(format!("File not found: {}", config.file.path.display())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_file_filters_period() {
        let path = std::env::temp_dir().join(format!("worktime-source-{}.json", std::process::id()));
        let json = r#"[
            { "EMPNUM": "1", "TMDATE": "2026-01-31", "WEEKTX": "토" },
            { "EMPNUM": "1", "TMDATE": "2026-02-01", "WEEKTX": "일" },
            { "EMPNUM": "2", "TMDATE": "???", "WEEKTX": "월" }
        ]"#;
        std::fs::write(&path, json).unwrap();

        let period = ReportPeriod::new(2026, 1).unwrap();
        let records = load_file(&path, period).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "2026-01-31");
        assert_eq!(records[1].employee_id, "2");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_file_missing() {
        let path = std::env::temp_dir().join("worktime-source-does-not-exist.json");
        let period = ReportPeriod::new(2026, 1).unwrap();
        assert!(matches!(load_file(&path, period), Err(AppError::Io(_))));
    }
}
