//! Work-time rows from the PostgreSQL mirror of the warehouse table.

use crate::config::DatabaseConfig;
use crate::models::{AttendanceRecord, ReportPeriod};
use sea_orm::*;

/// Select list mapping the upper-case warehouse columns onto record fields.
/// Nullable text columns come back as empty strings.
const SELECT_COLUMNS: &str = r#"
    COALESCE("ORGAID", '') AS department_code,
    COALESCE("ORGTXT", '') AS department_name,
    COALESCE("EMPNUM", '') AS employee_id,
    COALESCE("NAMEKO", '') AS employee_name,
    COALESCE("TITEXT", '') AS title,
    COALESCE("LETEXT", '') AS rank,
    COALESCE("TMDATE", '') AS date,
    COALESCE("WEEKTX", '') AS weekday,
    COALESCE("WKSCTX", '') AS shift_type,
    COALESCE("BETIME", '') AS clock_in,
    COALESCE("EDTIME", '') AS clock_out,
    COALESCE("RETEXT", '') AS remark
"#;

fn month_sql(config: &DatabaseConfig) -> String {
    format!(
        r#"
        SELECT {SELECT_COLUMNS}
        FROM "{schema}"."{table}"
        WHERE "TMDATE" BETWEEN $1 AND $2
        ORDER BY "TMDATE", "EMPNUM"
        "#,
        schema = config.schema,
        table = config.table,
    )
}

/// Get all rows dated within the period.
pub async fn get_by_period(
    db: &DatabaseConnection,
    config: &DatabaseConfig,
    period: ReportPeriod,
) -> Result<Vec<AttendanceRecord>, DbErr> {
    let start = period.start_date().format("%Y-%m-%d").to_string();
    let end = period.end_date().format("%Y-%m-%d").to_string();

    AttendanceRecord::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        month_sql(config),
        [start.into(), end.into()],
    ))
    .all(db)
    .await
}

/// Count rows dated within the period.
pub async fn count_by_period(
    db: &DatabaseConnection,
    config: &DatabaseConfig,
    period: ReportPeriod,
) -> Result<i64, DbErr> {
    let start = period.start_date().format("%Y-%m-%d").to_string();
    let end = period.end_date().format("%Y-%m-%d").to_string();
    let sql = format!(
        r#"SELECT COUNT(*) AS count FROM "{schema}"."{table}" WHERE "TMDATE" BETWEEN $1 AND $2"#,
        schema = config.schema,
        table = config.table,
    );

    let row = db
        .query_one(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [start.into(), end.into()],
        ))
        .await?;

    match row {
        Some(row) => row.try_get("", "count"),
        None => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_sql_uses_configured_table() {
        let config = DatabaseConfig {
            schema: "hr".to_string(),
            table: "work_time".to_string(),
            ..Default::default()
        };
        let sql = month_sql(&config);

        assert!(sql.contains(r#"FROM "hr"."work_time""#));
        assert!(sql.contains(r#"BETWEEN $1 AND $2"#));
        assert!(sql.contains("AS clock_in"));
    }
}
