//! Warehouse HTTP client for the work-time table.

use crate::config::WarehouseConfig;
use crate::error::{AppError, Result};
use crate::models::{AttendanceRecord, ReportPeriod};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

/// Polls allowed while the query job is still running.
const MAX_PENDING_POLLS: usize = 30;

/// How long the warehouse may hold each results request open, in milliseconds.
const POLL_TIMEOUT_MS: u32 = 10_000;

/// Warehouse SQL client (BigQuery REST `jobs.query` / `getQueryResults`).
///
/// Runs one parameterised query per month and follows page tokens until
/// every row has been read.
pub struct WarehouseClient {
    client: Client,
    base_url: String,
    project_id: String,
    token: String,
    page_size: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    query: String,
    use_legacy_sql: bool,
    max_results: u32,
    timeout_ms: u32,
    parameter_mode: &'static str,
    query_parameters: Vec<QueryParameter>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryParameter {
    name: &'static str,
    parameter_type: ParameterType,
    parameter_value: ParameterValue,
}

#[derive(Debug, Serialize)]
struct ParameterType {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ParameterValue {
    value: String,
}

impl QueryParameter {
    fn string(name: &'static str, value: String) -> Self {
        Self {
            name,
            parameter_type: ParameterType { kind: "STRING" },
            parameter_value: ParameterValue { value },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    #[serde(default)]
    job_complete: bool,
    #[serde(default)]
    schema: Option<TableSchema>,
    #[serde(default)]
    rows: Vec<TableRow>,
    #[serde(default)]
    page_token: Option<String>,
    #[serde(default)]
    job_reference: Option<JobReference>,
}

#[derive(Debug, Deserialize)]
struct TableSchema {
    fields: Vec<FieldSchema>,
}

#[derive(Debug, Deserialize)]
struct FieldSchema {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TableRow {
    f: Vec<TableCell>,
}

#[derive(Debug, Deserialize)]
struct TableCell {
    v: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobReference {
    job_id: String,
    #[serde(default)]
    location: Option<String>,
}

/// SQL for one month of rows, ordered by date then employee.
fn month_query(table_path: &str) -> String {
    format!(
        "SELECT ORGAID, ORGTXT, EMPNUM, NAMEKO, TITEXT, LETEXT, TMDATE, WEEKTX, WKSCTX, BETIME, EDTIME, RETEXT \
         FROM {table_path} \
         WHERE TMDATE BETWEEN @start AND @end \
         ORDER BY TMDATE, EMPNUM"
    )
}

impl WarehouseClient {
    /// Create a new client instance.
    pub fn new(config: &WarehouseConfig, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            token: token.into(),
            page_size: config.page_size,
        })
    }

    /// Create a client with the token taken from the configured environment variable.
    pub fn from_env(config: &WarehouseConfig) -> Result<Self> {
        let token = std::env::var(&config.token_env)
            .map_err(|_| AppError::config(format!("Environment variable {} is not set", config.token_env)))?;
        Self::new(config, token)
    }

    /// Download every row of `table_path` dated within the period.
    pub async fn fetch_month(&self, table_path: &str, period: ReportPeriod) -> Result<Vec<AttendanceRecord>> {
        let request = QueryRequest {
            query: month_query(table_path),
            use_legacy_sql: false,
            max_results: self.page_size,
            timeout_ms: POLL_TIMEOUT_MS,
            parameter_mode: "NAMED",
            query_parameters: vec![
                QueryParameter::string("start", period.start_date().format("%Y-%m-%d").to_string()),
                QueryParameter::string("end", period.end_date().format("%Y-%m-%d").to_string()),
            ],
        };

        info!("Querying warehouse for {period}");
        let url = format!("{base}/projects/{project}/queries", base = self.base_url, project = self.project_id);
        let response = self.client.post(&url).bearer_auth(&self.token).json(&request).send().await?;
        let mut page: QueryResponse = Self::read_json(response).await?;

        let mut polls = 0;
        while !page.job_complete {
            polls += 1;
            if polls > MAX_PENDING_POLLS {
                return Err(AppError::warehouse("Query did not complete in time"));
            }
            let job = Self::job_of(&page)?;
            debug!("Query job {} still running (poll {polls})", job.job_id);
            page = self.results_page(&job, None).await?;
        }

        let mut records = decode_rows(&page)?;
        let job = page.job_reference.clone();
        let mut next_token = page.page_token.take();

        while let Some(token) = next_token {
            let job = job
                .as_ref()
                .ok_or_else(|| AppError::warehouse("Paged response without a job reference"))?;
            let mut next = self.results_page(job, Some(&token)).await?;
            let rows = decode_rows(&next)?;
            debug!("Fetched page of {} rows", rows.len());
            records.extend(rows);
            next_token = next.page_token.take();
        }

        info!("Warehouse returned {} rows for {period}", records.len());
        Ok(records)
    }

    /// Fetch one page of results for a query job.
    async fn results_page(&self, job: &JobReference, page_token: Option<&str>) -> Result<QueryResponse> {
        let url = format!(
            "{base}/projects/{project}/queries/{job_id}",
            base = self.base_url,
            project = self.project_id,
            job_id = job.job_id
        );

        let mut query: Vec<(&str, String)> = vec![
            ("maxResults", self.page_size.to_string()),
            ("timeoutMs", POLL_TIMEOUT_MS.to_string()),
        ];
        if let Some(location) = &job.location {
            query.push(("location", location.clone()));
        }
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let response = self.client.get(&url).bearer_auth(&self.token).query(&query).send().await?;
        Self::read_json(response).await
    }

    async fn read_json(response: reqwest::Response) -> Result<QueryResponse> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AppError::warehouse(format!("{status}: {body}")));
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn job_of(page: &QueryResponse) -> Result<JobReference> {
        page.job_reference
            .clone()
            .ok_or_else(|| AppError::warehouse("Incomplete query without a job reference"))
    }

    /// Test connection to the warehouse with a trivial query.
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{base}/projects/{project}/queries", base = self.base_url, project = self.project_id);
        let body = serde_json::json!({ "query": "SELECT 1", "useLegacySql": false });
        let response = self.client.post(&url).bearer_auth(&self.token).json(&body).send().await?;
        Ok(response.status().is_success())
    }
}

/// Map result rows to records by column name.
fn decode_rows(page: &QueryResponse) -> Result<Vec<AttendanceRecord>> {
    if page.rows.is_empty() {
        return Ok(Vec::new());
    }

    let schema = page
        .schema
        .as_ref()
        .ok_or_else(|| AppError::warehouse("Rows returned without a schema"))?;

    page.rows
        .iter()
        .map(|row| -> Result<AttendanceRecord> {
            let object: Map<String, Value> = schema
                .fields
                .iter()
                .zip(&row.f)
                .map(|(field, cell)| (field.name.clone(), cell.v.clone()))
                .collect();
            Ok(serde_json::from_value(Value::Object(object))?)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "kind": "bigquery#queryResponse",
        "schema": { "fields": [
            { "name": "ORGTXT", "type": "STRING" },
            { "name": "EMPNUM", "type": "STRING" },
            { "name": "TMDATE", "type": "STRING" },
            { "name": "WEEKTX", "type": "STRING" },
            { "name": "BETIME", "type": "STRING" },
            { "name": "EDTIME", "type": "STRING" },
            { "name": "RETEXT", "type": "STRING" }
        ]},
        "jobReference": { "projectId": "p", "jobId": "job_1", "location": "asia-northeast3" },
        "totalRows": "2",
        "pageToken": "next-1",
        "rows": [
            { "f": [ {"v": "생산팀"}, {"v": "102001"}, {"v": "2026-01-05"}, {"v": "월"}, {"v": "08:55"}, {"v": "18:10"}, {"v": null} ] },
            { "f": [ {"v": "생산팀"}, {"v": "102002"}, {"v": "2026-01-05"}, {"v": "월"}, {"v": null}, {"v": null}, {"v": "연차"} ] }
        ],
        "jobComplete": true
    }"#;

    #[test]
    fn test_decode_rows_by_column_name() {
        let page: QueryResponse = serde_json::from_str(PAGE).unwrap();
        let records = decode_rows(&page).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].employee_id, "102001");
        assert_eq!(records[0].clock_out, "18:10");
        assert_eq!(records[0].remark, "");
        assert_eq!(records[1].clock_in, "");
        assert_eq!(records[1].remark, "연차");
        assert_eq!(records[1].title, "");

        assert_eq!(page.page_token.as_deref(), Some("next-1"));
        let job = page.job_reference.unwrap();
        assert_eq!(job.job_id, "job_1");
        assert_eq!(job.location.as_deref(), Some("asia-northeast3"));
    }

    #[test]
    fn test_decode_empty_page() {
        let page: QueryResponse = serde_json::from_str(r#"{ "jobComplete": true, "totalRows": "0" }"#).unwrap();
        assert!(decode_rows(&page).unwrap().is_empty());
    }

    #[test]
    fn test_rows_without_schema_rejected() {
        let page: QueryResponse =
            serde_json::from_str(r#"{ "jobComplete": true, "rows": [ { "f": [ {"v": "x"} ] } ] }"#).unwrap();
        assert!(matches!(decode_rows(&page), Err(AppError::Warehouse(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let request = QueryRequest {
            query: month_query("`p.hr.T`"),
            use_legacy_sql: false,
            max_results: 500,
            timeout_ms: POLL_TIMEOUT_MS,
            parameter_mode: "NAMED",
            query_parameters: vec![QueryParameter::string("start", "2026-01-01".to_string())],
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["useLegacySql"], false);
        assert_eq!(json["maxResults"], 500);
        assert_eq!(json["parameterMode"], "NAMED");
        assert_eq!(json["queryParameters"][0]["parameterType"]["type"], "STRING");
        assert_eq!(json["queryParameters"][0]["parameterValue"]["value"], "2026-01-01");
        assert!(json["query"].as_str().unwrap().contains("FROM `p.hr.T`"));
    }

    #[test]
    fn test_from_env_requires_token() {
        let config = WarehouseConfig {
            token_env: "WORKTIME_TEST_TOKEN_THAT_IS_NOT_SET".to_string(),
            ..Default::default()
        };
        assert!(matches!(WarehouseClient::from_env(&config), Err(AppError::Config(_))));
    }
}
