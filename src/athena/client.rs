use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_athena::error::DisplayErrorContext;
use aws_sdk_athena::types::{
    QueryExecutionContext, QueryExecutionState, ResultConfiguration, Row,
};
use aws_sdk_athena::Client;
use std::time::Duration;
use tracing::debug;

use super::types::{AthenaError, QueryResult};
use super::QuerySource;

const DATA_CATALOG: &str = "AwsDataCatalog";

/// Connection settings for [`AthenaSource`].
#[derive(Debug, Clone)]
pub struct AthenaSourceConfig {
    pub region: String,
    /// S3 location Athena writes query results to.
    pub staging_dir: String,
    pub database: String,
    pub workgroup: Option<String>,
    pub poll_interval: Duration,
}

/// Runs queries through the Athena API and collects every result page.
pub struct AthenaSource {
    client: Client,
    config: AthenaSourceConfig,
}

impl AthenaSource {
    /// Builds a client for the configured region using the default AWS
    /// credential chain.
    pub async fn connect(config: AthenaSourceConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;
        AthenaSource {
            client: Client::new(&sdk_config),
            config,
        }
    }

    async fn start(&self, sql: &str) -> Result<String, AthenaError> {
        let context = QueryExecutionContext::builder()
            .catalog(DATA_CATALOG)
            .database(&self.config.database)
            .build();
        let output = ResultConfiguration::builder()
            .output_location(&self.config.staging_dir)
            .build();

        let started = self
            .client
            .start_query_execution()
            .query_string(sql)
            .query_execution_context(context)
            .result_configuration(output)
            .set_work_group(self.config.workgroup.clone())
            .send()
            .await
            .map_err(|e| AthenaError::Sdk(DisplayErrorContext(e).to_string()))?;

        started
            .query_execution_id()
            .map(str::to_string)
            .ok_or(AthenaError::MissingExecutionId)
    }

    async fn wait(&self, execution_id: &str) -> Result<(), AthenaError> {
        loop {
            let execution = self
                .client
                .get_query_execution()
                .query_execution_id(execution_id)
                .send()
                .await
                .map_err(|e| AthenaError::Sdk(DisplayErrorContext(e).to_string()))?;

            let status = execution.query_execution().and_then(|q| q.status());
            match status.and_then(|s| s.state()) {
                Some(QueryExecutionState::Succeeded) => return Ok(()),
                Some(state)
                    if matches!(
                        state,
                        QueryExecutionState::Failed | QueryExecutionState::Cancelled
                    ) =>
                {
                    return Err(AthenaError::QueryFailed {
                        execution_id: execution_id.to_string(),
                        state: state.as_str().to_string(),
                        reason: status
                            .and_then(|s| s.state_change_reason())
                            .unwrap_or("no reason given")
                            .to_string(),
                    });
                }
                state => {
                    debug!(execution_id, ?state, "query still running");
                    tokio::time::sleep(self.config.poll_interval).await;
                }
            }
        }
    }

    async fn fetch(&self, execution_id: &str) -> Result<QueryResult, AthenaError> {
        let mut result = QueryResult::default();
        let mut next_token: Option<String> = None;
        let mut first_page = true;

        loop {
            let page = self
                .client
                .get_query_results()
                .query_execution_id(execution_id)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| AthenaError::Sdk(DisplayErrorContext(e).to_string()))?;

            if let Some(set) = page.result_set() {
                if first_page {
                    result.columns = set
                        .result_set_metadata()
                        .map(|m| m.column_info().iter().map(|c| c.name().to_string()).collect())
                        .unwrap_or_default();
                }
                let mut rows = convert_rows(set.rows());
                if first_page && rows.first().is_some_and(|r| is_header_row(r, &result.columns)) {
                    rows.remove(0);
                }
                result.rows.extend(rows);
            }
            first_page = false;

            match page.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(result)
    }
}

#[async_trait]
impl QuerySource for AthenaSource {
    async fn query(&self, sql: &str) -> Result<QueryResult, AthenaError> {
        let execution_id = self.start(sql).await?;
        debug!(%execution_id, "query submitted");
        self.wait(&execution_id).await?;
        self.fetch(&execution_id).await
    }
}

fn convert_rows(rows: &[Row]) -> Vec<Vec<Option<String>>> {
    rows.iter()
        .map(|row| {
            row.data()
                .iter()
                .map(|d| d.var_char_value().map(str::to_string))
                .collect()
        })
        .collect()
}

/// Athena repeats the column labels as the first row of the first page.
fn is_header_row(row: &[Option<String>], columns: &[String]) -> bool {
    !columns.is_empty()
        && row.len() == columns.len()
        && row
            .iter()
            .zip(columns)
            .all(|(cell, column)| cell.as_deref() == Some(column.as_str()))
}
