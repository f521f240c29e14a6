use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;

use super::types::SupabaseError;
use super::RestTable;

const REST_PATH: &str = "rest/v1";

/// Supabase project client; cheap to clone.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    rest_url: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, SupabaseError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(SupabaseError::InvalidConfig("base URL is empty".to_string()));
        }
        if api_key.trim().is_empty() {
            return Err(SupabaseError::InvalidConfig("API key is empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| SupabaseError::InvalidConfig(format!("API key: {e}")))?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| SupabaseError::InvalidConfig(format!("API key: {e}")))?;
        bearer.set_sensitive(true);
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder().default_headers(headers).build()?;

        Ok(SupabaseClient {
            http,
            rest_url: format!("{base_url}/{REST_PATH}"),
        })
    }

    /// Returns a client scoped to one table.
    pub fn table(&self, name: &str) -> TableClient {
        TableClient {
            http: self.http.clone(),
            name: name.to_string(),
            url: format!("{}/{}", self.rest_url, name),
        }
    }
}

pub struct TableClient {
    http: Client,
    name: String,
    url: String,
}

impl TableClient {
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RestTable for TableClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn delete_neq(&self, column: &str, value: &str) -> Result<(), SupabaseError> {
        debug!(table = %self.name, column, value, "delete where not equal");
        let response = self
            .http
            .delete(&self.url)
            .query(&[(column, neq_filter(value))])
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn insert_rows(&self, rows: &[Value]) -> Result<Option<Vec<Value>>, SupabaseError> {
        debug!(table = %self.name, rows = rows.len(), "insert");
        let response = self
            .http
            .post(&self.url)
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;
        let body = check_status(response).await?;
        parse_representation(&body)
    }
}

fn neq_filter(value: &str) -> String {
    format!("neq.{value}")
}

async fn check_status(response: Response) -> Result<String, SupabaseError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(SupabaseError::Api {
            status: status.as_u16(),
            message: api_message(&body),
        });
    }
    Ok(body)
}

/// PostgREST error bodies are JSON objects with a `message` field.
fn api_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn parse_representation(body: &str) -> Result<Option<Vec<Value>>, SupabaseError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<Value>(body)? {
        Value::Array(rows) => Ok(Some(rows)),
        Value::Null => Ok(None),
        other => Err(SupabaseError::UnexpectedBody(other.to_string())),
    }
}
