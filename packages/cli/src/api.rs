//! API Client
//!
//! HTTP client for the remote agent engine. Every remote failure is
//! classified into one `EngineError` kind, most specific first; no call is
//! ever retried.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Error kinds for remote calls, ordered most specific first.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("failed precondition: {message}")]
    PreconditionFailed { message: String },

    #[error("API call failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("connection failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// A deployed agent engine.
#[derive(Debug, Clone, Deserialize)]
pub struct Engine {
    pub name: String,
    pub display_name: String,
    pub create_time: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A chat session scoped to a user and an engine.
#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
pub struct Session {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EngineList {
    #[serde(default)]
    engines: Vec<Engine>,
}

#[derive(Debug, Deserialize)]
struct SessionList {
    #[serde(default)]
    sessions: Vec<Session>,
}

#[derive(Debug, Serialize)]
pub struct CreateEngineRequest {
    pub display_name: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub agent_package: String,
    pub staging_bucket: String,
    pub agent: Value,
}

#[derive(Debug, Serialize)]
struct CreateSessionRequest<'a> {
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    user_id: &'a str,
    message: &'a str,
}

pub struct EngineClient {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    location: String,
}

impl EngineClient {
    /// Create from the loaded deployment config
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;

        debug!(
            project = %config.project_id,
            location = %config.location,
            staging_bucket = %config.staging_bucket,
            "initializing agent engine client"
        );

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            project_id: config.project_id.clone(),
            location: config.location.clone(),
        })
    }

    /// Resolve a short engine ID to the fully-qualified resource name.
    /// IDs that already carry a `projects/` prefix pass through unchanged.
    pub fn full_resource_name(&self, engine_id: &str) -> String {
        if engine_id.contains("projects/") {
            return engine_id.to_string();
        }
        format!(
            "projects/{}/locations/{}/engines/{}",
            self.project_id, self.location, engine_id
        )
    }

    fn engines_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/engines",
            self.base_url, self.project_id, self.location
        )
    }

    fn engine_url(&self, engine_id: &str) -> String {
        format!("{}/v1/{}", self.base_url, self.full_resource_name(engine_id))
    }

    /// Deploy a new agent
    pub async fn create_engine(
        &self,
        request: &CreateEngineRequest,
    ) -> Result<Engine, EngineError> {
        let url = self.engines_url();
        debug!(url = %url, "creating engine");
        let response = self.client.post(&url).json(request).send().await?;
        parse(response).await
    }

    /// List all deployments in the project
    pub async fn list_engines(&self) -> Result<Vec<Engine>, EngineError> {
        let url = self.engines_url();
        debug!(url = %url, "listing engines");
        let response = self.client.get(&url).send().await?;
        let list: EngineList = parse(response).await?;
        Ok(list.engines)
    }

    /// Fetch a single deployment by ID
    pub async fn get_engine(&self, engine_id: &str) -> Result<Engine, EngineError> {
        let url = self.engine_url(engine_id);
        debug!(url = %url, "fetching engine");
        let response = self.client.get(&url).send().await?;
        parse(response).await
    }

    /// Delete a deployment. With `force`, child resources are removed too.
    pub async fn delete_engine(&self, engine_id: &str, force: bool) -> Result<(), EngineError> {
        let url = format!("{}?force={}", self.engine_url(engine_id), force);
        debug!(url = %url, "deleting engine");
        let response = self.client.delete(&url).send().await?;
        expect_success(response).await
    }

    /// Create a chat session for a user on the given engine
    pub async fn create_session(
        &self,
        engine_id: &str,
        user_id: &str,
    ) -> Result<Session, EngineError> {
        let url = format!("{}/sessions", self.engine_url(engine_id));
        debug!(url = %url, user_id, "creating session");
        let response = self
            .client
            .post(&url)
            .json(&CreateSessionRequest { user_id })
            .send()
            .await?;
        parse(response).await
    }

    /// List a user's sessions on the given engine
    pub async fn list_sessions(
        &self,
        engine_id: &str,
        user_id: &str,
    ) -> Result<Vec<Session>, EngineError> {
        let url = format!(
            "{}/sessions?user_id={}",
            self.engine_url(engine_id),
            user_id
        );
        debug!(url = %url, "listing sessions");
        let response = self.client.get(&url).send().await?;
        let list: SessionList = parse(response).await?;
        Ok(list.sessions)
    }

    /// Send a message into a session. The response body is a finite NDJSON
    /// stream of chunks, consumed by the caller.
    pub async fn stream_query(
        &self,
        engine_id: &str,
        session_id: &str,
        user_id: &str,
        message: &str,
    ) -> Result<reqwest::Response, EngineError> {
        let url = format!(
            "{}/sessions/{}:streamQuery",
            self.engine_url(engine_id),
            session_id
        );
        debug!(url = %url, "sending chat message");
        let response = self
            .client
            .post(&url)
            .json(&QueryRequest { user_id, message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error(status, &body));
        }
        Ok(response)
    }
}

/// Final path segment of a resource name, for display.
pub fn short_id(resource_name: &str) -> &str {
    resource_name
        .rsplit('/')
        .next()
        .unwrap_or(resource_name)
}

async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, EngineError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(classify_error(status, &body));
    }
    response
        .json()
        .await
        .map_err(|e| EngineError::Unexpected(format!("invalid response body: {}", e)))
}

async fn expect_success(response: reqwest::Response) -> Result<(), EngineError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(classify_error(status, &body));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

/// Classify a non-success response into an `EngineError`, most specific
/// kind first.
fn classify_error(status: StatusCode, body: &str) -> EngineError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_default();

    let message = if !detail.message.is_empty() {
        detail.message
    } else if !body.trim().is_empty() {
        body.trim().to_string()
    } else {
        status.to_string()
    };

    if status == StatusCode::NOT_FOUND || detail.status == "NOT_FOUND" {
        EngineError::NotFound { message }
    } else if status == StatusCode::PRECONDITION_FAILED
        || detail.status == "FAILED_PRECONDITION"
    {
        EngineError::PreconditionFailed { message }
    } else {
        EngineError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Incremental decoder for a newline-delimited JSON stream. Buffers partial
/// lines across network chunks and yields one value per complete line.
#[derive(Default)]
pub struct NdjsonDecoder {
    buf: Vec<u8>,
}

impl NdjsonDecoder {
    /// Feed a network chunk; returns every chunk completed by it, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<Value>, EngineError> {
        self.buf.extend_from_slice(chunk);

        let mut out = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            if let Some(value) = parse_line(&line)? {
                out.push(value);
            }
        }
        Ok(out)
    }

    /// Flush a trailing line the server did not terminate with a newline.
    pub fn finish(&mut self) -> Result<Option<Value>, EngineError> {
        let rest = std::mem::take(&mut self.buf);
        parse_line(&rest)
    }
}

fn parse_line(line: &[u8]) -> Result<Option<Value>, EngineError> {
    let text = std::str::from_utf8(line)
        .map_err(|e| EngineError::Unexpected(format!("stream chunk is not UTF-8: {}", e)))?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| EngineError::Unexpected(format!("invalid stream chunk: {}", e)))
}
