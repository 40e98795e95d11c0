//! Relational executor collaborator boundary.
//!
//! Executors receive statements that have already passed the safety gate;
//! they never see an ungated string. Failures propagate to the caller
//! unchanged, with no internal retry.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::{config::Config, error::ExecError, types::Row};

/// Read-only SQL execution against the profile store.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
   async fn execute(&self, sql: &str) -> Result<Vec<Row>, ExecError>;
}

#[derive(Serialize)]
struct ExecRequest<'a> {
   sql: &'a str,
}

/// Executor posting statements to a read-only HTTP SQL endpoint that returns
/// a JSON array of row objects.
pub struct HttpExecutor {
   endpoint: String,
   client:   reqwest::Client,
}

impl HttpExecutor {
   /// Builds an executor from config; fails when no endpoint is configured.
   pub fn from_config(cfg: &Config) -> Result<Self, ExecError> {
      if cfg.sql_endpoint.trim().is_empty() {
         return Err(ExecError::NoEndpoint);
      }
      let client = reqwest::Client::builder()
         .timeout(Duration::from_secs(cfg.request_timeout_secs))
         .build()?;
      Ok(Self { endpoint: cfg.sql_endpoint.trim_end_matches('/').to_string(), client })
   }
}

/// Placeholder executor for flows that never reach execution (planning,
/// dry runs). Always fails with [`ExecError::NoEndpoint`].
pub struct NullExecutor;

#[async_trait]
impl SqlExecutor for NullExecutor {
   async fn execute(&self, _sql: &str) -> Result<Vec<Row>, ExecError> {
      Err(ExecError::NoEndpoint)
   }
}

#[async_trait]
impl SqlExecutor for HttpExecutor {
   async fn execute(&self, sql: &str) -> Result<Vec<Row>, ExecError> {
      let response = self
         .client
         .post(format!("{}/query", self.endpoint))
         .json(&ExecRequest { sql })
         .send()
         .await?;

      let status = response.status();
      if !status.is_success() {
         let detail = response.text().await.unwrap_or_default();
         return Err(ExecError::StatusCode { status: status.as_u16(), detail });
      }

      let body: Value = response.json().await?;
      let Value::Array(items) = body else {
         return Err(ExecError::MalformedResponse("expected a JSON array of rows".to_string()));
      };

      items
         .into_iter()
         .map(|item| match item {
            Value::Object(row) => Ok(row),
            other => Err(ExecError::MalformedResponse(format!(
               "expected a row object, got {other}"
            ))),
         })
         .collect()
   }
}
