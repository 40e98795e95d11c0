//! Request orchestration: extraction, validation, completion, safety gate,
//! execution.

use std::sync::Arc;

use serde_json::Value;

use crate::{
   config::Config,
   error::Result,
   exec::SqlExecutor,
   extract, rag,
   rag::SqlCompleter,
   retrieval, safety,
   session::SessionStore,
   types::{ExecOutcome, McpPayload, RagCompletion, SessionUpsert, vector_schema_hint},
   validate,
};

/// End-to-end query pipeline over injected collaborators.
///
/// Stateless per request: each call runs extraction, validation, and
/// synthesis against immutable inputs; the session store is the only shared
/// mutable collaborator and guards its own upserts.
pub struct QueryPipeline {
   config:    Arc<Config>,
   sessions:  Arc<SessionStore>,
   completer: Arc<dyn SqlCompleter>,
   executor:  Arc<dyn SqlExecutor>,
}

impl QueryPipeline {
   pub fn new(
      config: Arc<Config>,
      sessions: Arc<SessionStore>,
      completer: Arc<dyn SqlCompleter>,
      executor: Arc<dyn SqlExecutor>,
   ) -> Self {
      Self { config, sessions, completer, executor }
   }

   /// Builds the MCP payload for a query: session upsert, filter extraction,
   /// validation, and retrieval metadata. No SQL is produced yet.
   pub fn plan(&self, session_id: Option<&str>, query: &str) -> Result<McpPayload> {
      let ctx = self.sessions.upsert(SessionUpsert {
         session_id: session_id.map(str::to_string),
         ..Default::default()
      });

      let filters = extract::extract_filters(query, &self.config);
      validate::validate_filters(&filters, &self.config)?;

      let mut metadata = serde_json::Map::new();
      metadata.insert("vector_schema_hint".to_string(), vector_schema_hint());
      metadata.insert(
         "retrieval_filter".to_string(),
         Value::Object(retrieval::to_metadata_filter(&filters)),
      );

      Ok(McpPayload {
         session_id: ctx.session_id,
         query: query.to_string(),
         filters,
         metadata,
         sql_intent: None,
      })
   }

   /// Obtains a SQL completion for the payload, falling back to the
   /// deterministic synthesizer when the external source fails or returns
   /// an empty statement. The fallback is contractual, not best-effort.
   pub async fn complete(&self, payload: &McpPayload) -> RagCompletion {
      match self.completer.complete(payload).await {
         Ok(completion) if !completion.sql_intent.trim().is_empty() => completion,
         Ok(_) => {
            tracing::warn!("completion source returned an empty statement; using synthesizer");
            self.deterministic_completion(payload)
         },
         Err(e) => {
            tracing::warn!("completion source failed ({e}); using synthesizer");
            self.deterministic_completion(payload)
         },
      }
   }

   fn deterministic_completion(&self, payload: &McpPayload) -> RagCompletion {
      rag::mock::deterministic_completion(
         &payload.filters,
         self.config.effective_sql_row_limit(),
      )
   }

   /// One-shot flow: plan, complete, gate, execute.
   ///
   /// The safety gate runs on whatever statement won (external or
   /// synthesized); a rejection is fatal to the request and never
   /// downgraded.
   pub async fn run(&self, session_id: Option<&str>, query: &str) -> Result<ExecOutcome> {
      let payload = self.plan(session_id, query)?;
      let completion = self.complete(&payload).await;

      let safe_sql = safety::enforce_safe_select(
         &completion.sql_intent,
         self.config.effective_exec_default_limit(),
      )?;

      let rows = self.executor.execute(&safe_sql).await?;
      tracing::info!(rows = rows.len(), "query executed");

      Ok(ExecOutcome {
         sql:              safe_sql,
         confidence:       completion.confidence,
         row_count:        rows.len(),
         rows,
         source_documents: completion.source_documents,
         payload,
      })
   }
}
