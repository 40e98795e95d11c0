//! Shared payload and session types passed between pipeline stages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::filters::FilterSet;

/// A single result row from the relational executor, keyed by column name.
pub type Row = serde_json::Map<String, Value>;

/// Unit system preference attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
   #[default]
   Metric,
   Imperial,
}

/// Stored per-session record. Copy-on-update; `created_at` never changes
/// after the first upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
   pub session_id:      String,
   pub user_id:         Option<String>,
   pub preferred_units: Units,
   pub notes:           Option<String>,
   pub created_at:      DateTime<Utc>,
   pub updated_at:      DateTime<Utc>,
}

/// Partial session update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionUpsert {
   pub session_id:      Option<String>,
   pub user_id:         Option<String>,
   pub preferred_units: Option<Units>,
   pub notes:           Option<String>,
}

/// The immutable unit passed between extraction, validation, synthesis, and
/// execution. Created fresh per request, never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpPayload {
   pub session_id: String,
   pub query:      String,
   pub filters:    FilterSet,
   #[serde(default)]
   pub metadata:   serde_json::Map<String, Value>,
   pub sql_intent: Option<String>,
}

/// Column ordering hint attached to every payload so retrieval backends can
/// align their metadata schema.
pub fn vector_schema_hint() -> Value {
   Value::Array(
      ["float_id", "profile_time", "lat", "lon", "variables", "depth_range"]
         .iter()
         .map(|c| Value::String((*c).to_string()))
         .collect(),
   )
}

/// Completion returned by a SQL-completion collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagCompletion {
   pub sql_intent:       String,
   /// Deterministically derived from the payload; never random.
   pub confidence:       f64,
   #[serde(default)]
   pub source_documents: Vec<Value>,
}

/// End-to-end outcome of a query: the executed statement plus its rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecOutcome {
   pub sql:              String,
   pub confidence:       f64,
   pub row_count:        usize,
   pub rows:             Vec<Row>,
   #[serde(default)]
   pub source_documents: Vec<Value>,
   pub payload:          McpPayload,
}
