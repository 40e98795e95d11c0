//! Ollama-backed SQL completion over `/api/generate`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
   config::Config,
   error::RagError,
   rag::{SqlCompleter, mock},
   types::{McpPayload, RagCompletion},
};

/// System prompt constraining the model to a single SELECT against the
/// profile schema.
const SQL_SYSTEM_PROMPT: &str = "You are an expert ocean data assistant. Given a user question, \
                                 output ONE valid PostgreSQL SQL statement for table \
                                 argo_profiles with columns: float_id, time, lat, lon, variable, \
                                 value. Rules:\n- Apply any constraints present in the question \
                                 (lat/lon ranges, time_range, variables, depth_range).\n- Use \
                                 BETWEEN for numeric/date ranges.\n- Return ONLY the SQL. No \
                                 commentary.\n- LIMIT 200 rows.";

#[derive(Serialize)]
struct GenerateOptions {
   temperature: f32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
   model:   &'a str,
   system:  &'a str,
   prompt:  String,
   stream:  bool,
   options: GenerateOptions,
}

#[derive(Deserialize)]
struct GenerateResponse {
   response: String,
}

/// Completion source calling an Ollama endpoint.
pub struct OllamaCompleter {
   endpoint:    String,
   model:       String,
   temperature: f32,
   row_limit:   usize,
   client:      reqwest::Client,
}

impl OllamaCompleter {
   pub fn new(cfg: &Config) -> Result<Self, RagError> {
      let client = reqwest::Client::builder()
         .timeout(Duration::from_secs(cfg.request_timeout_secs))
         .build()?;
      Ok(Self {
         endpoint:    cfg.ollama_endpoint.trim_end_matches('/').to_string(),
         model:       cfg.ollama_model.clone(),
         temperature: cfg.ollama_temperature,
         row_limit:   cfg.effective_sql_row_limit(),
         client,
      })
   }

   /// Embeds the structured filters into the question text so the model can
   /// honor constraints the free text only implies.
   fn question_with_filters(payload: &McpPayload) -> String {
      if payload.filters.is_empty() {
         return payload.query.clone();
      }
      let filters_json =
         serde_json::to_string(&payload.filters).unwrap_or_else(|_| "{}".to_string());
      format!("{}\n\nFilters (JSON): {}", payload.query, filters_json)
   }
}

#[async_trait]
impl SqlCompleter for OllamaCompleter {
   async fn complete(&self, payload: &McpPayload) -> Result<RagCompletion, RagError> {
      let request = GenerateRequest {
         model:   &self.model,
         system:  SQL_SYSTEM_PROMPT,
         prompt:  Self::question_with_filters(payload),
         stream:  false,
         options: GenerateOptions { temperature: self.temperature },
      };

      let response = self
         .client
         .post(format!("{}/api/generate", self.endpoint))
         .json(&request)
         .send()
         .await?;

      let status = response.status();
      if !status.is_success() {
         return Err(RagError::StatusCode(status.as_u16()));
      }

      let body: GenerateResponse = response.json().await?;
      let sql_intent = body.response.trim().to_string();
      if sql_intent.is_empty() {
         return Err(RagError::EmptyCompletion);
      }

      tracing::debug!(model = %self.model, "completion received");
      Ok(RagCompletion {
         sql_intent,
         confidence: mock::derived_confidence(&payload.filters),
         source_documents: Vec::new(),
      })
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::filters::{FilterSet, LatRange};

   fn payload(filters: FilterSet) -> McpPayload {
      McpPayload {
         session_id: "s1".to_string(),
         query:      "show salinity near the equator".to_string(),
         filters,
         metadata:   serde_json::Map::new(),
         sql_intent: None,
      }
   }

   #[test]
   fn question_embeds_filters_only_when_present() {
      let bare = payload(FilterSet::default());
      assert_eq!(OllamaCompleter::question_with_filters(&bare), bare.query);

      let constrained = payload(FilterSet {
         lat_range: Some(LatRange { low: -5.0, high: 5.0 }),
         ..Default::default()
      });
      let question = OllamaCompleter::question_with_filters(&constrained);
      assert!(question.starts_with(&constrained.query));
      assert!(question.contains("Filters (JSON)"));
      assert!(question.contains("lat_range"));
   }
}
