//! Deterministic completion source for local development and fallback.

use async_trait::async_trait;

use crate::{
   error::RagError,
   filters::FilterSet,
   rag::SqlCompleter,
   sql,
   types::{McpPayload, RagCompletion},
};

/// Confidence derived from how constrained the payload is. More populated
/// filter fields mean a more specific statement; capped below 1.0 because
/// the renderer never sees row-level evidence.
pub fn derived_confidence(filters: &FilterSet) -> f64 {
   (0.5 + 0.1 * filters.active_fields() as f64).min(0.95)
}

/// Builds the completion the deterministic synthesizer would produce.
///
/// Also used by the pipeline as the fallback when an external completion
/// source fails or returns no statement.
pub fn deterministic_completion(filters: &FilterSet, row_limit: usize) -> RagCompletion {
   RagCompletion {
      sql_intent:       sql::render_select(filters, row_limit),
      confidence:       derived_confidence(filters),
      source_documents: Vec::new(),
   }
}

/// Completion source backed entirely by the deterministic synthesizer.
#[derive(Debug, Clone)]
pub struct MockCompleter {
   row_limit: usize,
}

impl MockCompleter {
   pub const fn new(row_limit: usize) -> Self {
      Self { row_limit }
   }
}

#[async_trait]
impl SqlCompleter for MockCompleter {
   async fn complete(&self, payload: &McpPayload) -> Result<RagCompletion, RagError> {
      Ok(deterministic_completion(&payload.filters, self.row_limit))
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::filters::DepthRange;

   #[test]
   fn confidence_is_deterministic_and_capped() {
      let empty = FilterSet::default();
      assert_eq!(derived_confidence(&empty), 0.5);
      assert_eq!(derived_confidence(&empty), derived_confidence(&empty));

      let constrained = FilterSet {
         variables: Some(vec!["salinity".to_string()]),
         depth_range: Some(DepthRange::new(0.0, 100.0).unwrap()),
         ..Default::default()
      };
      assert_eq!(derived_confidence(&constrained), 0.7);
   }
}
