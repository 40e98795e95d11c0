//! SQL-completion collaborator boundary.
//!
//! A [`SqlCompleter`] turns an MCP payload into a candidate SQL statement.
//! Implementations are external services consumed as opaque interfaces; the
//! pipeline treats them as fallible calls with no internal retry and falls
//! back to the deterministic synthesizer when they fail.

pub mod mock;
pub mod ollama;

use async_trait::async_trait;

use crate::{
   error::RagError,
   types::{McpPayload, RagCompletion},
};

/// Completion source producing SQL for a query payload.
#[async_trait]
pub trait SqlCompleter: Send + Sync {
   async fn complete(&self, payload: &McpPayload) -> Result<RagCompletion, RagError>;
}

pub use mock::MockCompleter;
pub use ollama::OllamaCompleter;
