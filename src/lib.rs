//! argoql — a natural-language query gateway for ARGO oceanographic float
//! profiles.
//!
//! The pipeline turns free text into a structured [`FilterSet`], validates it
//! against domain limits, and renders it two ways: a deterministic SQL SELECT
//! against the `argo_profiles` schema, and a metadata filter for a
//! vector-retrieval backend. Completions from an external LLM pass through a
//! safety gate before any statement reaches the relational executor.

pub mod cmd;
pub mod config;
pub mod error;
pub mod exec;
pub mod extract;
pub mod filters;
pub mod pipeline;
pub mod rag;
pub mod retrieval;
pub mod safety;
pub mod session;
pub mod sql;
pub mod types;
pub mod validate;

pub use config::Config;
pub use error::{
   Error, ExecError, FilterError, RagError, Result, SafetyError, ValidationError,
};
pub use filters::{BoundingBox, DepthRange, FilterSet, LatRange, LonRange, TimeRange};
pub use types::{ExecOutcome, McpPayload, RagCompletion, Row, SessionContext, SessionUpsert};
