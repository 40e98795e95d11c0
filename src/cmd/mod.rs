//! CLI subcommand implementations.

pub mod ask;
pub mod plan;
pub mod sql;

use std::sync::Arc;

use crate::{
   config::Config,
   exec::{NullExecutor, SqlExecutor},
   pipeline::QueryPipeline,
   rag::{MockCompleter, SqlCompleter},
   session::SessionStore,
};

/// Builds a pipeline over an in-process session store for one-shot CLI use.
pub(crate) fn build_pipeline(
   cfg: &Config,
   completer: Option<Arc<dyn SqlCompleter>>,
   executor: Option<Arc<dyn SqlExecutor>>,
) -> QueryPipeline {
   let completer = completer
      .unwrap_or_else(|| Arc::new(MockCompleter::new(cfg.effective_sql_row_limit())));
   let executor = executor.unwrap_or_else(|| Arc::new(NullExecutor));
   QueryPipeline::new(
      Arc::new(cfg.clone()),
      Arc::new(SessionStore::new()),
      completer,
      executor,
   )
}
