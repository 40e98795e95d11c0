//! Ask command: end-to-end flow from free text to executed rows.

use std::sync::Arc;

use crate::{
   Result, config,
   exec::{HttpExecutor, SqlExecutor},
   rag::{MockCompleter, OllamaCompleter, SqlCompleter},
   safety,
};

pub struct AskOptions {
   /// Skip the external completion source and use the synthesizer directly.
   pub offline: bool,
   /// Gate and print the statement without executing it.
   pub dry_run: bool,
   pub json:    bool,
}

pub async fn execute(query: String, session: Option<String>, opts: AskOptions) -> Result<()> {
   let cfg = config::get();
   config::validate_config(cfg)?;

   let completer: Arc<dyn SqlCompleter> = if opts.offline {
      Arc::new(MockCompleter::new(cfg.effective_sql_row_limit()))
   } else {
      Arc::new(OllamaCompleter::new(cfg)?)
   };

   if opts.dry_run {
      let pipeline = super::build_pipeline(cfg, Some(completer), None);
      let payload = pipeline.plan(session.as_deref(), &query)?;
      let completion = pipeline.complete(&payload).await;
      let safe_sql =
         safety::enforce_safe_select(&completion.sql_intent, cfg.effective_exec_default_limit())?;

      if opts.json {
         println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
               "sql": safe_sql,
               "confidence": completion.confidence,
               "payload": payload,
            }))?
         );
      } else {
         println!("{safe_sql}");
      }
      return Ok(());
   }

   let executor: Arc<dyn SqlExecutor> = Arc::new(HttpExecutor::from_config(cfg)?);
   let pipeline = super::build_pipeline(cfg, Some(completer), Some(executor));
   let outcome = pipeline.run(session.as_deref(), &query).await?;

   if opts.json {
      println!("{}", serde_json::to_string_pretty(&outcome)?);
      return Ok(());
   }

   println!("{}", outcome.sql);
   println!("rows: {}", outcome.row_count);
   for row in &outcome.rows {
      println!("{}", serde_json::to_string(row)?);
   }
   Ok(())
}
