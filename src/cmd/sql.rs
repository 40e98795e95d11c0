//! Sql command: print the deterministic SELECT for a query.

use crate::{Result, config, sql};

pub fn execute(query: String, session: Option<String>) -> Result<()> {
   let cfg = config::get();
   config::validate_config(cfg)?;

   let pipeline = super::build_pipeline(cfg, None, None);
   let payload = pipeline.plan(session.as_deref(), &query)?;

   println!("{}", sql::render_select(&payload.filters, cfg.effective_sql_row_limit()));
   Ok(())
}
