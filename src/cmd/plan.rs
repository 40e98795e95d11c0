//! Plan command: build and print the MCP payload for a query without
//! contacting any collaborator.

use crate::{Result, config};

pub fn execute(query: String, session: Option<String>, json: bool) -> Result<()> {
   let cfg = config::get();
   config::validate_config(cfg)?;

   let pipeline = super::build_pipeline(cfg, None, None);
   let payload = pipeline.plan(session.as_deref(), &query)?;

   if json {
      println!("{}", serde_json::to_string_pretty(&payload)?);
      return Ok(());
   }

   println!("session: {}", payload.session_id);
   println!("query:   {}", payload.query);
   match &payload.filters.variables {
      Some(variables) => println!("variables: {}", variables.join(", ")),
      None => println!("variables: (unconstrained)"),
   }
   if let Some(bbox) = &payload.filters.bbox {
      println!(
         "bbox: lon [{}, {}], lat [{}, {}]",
         bbox.min_lon, bbox.max_lon, bbox.min_lat, bbox.max_lat
      );
   }
   if let Some(time_range) = &payload.filters.time_range {
      println!("time: {} .. {}", time_range.start, time_range.end);
   }
   if let Some(depth) = &payload.filters.depth_range {
      println!("depth: {}m .. {}m", depth.min_depth, depth.max_depth);
   }
   if let Some(lat) = &payload.filters.lat_range {
      println!("lat: [{}, {}]", lat.low, lat.high);
   }
   if let Some(lon) = &payload.filters.lon_range {
      println!("lon: [{}, {}]", lon.low, lon.high);
   }
   if payload.filters.is_empty() {
      println!("filters: none (unconstrained query)");
   }

   Ok(())
}
