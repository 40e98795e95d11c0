//! Deterministic SQL synthesis from a filter set.
//!
//! Rendering is byte-stable: fragments are emitted in a fixed order (never
//! the iteration order of an unordered container), so the same [`FilterSet`]
//! always produces identical SQL text.

use crate::filters::FilterSet;

/// Target table for profile queries.
pub const TABLE: &str = "argo_profiles";

/// Projected columns, in SELECT order.
pub const COLUMNS: &str = "float_id, time, lat, lon, variable, value";

/// Escapes a string value for use inside a single-quoted SQL literal.
pub fn escape_string_literal(value: &str) -> String {
   value.replace('\'', "''")
}

fn quoted_list(values: &[String]) -> String {
   values
      .iter()
      .map(|v| format!("'{}'", escape_string_literal(v)))
      .collect::<Vec<_>>()
      .join(", ")
}

/// Renders one SELECT statement for a filter set with an unconditional row
/// cap.
///
/// One WHERE fragment per populated field, inclusive BETWEEN for ranges and
/// IN for sets, joined with AND; the WHERE clause is omitted entirely for an
/// unconstrained set. String values are always quoted and escaped.
pub fn render_select(filters: &FilterSet, row_limit: usize) -> String {
   let mut where_parts: Vec<String> = Vec::new();

   if let Some(variables) = &filters.variables {
      where_parts.push(format!("variable IN ({})", quoted_list(variables)));
   }

   if let Some(float_ids) = &filters.float_ids {
      where_parts.push(format!("float_id IN ({})", quoted_list(float_ids)));
   }

   if let Some(qc_flags) = &filters.qc_flags {
      let list = qc_flags
         .iter()
         .map(ToString::to_string)
         .collect::<Vec<_>>()
         .join(", ");
      where_parts.push(format!("qc_flag IN ({list})"));
   }

   if let Some(lat) = &filters.lat_range {
      where_parts.push(format!("lat BETWEEN {} AND {}", lat.low, lat.high));
   }

   if let Some(lon) = &filters.lon_range {
      where_parts.push(format!("lon BETWEEN {} AND {}", lon.low, lon.high));
   }

   if let Some(bbox) = &filters.bbox {
      where_parts.push(format!(
         "(lat BETWEEN {} AND {} AND lon BETWEEN {} AND {})",
         bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon
      ));
   }

   if let Some(time_range) = &filters.time_range {
      where_parts.push(format!(
         "time BETWEEN '{}' AND '{}'",
         time_range.start, time_range.end
      ));
   }

   if let Some(depth) = &filters.depth_range {
      where_parts.push(format!(
         "depth BETWEEN {} AND {}",
         depth.min_depth, depth.max_depth
      ));
   }

   let mut sql = format!("SELECT {COLUMNS} FROM {TABLE}");
   if !where_parts.is_empty() {
      sql.push_str(" WHERE ");
      sql.push_str(&where_parts.join(" AND "));
   }
   sql.push_str(&format!(" LIMIT {row_limit};"));
   sql
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn escape_string_literal_escapes_single_quotes() {
      assert_eq!(escape_string_literal("o'brien"), "o''brien");
      assert_eq!(escape_string_literal("plain"), "plain");
   }

   #[test]
   fn quoted_list_quotes_every_value() {
      let values = vec!["salinity".to_string(), "tem'p".to_string()];
      assert_eq!(quoted_list(&values), "'salinity', 'tem''p'");
   }
}
