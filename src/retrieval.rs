//! Metadata-filter translation for the vector-retrieval backend.
//!
//! Renders a filter set into the flat `{field: {"$gte": lo, "$lte": hi}}`
//! mapping the retrieval backend indexes on. The target field names
//! (`lat`/`lon`/`profile_time`) are intentionally distinct from the SQL
//! schema: the two renderers serve different collaborators and are kept as
//! separate, independently tested mappings.

use serde_json::{Map, Value, json};

use crate::filters::FilterSet;

/// Builds the retrieval backend's metadata filter from a filter set.
///
/// Only range fields the backend indexes are mapped. The result is a single
/// flat mapping; on key collision the last write wins (in practice each
/// field maps to a unique key).
pub fn to_metadata_filter(filters: &FilterSet) -> Map<String, Value> {
   let mut where_filter = Map::new();

   if let Some(lat) = &filters.lat_range {
      where_filter.insert("lat".to_string(), json!({ "$gte": lat.low, "$lte": lat.high }));
   }

   if let Some(lon) = &filters.lon_range {
      where_filter.insert("lon".to_string(), json!({ "$gte": lon.low, "$lte": lon.high }));
   }

   if let Some(time_range) = &filters.time_range {
      where_filter.insert(
         "profile_time".to_string(),
         json!({
            "$gte": time_range.start.to_string(),
            "$lte": time_range.end.to_string(),
         }),
      );
   }

   where_filter
}

#[cfg(test)]
mod tests {
   use chrono::NaiveDate;

   use super::*;
   use crate::filters::{LatRange, TimeRange};

   #[test]
   fn maps_ranges_to_gte_lte_clauses() {
      let filters = FilterSet {
         lat_range: Some(LatRange { low: -5.0, high: 5.0 }),
         time_range: Some(
            TimeRange::new(
               NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
               NaiveDate::from_ymd_opt(2023, 3, 31).unwrap(),
            )
            .unwrap(),
         ),
         ..Default::default()
      };

      let where_filter = to_metadata_filter(&filters);
      assert_eq!(where_filter.len(), 2);
      assert_eq!(where_filter["lat"], json!({ "$gte": -5.0, "$lte": 5.0 }));
      assert_eq!(
         where_filter["profile_time"],
         json!({ "$gte": "2023-03-01", "$lte": "2023-03-31" })
      );
   }

   #[test]
   fn unconstrained_set_yields_empty_filter() {
      assert!(to_metadata_filter(&FilterSet::default()).is_empty());
   }
}
