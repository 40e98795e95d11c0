use argoql::{
   BoundingBox, DepthRange, FilterSet, LatRange, LonRange, TimeRange,
   sql::{COLUMNS, TABLE, render_select},
};
use chrono::NaiveDate;
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
   NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn count_case_insensitive(haystack: &str, needle: &str) -> usize {
   haystack.to_lowercase().matches(&needle.to_lowercase()).count()
}

#[test]
fn unconstrained_set_renders_without_where() {
   let sql = render_select(&FilterSet::default(), 100);
   assert_eq!(sql, format!("SELECT {COLUMNS} FROM {TABLE} LIMIT 100;"));
   assert!(!sql.contains("WHERE"));
}

#[test]
fn fragments_render_in_fixed_order() {
   let filters = FilterSet {
      variables:   Some(vec!["salinity".to_string()]),
      bbox:        Some(BoundingBox::new(-60.0, -5.0, -50.0, 5.0).unwrap()),
      time_range:  Some(TimeRange::new(date(2023, 3, 1), date(2023, 3, 31)).unwrap()),
      depth_range: Some(DepthRange::new(0.0, 500.0).unwrap()),
      float_ids:   Some(vec!["4901234".to_string()]),
      qc_flags:    Some(vec![1, 2]),
      lat_range:   Some(LatRange { low: -5.0, high: 5.0 }),
      lon_range:   Some(LonRange { low: -60.0, high: -50.0 }),
   };

   let sql = render_select(&filters, 100);
   assert_eq!(
      sql,
      "SELECT float_id, time, lat, lon, variable, value FROM argo_profiles WHERE variable IN \
       ('salinity') AND float_id IN ('4901234') AND qc_flag IN (1, 2) AND lat BETWEEN -5 AND 5 \
       AND lon BETWEEN -60 AND -50 AND (lat BETWEEN -5 AND 5 AND lon BETWEEN -60 AND -50) AND \
       time BETWEEN '2023-03-01' AND '2023-03-31' AND depth BETWEEN 0 AND 500 LIMIT 100;"
   );
}

#[test]
fn rendering_is_deterministic() {
   let filters = FilterSet {
      variables: Some(vec!["temperature".to_string(), "salinity".to_string()]),
      time_range: Some(TimeRange::new(date(2023, 1, 1), date(2023, 6, 30)).unwrap()),
      ..Default::default()
   };
   assert_eq!(render_select(&filters, 100), render_select(&filters, 100));
}

#[test]
fn string_values_are_quoted_and_escaped() {
   let filters = FilterSet {
      variables: Some(vec!["o'xygen".to_string()]),
      ..Default::default()
   };
   let sql = render_select(&filters, 100);
   assert!(sql.contains("variable IN ('o''xygen')"));
}

#[test]
fn row_cap_is_always_appended() {
   let sql = render_select(&FilterSet::default(), 25);
   assert!(sql.ends_with(" LIMIT 25;"));
}

fn arbitrary_filters() -> impl Strategy<Value = FilterSet> {
   (
      proptest::option::of(proptest::sample::subsequence(
         vec!["temperature".to_string(), "salinity".to_string(), "oxygen".to_string()],
         1..=3,
      )),
      proptest::option::of((-5.0f64..5.0, 0.0f64..10.0)),
      proptest::option::of((0.0f64..100.0, 0.0f64..900.0)),
      proptest::option::of((-90.0f64..0.0, 0.0f64..90.0)),
   )
      .prop_map(|(variables, lon, depth, lat)| FilterSet {
         variables,
         bbox: None,
         time_range: None,
         depth_range: depth
            .map(|(min, span)| DepthRange::new(min, min + span).unwrap()),
         float_ids: None,
         qc_flags: None,
         lat_range: lat.map(|(low, high)| LatRange { low, high }),
         lon_range: lon.map(|(low, span)| LonRange { low, high: low + span }),
      })
}

proptest! {
   #[test]
   fn every_rendering_is_a_bounded_select(filters in arbitrary_filters()) {
      let sql = render_select(&filters, 100);
      prop_assert!(sql.starts_with("SELECT "));
      prop_assert_eq!(count_case_insensitive(&sql, " limit "), 1);
      prop_assert!(sql.ends_with(" LIMIT 100;"));
   }

   #[test]
   fn where_appears_iff_a_field_is_populated(filters in arbitrary_filters()) {
      let sql = render_select(&filters, 100);
      prop_assert_eq!(sql.contains(" WHERE "), !filters.is_empty());
   }
}
