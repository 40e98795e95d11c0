//! Filter value records extracted from natural-language queries.
//!
//! All records are immutable after construction. Range invariants (axis
//! bounds, max >= min) are enforced by the constructors; a [`FilterSet`] is
//! built once by the extractor, checked once by the validator, then consumed
//! read-only by both renderers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Geographic bounding box in degrees, lon in [-180, 180], lat in [-90, 90].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
   pub min_lon: f64,
   pub min_lat: f64,
   pub max_lon: f64,
   pub max_lat: f64,
}

impl BoundingBox {
   pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self, FilterError> {
      for lon in [min_lon, max_lon] {
         if !(-180.0..=180.0).contains(&lon) {
            return Err(FilterError::LonOutOfBounds(lon));
         }
      }
      for lat in [min_lat, max_lat] {
         if !(-90.0..=90.0).contains(&lat) {
            return Err(FilterError::LatOutOfBounds(lat));
         }
      }
      if max_lon < min_lon {
         return Err(FilterError::LonOrder { min: min_lon, max: max_lon });
      }
      if max_lat < min_lat {
         return Err(FilterError::LatOrder { min: min_lat, max: max_lat });
      }
      Ok(Self { min_lon, min_lat, max_lon, max_lat })
   }

   /// Covered area in square degrees.
   pub fn area_deg2(&self) -> f64 {
      (self.max_lat - self.min_lat) * (self.max_lon - self.min_lon)
   }
}

/// Inclusive calendar date range, end >= start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
   pub start: NaiveDate,
   pub end:   NaiveDate,
}

impl TimeRange {
   pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FilterError> {
      if end < start {
         return Err(FilterError::TimeOrder { start, end });
      }
      Ok(Self { start, end })
   }

   /// Span in fractional years using 365.25-day years.
   pub fn span_years(&self) -> f64 {
      (self.end - self.start).num_days() as f64 / 365.25
   }
}

/// Depth interval in meters, both bounds >= 0, max >= min.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRange {
   pub min_depth: f64,
   pub max_depth: f64,
}

impl DepthRange {
   pub fn new(min_depth: f64, max_depth: f64) -> Result<Self, FilterError> {
      for depth in [min_depth, max_depth] {
         if depth < 0.0 {
            return Err(FilterError::DepthNegative(depth));
         }
      }
      if max_depth < min_depth {
         return Err(FilterError::DepthOrder { min: min_depth, max: max_depth });
      }
      Ok(Self { min_depth, max_depth })
   }
}

/// Single-axis latitude constraint, typically resolved from a named landmark.
///
/// Distinct from [`BoundingBox`]: it constrains one axis only and is bounds-
/// checked by the validator, not at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatRange {
   pub low:  f64,
   pub high: f64,
}

/// Single-axis longitude constraint. See [`LatRange`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonRange {
   pub low:  f64,
   pub high: f64,
}

/// Structured, all-optional representation of query constraints.
///
/// Absence of a field means "unconstrained", not "empty". Built once per
/// query by the extractor and never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
   pub variables:   Option<Vec<String>>,
   pub bbox:        Option<BoundingBox>,
   pub time_range:  Option<TimeRange>,
   pub depth_range: Option<DepthRange>,
   pub float_ids:   Option<Vec<String>>,
   pub qc_flags:    Option<Vec<i32>>,
   pub lat_range:   Option<LatRange>,
   pub lon_range:   Option<LonRange>,
}

impl FilterSet {
   /// True when no field is populated (fully unconstrained query).
   pub fn is_empty(&self) -> bool {
      self.active_fields() == 0
   }

   /// Number of populated fields.
   pub fn active_fields(&self) -> usize {
      [
         self.variables.is_some(),
         self.bbox.is_some(),
         self.time_range.is_some(),
         self.depth_range.is_some(),
         self.float_ids.is_some(),
         self.qc_flags.is_some(),
         self.lat_range.is_some(),
         self.lon_range.is_some(),
      ]
      .iter()
      .filter(|populated| **populated)
      .count()
   }
}
