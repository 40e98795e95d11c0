//! Domain-constraint validation over an extracted filter set.
//!
//! The validator never mutates its input and returns the first violated
//! constraint. Depth ranges are deliberately not re-checked here: their
//! invariants are enforced when the record is constructed.

use crate::{config::Config, error::ValidationError, filters::FilterSet};

/// Checks a [`FilterSet`] against the configured domain limits.
pub fn validate_filters(filters: &FilterSet, cfg: &Config) -> Result<(), ValidationError> {
   if let Some(variables) = &filters.variables {
      let bad: Vec<String> = variables
         .iter()
         .filter(|v| !cfg.allowed_variables.contains(v))
         .cloned()
         .collect();
      if !bad.is_empty() {
         return Err(ValidationError::VariablesNotAllowed {
            requested: bad,
            allowed:   cfg.allowed_variables.clone(),
         });
      }
   }

   if let Some(bbox) = &filters.bbox {
      let area = bbox.area_deg2();
      let max = cfg.effective_max_bbox_area_deg2();
      if area > max {
         return Err(ValidationError::BboxAreaTooLarge { area, max });
      }
   }

   if let Some(time_range) = &filters.time_range {
      let years = time_range.span_years();
      if years > f64::from(cfg.max_date_years) {
         return Err(ValidationError::DateSpanTooLong { years, max: cfg.max_date_years });
      }
   }

   if let Some(lat) = &filters.lat_range {
      let in_domain = (-90.0..=90.0).contains(&lat.low) && (-90.0..=90.0).contains(&lat.high);
      if !in_domain || lat.high < lat.low {
         return Err(ValidationError::InvalidLatRange { low: lat.low, high: lat.high });
      }
   }

   if let Some(lon) = &filters.lon_range {
      let in_domain = (-180.0..=180.0).contains(&lon.low) && (-180.0..=180.0).contains(&lon.high);
      if !in_domain || lon.high < lon.low {
         return Err(ValidationError::InvalidLonRange { low: lon.low, high: lon.high });
      }
   }

   Ok(())
}
