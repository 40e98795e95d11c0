//! Lexical extraction of structured filters from free-text queries.
//!
//! Every detector is an independent best-effort textual match: no field's
//! extraction depends on another's success, and a non-match simply leaves the
//! field unconstrained. The whole pass is a pure function of the query text,
//! the configured vocabulary/landmark tables, and an injected "today" used by
//! the relative-window detector.

use std::sync::LazyLock;

use chrono::{Duration, Months, NaiveDate, Utc};
use regex::Regex;

use crate::{
   config::Config,
   filters::{BoundingBox, DepthRange, FilterSet, LatRange, TimeRange},
};

/// Month names in calendar order; matched by 3-letter prefix.
const MONTHS: [(&str, u32); 12] = [
   ("january", 1),
   ("february", 2),
   ("march", 3),
   ("april", 4),
   ("may", 5),
   ("june", 6),
   ("july", 7),
   ("august", 8),
   ("september", 9),
   ("october", 10),
   ("november", 11),
   ("december", 12),
];

static MONTH_RES: LazyLock<Vec<(u32, Regex)>> = LazyLock::new(|| {
   MONTHS
      .iter()
      .map(|(name, num)| {
         let re = Regex::new(&format!(r"\b{}[a-z]*\s+(\d{{4}})\b", &name[..3]))
            .expect("month pattern is valid");
         (*num, re)
      })
      .collect()
});

static LAST_N_RE: LazyLock<Regex> = LazyLock::new(|| {
   Regex::new(r"last\s+(\d{1,2})\s+(month|months|year|years)\b").expect("pattern is valid")
});

static DEPTH_SPAN_RE: LazyLock<Regex> =
   LazyLock::new(|| Regex::new(r"(\d{1,4})\s*-\s*(\d{1,4})\s*m").expect("pattern is valid"));

static DEPTH_TO_RE: LazyLock<Regex> =
   LazyLock::new(|| Regex::new(r"to\s+(\d{1,4})\s*m").expect("pattern is valid"));

static BBOX_RE: LazyLock<Regex> = LazyLock::new(|| {
   Regex::new(
      r"bbox\s+(-?\d+(?:\.\d+)?),\s*(-?\d+(?:\.\d+)?),\s*(-?\d+(?:\.\d+)?),\s*(-?\d+(?:\.\d+)?)",
   )
   .expect("pattern is valid")
});

/// Extracts a [`FilterSet`] from a query, resolving relative windows against
/// the current date.
pub fn extract_filters(query: &str, cfg: &Config) -> FilterSet {
   extract_filters_at(query, cfg, Utc::now().date_naive())
}

/// Extraction with an injected "today" so relative windows are deterministic.
///
/// The date is resolved once per request; re-running on the same text with
/// the same `today` yields an identical [`FilterSet`].
pub fn extract_filters_at(query: &str, cfg: &Config, today: NaiveDate) -> FilterSet {
   let text = query.to_lowercase();

   FilterSet {
      variables:   detect_variables(&text, cfg),
      bbox:        explicit_bbox(&text),
      time_range:  month_year_range(&text).or_else(|| relative_window(&text, today)),
      depth_range: depth_range(&text),
      float_ids:   None,
      qc_flags:    None,
      lat_range:   landmark_lat_range(&text, cfg),
      lon_range:   None,
   }
}

/// Case-insensitive substring match against the vocabulary, results in
/// vocabulary order. All overlapping matches are kept.
fn detect_variables(text: &str, cfg: &Config) -> Option<Vec<String>> {
   let found: Vec<String> = cfg
      .allowed_variables
      .iter()
      .filter(|v| text.contains(&v.to_lowercase()))
      .cloned()
      .collect();
   if found.is_empty() { None } else { Some(found) }
}

/// Resolves a named landmark to its latitude interval.
///
/// When several landmarks appear, the last match in table order wins; this
/// tie-break is load-bearing for downstream consumers and must not change.
/// Longitude is never set by this path.
fn landmark_lat_range(text: &str, cfg: &Config) -> Option<LatRange> {
   let mut lat = None;
   for landmark in &cfg.landmarks {
      if text.contains(&landmark.name.to_lowercase()) {
         lat = Some(LatRange { low: landmark.min_lat, high: landmark.max_lat });
      }
   }
   lat
}

/// Detects `<month-name> <4-digit-year>` and spans the full calendar month,
/// leap-aware. Months are tried in calendar order; the first with a match
/// wins.
fn month_year_range(text: &str) -> Option<TimeRange> {
   for (month, re) in MONTH_RES.iter() {
      if let Some(caps) = re.captures(text) {
         let year: i32 = caps[1].parse().ok()?;
         let start = NaiveDate::from_ymd_opt(year, *month, 1)?;
         let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
         return TimeRange::new(start, end).ok();
      }
   }
   None
}

/// Detects `last <N> (month|months|year|years)` ending at `today`, with a
/// month approximated as 30 days and a year as 365.25 days. Only consulted
/// when no calendar month matched.
fn relative_window(text: &str, today: NaiveDate) -> Option<TimeRange> {
   let caps = LAST_N_RE.captures(text)?;
   let n: i64 = caps[1].parse().ok()?;
   let days = if caps[2].starts_with("month") {
      30 * n
   } else {
      (365.25 * n as f64) as i64
   };
   TimeRange::new(today - Duration::days(days), today).ok()
}

/// Detects `<A>-<B>m` (span, order-normalized) or `to <B>m` (surface to B).
/// The span pattern takes precedence when both could match.
fn depth_range(text: &str) -> Option<DepthRange> {
   if let Some(caps) = DEPTH_SPAN_RE.captures(text) {
      let a: f64 = caps[1].parse().ok()?;
      let b: f64 = caps[2].parse().ok()?;
      return DepthRange::new(a.min(b), a.max(b)).ok();
   }
   if let Some(caps) = DEPTH_TO_RE.captures(text) {
      let b: f64 = caps[1].parse().ok()?;
      return DepthRange::new(0.0, b).ok();
   }
   None
}

/// Detects `bbox lon0,lat0,lon1,lat1`. A box violating construction
/// invariants is dropped, consistent with best-effort extraction.
fn explicit_bbox(text: &str) -> Option<BoundingBox> {
   let caps = BBOX_RE.captures(text)?;
   let vals: Vec<f64> = (1..=4).filter_map(|i| caps[i].parse().ok()).collect();
   if vals.len() != 4 {
      return None;
   }
   BoundingBox::new(vals[0], vals[1], vals[2], vals[3]).ok()
}
