use std::io;

use thiserror::Error;

/// Main error type for the argoql application.
///
/// This enum represents all possible errors that can occur throughout the
/// pipeline: filter construction, validation, SQL safety, RAG completion,
/// relational execution, configuration, and serialization.
#[derive(Debug, Error)]
pub enum Error {
   /// I/O error occurred during file or network operations.
   #[error("io error: {0}")]
   Io(#[from] io::Error),

   /// A filter value record violated a construction-time invariant.
   #[error("filter error: {0}")]
   Filter(#[from] FilterError),

   /// A filter set violated a domain constraint.
   #[error("validation error: {0}")]
   Validation(#[from] ValidationError),

   /// A SQL statement failed the SELECT-only safety check.
   #[error("safety error: {0}")]
   Safety(#[from] SafetyError),

   /// The RAG completion collaborator failed.
   #[error("rag error: {0}")]
   Rag(#[from] RagError),

   /// The relational executor collaborator failed.
   #[error("exec error: {0}")]
   Exec(#[from] ExecError),

   /// Configuration-related error occurred.
   #[error("config error: {0}")]
   Config(#[from] ConfigError),

   /// JSON serialization or deserialization error occurred.
   #[error("json error: {0}")]
   Json(#[from] serde_json::Error),

   /// TOML serialization or deserialization error occurred.
   #[error("toml error: {0}")]
   Toml(#[from] toml::de::Error),
}

impl Error {
   /// Process exit code for the CLI. Client-input failures and safety
   /// rejections get distinct codes so agents can tell them apart.
   pub fn exit_code(&self) -> i32 {
      match self {
         Error::Validation(_) | Error::Filter(_) => 2,
         Error::Safety(_) => 3,
         _ => 1,
      }
   }
}

/// Construction-time invariant violations for filter value records.
///
/// These are rejected when the record is built, never later at validation or
/// synthesis time.
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
   /// Longitude outside [-180, 180].
   #[error("longitude {0} outside [-180, 180]")]
   LonOutOfBounds(f64),

   /// Latitude outside [-90, 90].
   #[error("latitude {0} outside [-90, 90]")]
   LatOutOfBounds(f64),

   /// Bounding box with max_lon < min_lon.
   #[error("max_lon {max} must be >= min_lon {min}")]
   LonOrder { min: f64, max: f64 },

   /// Bounding box with max_lat < min_lat.
   #[error("max_lat {max} must be >= min_lat {min}")]
   LatOrder { min: f64, max: f64 },

   /// Time range with end < start.
   #[error("end {end} must be >= start {start}")]
   TimeOrder {
      start: chrono::NaiveDate,
      end:   chrono::NaiveDate,
   },

   /// Negative depth.
   #[error("depth {0} must be >= 0")]
   DepthNegative(f64),

   /// Depth range with max < min.
   #[error("max_depth {max} must be >= min_depth {min}")]
   DepthOrder { min: f64, max: f64 },
}

/// Domain-constraint violations raised by the filter validator.
///
/// Carries the offending field and values so callers can surface a
/// machine-checkable client-input failure.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
   /// Requested variables outside the configured vocabulary.
   #[error("variables not allowed: {requested:?}. Allowed: {allowed:?}")]
   VariablesNotAllowed {
      requested: Vec<String>,
      allowed:   Vec<String>,
   },

   /// Bounding box covers more area than the configured ceiling.
   #[error("bbox area too large ({area:.1} > {max:.1} deg^2)")]
   BboxAreaTooLarge { area: f64, max: f64 },

   /// Time range spans more years than the configured ceiling.
   #[error("date range too long ({years:.2} > {max} years)")]
   DateSpanTooLong { years: f64, max: u32 },

   /// Latitude range outside [-90, 90] or inverted.
   #[error("invalid lat_range ({low}, {high})")]
   InvalidLatRange { low: f64, high: f64 },

   /// Longitude range outside [-180, 180] or inverted.
   #[error("invalid lon_range ({low}, {high})")]
   InvalidLonRange { low: f64, high: f64 },
}

/// Rejections from the SQL safety gate, the last line of defense before the
/// relational executor.
#[derive(Debug, Error, PartialEq)]
pub enum SafetyError {
   /// The statement does not begin with SELECT. Always fatal to the request.
   #[error("only SELECT statements are allowed: {statement:?}")]
   RejectedStatement { statement: String },
}

/// Errors from the external SQL-completion collaborator.
#[derive(Debug, Error)]
pub enum RagError {
   /// HTTP request failed (network error, timeout, etc.).
   #[error("request failed: {0}")]
   Request(#[from] reqwest::Error),

   /// Completion endpoint returned a non-success status code.
   #[error("completion endpoint returned HTTP {0}")]
   StatusCode(u16),

   /// The completion response carried no SQL statement.
   #[error("completion returned no sql statement")]
   EmptyCompletion,
}

/// Errors from the relational executor collaborator.
#[derive(Debug, Error)]
pub enum ExecError {
   /// No executor endpoint configured.
   #[error("no sql endpoint configured; set sql_endpoint or ARGOQL_SQL_ENDPOINT")]
   NoEndpoint,

   /// HTTP request failed (network error, timeout, etc.).
   #[error("request failed: {0}")]
   Request(#[from] reqwest::Error),

   /// Executor endpoint returned a non-success status code.
   #[error("executor returned HTTP {status}: {detail}")]
   StatusCode { status: u16, detail: String },

   /// Executor response was not a JSON array of rows.
   #[error("malformed executor response: {0}")]
   MalformedResponse(String),
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
   /// Failed to retrieve user directories (e.g., home directory, config
   /// directory).
   #[error("failed to get user directories")]
   GetUserDirectories,

   /// Config is invalid or exceeds safety caps.
   #[error("invalid config: {0}")]
   InvalidConfig(String),
}

/// Standard result type using [`enum@Error`] as the default error type
pub type Result<T, E = Error> = std::result::Result<T, E>;
