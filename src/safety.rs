//! SELECT-only safety gate for SQL statements bound for the relational
//! executor.
//!
//! Every statement passes through here regardless of origin: the
//! deterministic synthesizer and the external completion service are both
//! gated. A statement that fails the SELECT check is rejected outright,
//! never rewritten into a passing one.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::SafetyError;

static SELECT_RE: LazyLock<Regex> =
   LazyLock::new(|| Regex::new(r"(?i)^\s*select\b").expect("pattern is valid"));

/// Verifies a statement is a SELECT and bounds it with a row limit.
///
/// Leading whitespace and any casing of `SELECT` are tolerated. A trailing
/// semicolon is stripped, ` LIMIT <default_limit>` is appended when no limit
/// clause is present, and the semicolon is restored; the result always
/// carries exactly one limit.
pub fn enforce_safe_select(sql: &str, default_limit: usize) -> Result<String, SafetyError> {
   if !SELECT_RE.is_match(sql) {
      return Err(SafetyError::RejectedStatement { statement: preview(sql) });
   }

   let mut statement = sql.trim().trim_end_matches(';').to_string();
   if !statement.to_lowercase().contains(" limit ") {
      statement.push_str(&format!(" LIMIT {default_limit}"));
   }
   statement.push(';');
   Ok(statement)
}

fn preview(sql: &str) -> String {
   const MAX_PREVIEW: usize = 80;
   let trimmed = sql.trim();
   if trimmed.len() <= MAX_PREVIEW {
      return trimmed.to_string();
   }
   let mut cut = MAX_PREVIEW;
   while !trimmed.is_char_boundary(cut) {
      cut -= 1;
   }
   format!("{}...", &trimmed[..cut])
}
