use argoql::{
   FilterSet, SafetyError,
   safety::enforce_safe_select,
   sql::render_select,
};

fn count_limits(sql: &str) -> usize {
   sql.to_lowercase().matches("limit").count()
}

#[test]
fn non_select_statements_are_rejected() {
   for statement in [
      "DELETE FROM x",
      "DROP TABLE argo_profiles",
      "UPDATE argo_profiles SET value = 0",
      "INSERT INTO argo_profiles VALUES (1)",
      "",
      "-- SELECT 1",
   ] {
      let err = enforce_safe_select(statement, 200).unwrap_err();
      assert!(matches!(err, SafetyError::RejectedStatement { .. }), "accepted: {statement:?}");
   }
}

#[test]
fn select_prefix_tolerates_whitespace_and_case() {
   let gated = enforce_safe_select("\n   SeLeCt 1", 200).unwrap();
   assert_eq!(gated, "SeLeCt 1 LIMIT 200;");
}

#[test]
fn selection_lookalikes_are_rejected() {
   // Word boundary: "selector" is not SELECT.
   assert!(enforce_safe_select("selector FROM x", 200).is_err());
}

#[test]
fn missing_limit_is_appended_exactly_once() {
   let gated = enforce_safe_select("SELECT * FROM argo_profiles", 200).unwrap();
   assert_eq!(gated, "SELECT * FROM argo_profiles LIMIT 200;");
   assert_eq!(count_limits(&gated), 1);
}

#[test]
fn existing_limit_is_preserved() {
   let gated = enforce_safe_select("SELECT * FROM argo_profiles LIMIT 5;", 200).unwrap();
   assert_eq!(gated, "SELECT * FROM argo_profiles LIMIT 5;");
   assert_eq!(count_limits(&gated), 1);
}

#[test]
fn trailing_semicolon_is_normalized() {
   let gated = enforce_safe_select("SELECT 1;", 200).unwrap();
   assert_eq!(gated, "SELECT 1 LIMIT 200;");
}

#[test]
fn synthesized_statements_pass_through_unchanged() {
   let filters = FilterSet {
      variables: Some(vec!["salinity".to_string()]),
      ..Default::default()
   };
   let sql = render_select(&filters, 100);
   let gated = enforce_safe_select(&sql, 200).unwrap();
   assert_eq!(gated, sql);
}
