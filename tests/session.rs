use argoql::{SessionUpsert, session::SessionStore, types::Units};

#[test]
fn upsert_without_id_mints_a_fresh_session() {
   let store = SessionStore::new();
   let ctx = store.upsert(SessionUpsert { user_id: Some("u1".to_string()), ..Default::default() });

   assert!(!ctx.session_id.is_empty());
   assert_eq!(ctx.user_id.as_deref(), Some("u1"));
   assert_eq!(ctx.preferred_units, Units::Metric);
   assert_eq!(ctx.created_at, ctx.updated_at);

   let fetched = store.get(&ctx.session_id).unwrap();
   assert_eq!(fetched.session_id, ctx.session_id);
}

#[test]
fn upsert_with_explicit_id_creates_that_session() {
   let store = SessionStore::new();
   let ctx = store.upsert(SessionUpsert {
      session_id: Some("sid-1".to_string()),
      ..Default::default()
   });
   assert_eq!(ctx.session_id, "sid-1");
   assert_eq!(store.len(), 1);
}

#[test]
fn second_upsert_updates_without_losing_unset_fields() {
   let store = SessionStore::new();
   let first = store.upsert(SessionUpsert {
      session_id: Some("sid-2".to_string()),
      user_id: Some("u1".to_string()),
      notes: Some("first".to_string()),
      ..Default::default()
   });

   let second = store.upsert(SessionUpsert {
      session_id: Some("sid-2".to_string()),
      preferred_units: Some(Units::Imperial),
      ..Default::default()
   });

   assert_eq!(second.session_id, "sid-2");
   assert_eq!(second.created_at, first.created_at);
   assert!(second.updated_at >= first.updated_at);
   assert_eq!(second.preferred_units, Units::Imperial);
   // Unset fields keep their stored values.
   assert_eq!(second.user_id.as_deref(), Some("u1"));
   assert_eq!(second.notes.as_deref(), Some("first"));
   assert_eq!(store.len(), 1);
}

#[test]
fn missing_session_lookup_returns_none() {
   let store = SessionStore::new();
   assert!(store.get("nope").is_none());
   assert!(store.is_empty());
}

#[test]
fn concurrent_upserts_to_one_session_do_not_lose_updates() {
   use std::sync::Arc;

   let store = Arc::new(SessionStore::new());
   store.upsert(SessionUpsert { session_id: Some("shared".to_string()), ..Default::default() });

   let handles: Vec<_> = (0..8)
      .map(|i| {
         let store = Arc::clone(&store);
         std::thread::spawn(move || {
            store.upsert(SessionUpsert {
               session_id: Some("shared".to_string()),
               notes: Some(format!("writer-{i}")),
               ..Default::default()
            })
         })
      })
      .collect();
   for handle in handles {
      handle.join().unwrap();
   }

   let ctx = store.get("shared").unwrap();
   assert!(ctx.notes.unwrap().starts_with("writer-"));
   assert_eq!(store.len(), 1);
}
