//! In-memory session store with per-key atomic upserts.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::types::{SessionContext, SessionUpsert, Units};

/// Keyed mapping session id -> [`SessionContext`].
///
/// Upserts are copy-on-update and run under a single write lock, so
/// concurrent read-modify-write cycles on the same session id cannot lose
/// updates.
#[derive(Debug, Default)]
pub struct SessionStore {
   inner: RwLock<HashMap<String, SessionContext>>,
}

impl SessionStore {
   pub fn new() -> Self {
      Self::default()
   }

   /// Creates or updates a session; a missing id mints a fresh uuid.
   /// `None` fields in the upsert keep their stored value.
   pub fn upsert(&self, upsert: SessionUpsert) -> SessionContext {
      let now = Utc::now();
      let session_id = upsert
         .session_id
         .unwrap_or_else(|| Uuid::new_v4().to_string());

      let mut sessions = self.inner.write();
      let ctx = match sessions.get(&session_id) {
         Some(current) => {
            let mut updated = current.clone();
            updated.updated_at = now;
            if let Some(user_id) = upsert.user_id {
               updated.user_id = Some(user_id);
            }
            if let Some(units) = upsert.preferred_units {
               updated.preferred_units = units;
            }
            if let Some(notes) = upsert.notes {
               updated.notes = Some(notes);
            }
            updated
         },
         None => SessionContext {
            session_id:      session_id.clone(),
            user_id:         upsert.user_id,
            preferred_units: upsert.preferred_units.unwrap_or(Units::Metric),
            notes:           upsert.notes,
            created_at:      now,
            updated_at:      now,
         },
      };

      sessions.insert(session_id, ctx.clone());
      ctx
   }

   pub fn get(&self, session_id: &str) -> Option<SessionContext> {
      self.inner.read().get(session_id).cloned()
   }

   pub fn len(&self) -> usize {
      self.inner.read().len()
   }

   pub fn is_empty(&self) -> bool {
      self.inner.read().is_empty()
   }
}
