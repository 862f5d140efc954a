//! In-memory per-chat state: active dialogue sessions and cached charts.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use crate::astro::geocode::GeocodeOutcome;
use crate::astro::types::{BirthPayload, ChartSnapshot};
use crate::dialogue::state::Session;

/// Birth details captured by a completed registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthProfile {
    pub name: String,
    pub dob: String,
    pub time_of_birth: String,
    pub place_of_birth: String,
    pub payload: BirthPayload,
    pub geocode: GeocodeOutcome,
}

/// One chat's cached registration: profile plus chart snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRecord {
    pub profile: BirthProfile,
    pub snapshot: ChartSnapshot,
    pub cached_at: DateTime<Utc>,
}

/// Active dialogue sessions, keyed by chat id.
///
/// Also hands out the per-chat turn lock: one chat's updates are handled
/// strictly one at a time while distinct chats proceed in parallel.
pub struct SessionStore {
    sessions: RwLock<HashMap<i64, Session>>,
    turn_locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            turn_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The turn lock for a chat. Callers hold the guard for the whole turn.
    pub async fn turn_lock(&self, chat_id: i64) -> Arc<Mutex<()>> {
        let mut locks = self.turn_locks.lock().await;
        Arc::clone(locks.entry(chat_id).or_default())
    }

    pub async fn get(&self, chat_id: i64) -> Option<Session> {
        self.sessions.read().await.get(&chat_id).cloned()
    }

    /// Insert or replace a chat's session.
    pub async fn insert(&self, session: Session) {
        self.sessions.write().await.insert(session.chat_id, session);
    }

    pub async fn remove(&self, chat_id: i64) -> Option<Session> {
        self.sessions.write().await.remove(&chat_id)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Completed-registration cache, bounded by LRU eviction.
///
/// Writes are whole-record overwrites; absence means "not registered".
pub struct ChartCache {
    records: Mutex<LruCache<i64, ChartRecord>>,
}

impl ChartCache {
    /// Create a cache bounded to `capacity` chats (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            records: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Overwrite a chat's record. Never merges with a prior registration.
    pub async fn put(&self, chat_id: i64, record: ChartRecord) {
        self.records.lock().await.put(chat_id, record);
    }

    /// Look up a chat's record, marking it recently used.
    pub async fn get(&self, chat_id: i64) -> Option<ChartRecord> {
        self.records.lock().await.get(&chat_id).cloned()
    }

    pub async fn contains(&self, chat_id: i64) -> bool {
        self.records.lock().await.contains(&chat_id)
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
