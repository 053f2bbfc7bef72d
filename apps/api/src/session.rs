//! In-memory session store. Each builder and workshop lives here from creation
//! until it is deleted or sits idle past the TTL; nothing is persisted.
//!
//! The façades themselves are plain `&mut self` types. The store's mutex is the
//! only lock, and callers must not hold it across an `.await`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::gem::builder::GuidedBuilder;
use crate::gem::workshop::Workshop;

struct Entry<T> {
    value: T,
    last_touched: Instant,
}

impl<T> Entry<T> {
    fn new(value: T) -> Self {
        Entry {
            value,
            last_touched: Instant::now(),
        }
    }

    fn touch(&mut self) -> &mut T {
        self.last_touched = Instant::now();
        &mut self.value
    }
}

#[derive(Default)]
pub struct SessionStore {
    builders: Mutex<HashMap<Uuid, Entry<GuidedBuilder>>>,
    workshops: Mutex<HashMap<Uuid, Entry<Workshop>>>,
}

impl SessionStore {
    pub async fn insert_builder(&self, builder: GuidedBuilder) -> (Uuid, DateTime<Utc>) {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        self.builders.lock().await.insert(id, Entry::new(builder));
        (id, created_at)
    }

    pub async fn insert_workshop(&self, workshop: Workshop) -> (Uuid, DateTime<Utc>) {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        self.workshops.lock().await.insert(id, Entry::new(workshop));
        (id, created_at)
    }

    /// Runs `f` against one builder while holding the store lock. Counts as activity.
    pub async fn with_builder<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut GuidedBuilder) -> R,
    ) -> Result<R, AppError> {
        let mut builders = self.builders.lock().await;
        let entry = builders
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Builder session {id} not found")))?;
        Ok(f(entry.touch()))
    }

    pub async fn with_workshop<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Workshop) -> R,
    ) -> Result<R, AppError> {
        let mut workshops = self.workshops.lock().await;
        let entry = workshops
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Workshop session {id} not found")))?;
        Ok(f(entry.touch()))
    }

    pub async fn remove_builder(&self, id: Uuid) -> Result<(), AppError> {
        self.builders
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Builder session {id} not found")))
    }

    pub async fn remove_workshop(&self, id: Uuid) -> Result<(), AppError> {
        self.workshops
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Workshop session {id} not found")))
    }

    pub async fn counts(&self) -> (usize, usize) {
        let builders = self.builders.lock().await.len();
        let workshops = self.workshops.lock().await.len();
        (builders, workshops)
    }

    /// Drops every session idle for at least `ttl`. Returns how many builders
    /// and workshops were removed.
    pub async fn prune_idle(&self, ttl: Duration) -> (usize, usize) {
        let now = Instant::now();
        let builders = retain_fresh(&mut *self.builders.lock().await, now, ttl);
        let workshops = retain_fresh(&mut *self.workshops.lock().await, now, ttl);
        (builders, workshops)
    }

    /// Spawns the background sweep that calls `prune_idle` every `every`.
    pub fn spawn_expiry(self: Arc<Self>, ttl: Duration, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let (builders, workshops) = self.prune_idle(ttl).await;
                if builders + workshops > 0 {
                    info!(builders, workshops, "expired idle sessions");
                }
            }
        })
    }
}

fn retain_fresh<T>(map: &mut HashMap<Uuid, Entry<T>>, now: Instant, ttl: Duration) -> usize {
    let before = map.len();
    map.retain(|_, entry| now.duration_since(entry.last_touched) < ttl);
    before - map.len()
}
