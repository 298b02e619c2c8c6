//! In-memory session store
//!
//! Sessions are keyed by caller id. Every caller gets its own async mutex, so
//! a read-modify-write for one caller runs to completion before the next
//! message from that caller can observe the session. Different callers never
//! wait on each other beyond the brief map lookup.
//!
//! A slot leaves the map only while the map is write-locked and nothing else
//! holds a handle to it, so two live slots never exist for one caller.

use crate::intake::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

type Slot = Arc<Mutex<Option<Session>>>;

#[derive(Default)]
pub struct SessionStore {
    slots: RwLock<HashMap<String, Slot>>,
}

/// Exclusive access to one caller's session
pub struct SessionGuard {
    caller_id: String,
    slot: OwnedMutexGuard<Option<Session>>,
}

impl SessionGuard {
    pub fn caller_id(&self) -> &str {
        &self.caller_id
    }

    pub fn get(&self) -> Option<&Session> {
        self.slot.as_ref()
    }

    pub fn put(&mut self, session: Session) {
        debug_assert_eq!(session.caller_id, self.caller_id);
        *self.slot = Some(session);
    }

    pub fn remove(&mut self) -> Option<Session> {
        self.slot.take()
    }
}

/// Slot that no task holds and that stores nothing worth keeping
fn is_idle(slot: &Slot, keep: impl FnOnce(&Session) -> bool) -> bool {
    if Arc::strong_count(slot) > 1 {
        return false;
    }
    slot.try_lock()
        .is_ok_and(|session| !session.as_ref().is_some_and(keep))
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock a caller's session slot, creating the slot on first use.
    ///
    /// Hand the guard back through [`SessionStore::release`] so an emptied
    /// slot can leave the map.
    pub async fn lock(&self, caller_id: &str) -> SessionGuard {
        let slot = self.slot(caller_id).await;
        SessionGuard {
            caller_id: caller_id.to_string(),
            slot: slot.lock_owned().await,
        }
    }

    async fn slot(&self, caller_id: &str) -> Slot {
        {
            let slots = self.slots.read().await;
            if let Some(slot) = slots.get(caller_id) {
                return slot.clone();
            }
        }

        self.slots
            .write()
            .await
            .entry(caller_id.to_string())
            .or_default()
            .clone()
    }

    /// Unlock a caller's slot, dropping it from the map if it is empty and
    /// no other task is waiting on it.
    pub async fn release(&self, guard: SessionGuard) {
        let SessionGuard { caller_id, slot } = guard;
        if slot.is_some() {
            return;
        }
        drop(slot);

        let mut slots = self.slots.write().await;
        if slots
            .get(&caller_id)
            .is_some_and(|slot| is_idle(slot, |_| true))
        {
            slots.remove(&caller_id);
        }
    }

    /// Drop every idle slot whose session matches `expired`, plus empty
    /// slots. Slots locked or awaited by a task are left alone.
    pub async fn evict(&self, expired: impl Fn(&Session) -> bool) -> usize {
        let mut slots = self.slots.write().await;
        let before = slots.len();
        slots.retain(|_, slot| !is_idle(slot, |session| !expired(session)));
        before - slots.len()
    }

    #[allow(dead_code)] // Store-level contract; the controller goes through `lock`
    pub async fn get(&self, caller_id: &str) -> Option<Session> {
        let guard = self.lock(caller_id).await;
        let session = guard.get().cloned();
        self.release(guard).await;
        session
    }

    #[allow(dead_code)]
    pub async fn put(&self, session: Session) {
        let caller_id = session.caller_id.clone();
        self.lock(&caller_id).await.put(session);
    }

    #[allow(dead_code)]
    pub async fn remove(&self, caller_id: &str) -> Option<Session> {
        let mut guard = self.lock(caller_id).await;
        let session = guard.remove();
        self.release(guard).await;
        session
    }

    /// Number of callers that currently have a session
    #[allow(dead_code)] // Diagnostics and tests
    pub async fn len(&self) -> usize {
        let slots: Vec<Slot> = self.slots.read().await.values().cloned().collect();
        let mut count = 0;
        for slot in slots {
            if slot.lock().await.is_some() {
                count += 1;
            }
        }
        count
    }

    #[cfg(test)]
    pub async fn slot_count(&self) -> usize {
        self.slots.read().await.len()
    }
}
