//! # Stash: Local Bookmarks
//!
//! The stash is the user's personal list of script IDs worth coming back to. It lives
//! entirely on this machine and never talks to the API.
//!
//! ## Model
//!
//! An ordered sequence of IDs with no duplicates. Adding appends (or does nothing when
//! the ID is already there), removing drops the ID wherever it sits, clearing empties it.
//!
//! ## Persistence Protocol
//!
//! The whole sequence is serialized as a JSON array of strings under a single slot,
//! [`STASH_KEY`]. It is read once when the store is opened and rewritten in full after
//! every mutation. There is no debouncing: one mutation, one write.
//!
//! A mutation writes first and commits to memory second. If the write fails the
//! mutation returns the error and the in-memory sequence is untouched, so memory and
//! storage never disagree.
//!
//! ## Recovery
//!
//! | Stored value                    | Result                                  |
//! |---------------------------------|-----------------------------------------|
//! | missing or blank                | empty stash                             |
//! | JSON array of strings           | that sequence, duplicates collapsed     |
//! | anything else                   | empty stash + a load warning            |
//!
//! The warning is kept until [`StashStore::take_load_warning`] is called so the UI can
//! tell the user their stash was reset. The unreadable value stays on disk until the
//! next mutation overwrites it.
//!
//! ## Change Notification
//!
//! Consumers [`subscribe`](StashStore::subscribe) to receive every change, synchronously,
//! right after it has been persisted. Listeners get the [`StashChange`] and the full
//! current sequence.
//!
//! ## Backends
//!
//! - [`fs_backend::FsBackend`]: one JSON file per slot, written atomically.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O.
//!
//! Two processes sharing a data directory are not coordinated; the last writer wins.

use crate::error::Result;
use std::collections::HashSet;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StashBackend;

/// Slot the stash is persisted under.
pub const STASH_KEY: &str = "sceneStash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StashChange {
    Added(String),
    Removed(String),
    Cleared,
}

/// Handle returned by [`StashStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StashChange, &[String])>;

pub struct StashStore<B: StashBackend> {
    backend: B,
    ids: Vec<String>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    load_warning: Option<String>,
}

impl<B: StashBackend> StashStore<B> {
    /// Load the stash from `backend`.
    ///
    /// Fails only when the backend itself fails to read. Unparseable data is
    /// recovered as an empty stash (see module docs).
    pub fn open(backend: B) -> Result<Self> {
        let mut load_warning = None;
        let ids = match backend.read(STASH_KEY)? {
            None => Vec::new(),
            Some(raw) if raw.trim().is_empty() => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => dedup_in_order(ids),
                Err(e) => {
                    tracing::warn!(error = %e, "stash data is unreadable, starting empty");
                    load_warning = Some(format!(
                        "Stashed scripts could not be read and were reset ({})",
                        e
                    ));
                    Vec::new()
                }
            },
        };
        tracing::debug!(count = ids.len(), "stash loaded");

        Ok(Self {
            backend,
            ids,
            listeners: Vec::new(),
            next_subscription: 0,
            load_warning,
        })
    }

    pub fn is_stashed(&self, id: &str) -> bool {
        self.ids.iter().any(|stashed| stashed == id)
    }

    /// Current sequence, in insertion order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Append `id` unless it is already stashed.
    ///
    /// Returns `Ok(false)` for the already-stashed case, which neither writes nor
    /// notifies.
    pub fn add(&mut self, id: impl Into<String>) -> Result<bool> {
        let id = id.into();
        if self.is_stashed(&id) {
            return Ok(false);
        }
        let mut next = self.ids.clone();
        next.push(id.clone());
        self.commit(next, StashChange::Added(id))?;
        Ok(true)
    }

    /// Drop `id` from the stash. Returns whether it was there.
    ///
    /// The sequence is rewritten and listeners fire even when `id` was absent.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let was_stashed = self.is_stashed(id);
        let next: Vec<String> = self.ids.iter().filter(|s| *s != id).cloned().collect();
        self.commit(next, StashChange::Removed(id.to_string()))?;
        Ok(was_stashed)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.commit(Vec::new(), StashChange::Cleared)
    }

    /// Register a listener for every persisted change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StashChange, &[String]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `subscription` was not registered.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    /// The warning recorded when stored data had to be discarded, if any.
    pub fn take_load_warning(&mut self) -> Option<String> {
        self.load_warning.take()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn commit(&mut self, next: Vec<String>, change: StashChange) -> Result<()> {
        let raw = serde_json::to_string(&next)?;
        self.backend.write(STASH_KEY, &raw)?;
        self.ids = next;
        tracing::debug!(?change, count = self.ids.len(), "stash updated");

        for (_, listener) in self.listeners.iter_mut() {
            listener(&change, &self.ids);
        }
        Ok(())
    }
}

fn dedup_in_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
