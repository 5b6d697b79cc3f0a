//! Observable snapshot holders for UI state.
//!
//! Each [`Store`] keeps the latest known snapshot of one server resource.
//! Domain operations replace the snapshot wholesale on success and never
//! touch it on failure. Readers either poll [`Store::get`] or hold a
//! [`watch::Receiver`] from [`Store::subscribe`], which sees every
//! replacement as soon as it happens.

use crate::types::{DownloadTask, FollowedArtist, LibraryPage, ProviderInstance, User};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Single-writer, multi-reader snapshot slot. Starts out uninitialized (`None`).
pub struct Store<T> {
    tx: watch::Sender<Option<T>>,
}

impl<T> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("initialized", &self.tx.borrow().is_some())
            .field("subscribers", &self.tx.receiver_count())
            .finish()
    }
}

impl<T: Clone> Store<T> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Clone of the current snapshot, `None` until the first successful load.
    pub fn get(&self) -> Option<T> {
        self.tx.borrow().clone()
    }

    /// Read the current snapshot without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        f(self.tx.borrow().as_ref())
    }

    pub fn is_initialized(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Observe replacements.
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.tx.subscribe()
    }

    /// Swap in a new snapshot and wake every subscriber.
    pub(crate) fn replace(&self, value: T) {
        self.tx.send_replace(Some(value));
    }

    /// Derive the next snapshot from the current one while holding the write
    /// lock, so no other replacement can land in between. An uninitialized
    /// store is left alone and nobody is woken. Returns whether it published.
    pub(crate) fn replace_with(&self, f: impl FnOnce(&T) -> T) -> bool {
        self.tx.send_if_modified(|slot| match slot {
            Some(current) => {
                let next = f(current);
                *slot = Some(next);
                true
            }
            None => false,
        })
    }
}

impl<T: Clone> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Every store the UI reads from. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct Stores {
    pub downloads: Arc<Store<Vec<DownloadTask>>>,
    pub follows: Arc<Store<Vec<FollowedArtist>>>,
    pub library: Arc<Store<LibraryPage>>,
    pub instances: Arc<Store<Vec<ProviderInstance>>>,
    pub users: Arc<Store<Vec<User>>>,
    /// The logged-in account, from `/me`.
    pub profile: Arc<Store<User>>,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }
}
