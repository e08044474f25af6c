//! In-memory catalog backend used by controller tests.
//!
//! Behaves like a small JSON REST server: creates assign fresh entry ids,
//! deletes remove by entry id, and every call is recorded.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::model::{ApiError, CatalogApi, Collection, CollectionEntry, ItemId, Song};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    FetchSongs,
    FetchEntries(Collection),
    Create(Collection, ItemId),
    Delete(Collection, ItemId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailOn {
    FetchSongs,
    FetchEntries(Collection),
    Create(Collection),
    Delete(Collection),
}

struct Inner {
    songs: Vec<Song>,
    favorites: Vec<CollectionEntry>,
    playlist: Vec<CollectionEntry>,
    next_id: i64,
    calls: Vec<Call>,
    failures: HashSet<FailOn>,
}

impl Inner {
    fn entries_mut(&mut self, collection: Collection) -> &mut Vec<CollectionEntry> {
        match collection {
            Collection::Favorites => &mut self.favorites,
            Collection::Playlist => &mut self.playlist,
        }
    }
}

pub struct FakeCatalog {
    inner: Mutex<Inner>,
    /// When set, creates wait for a notification before completing
    create_gate: Option<Notify>,
}

impl FakeCatalog {
    pub fn new(songs: Vec<Song>, favorites: Vec<CollectionEntry>, playlist: Vec<CollectionEntry>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                songs,
                favorites,
                playlist,
                next_id: 100,
                calls: Vec::new(),
                failures: HashSet::new(),
            }),
            create_gate: None,
        }
    }

    pub fn with_create_gate(mut self) -> Self {
        self.create_gate = Some(Notify::new());
        self
    }

    pub fn release_create(&self) {
        if let Some(gate) = &self.create_gate {
            gate.notify_one();
        }
    }

    pub fn fail_on(&self, failure: FailOn) {
        self.inner.lock().unwrap().failures.insert(failure);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    pub fn entries(&self, collection: Collection) -> Vec<CollectionEntry> {
        self.inner.lock().unwrap().entries_mut(collection).clone()
    }

    fn record(&self, call: Call, failure: FailOn) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.failures.contains(&failure) {
            return Err(ApiError::Status {
                method: "TEST".to_string(),
                url: format!("{:?}", failure),
                status: 500,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn fetch_songs(&self) -> Result<Vec<Song>, ApiError> {
        self.record(Call::FetchSongs, FailOn::FetchSongs)?;
        Ok(self.inner.lock().unwrap().songs.clone())
    }

    async fn fetch_entries(&self, collection: Collection) -> Result<Vec<CollectionEntry>, ApiError> {
        self.record(Call::FetchEntries(collection), FailOn::FetchEntries(collection))?;
        Ok(self.entries(collection))
    }

    async fn create_entry(&self, collection: Collection, song: &Song) -> Result<(), ApiError> {
        self.record(Call::Create(collection, song.id.clone()), FailOn::Create(collection))?;
        if let Some(gate) = &self.create_gate {
            gate.notified().await;
        }

        let mut inner = self.inner.lock().unwrap();
        let id = ItemId::Number(inner.next_id);
        inner.next_id += 1;
        inner.entries_mut(collection).push(CollectionEntry {
            id,
            item_id: song.id.clone(),
        });
        Ok(())
    }

    async fn delete_entry(&self, collection: Collection, entry_id: &ItemId) -> Result<(), ApiError> {
        self.record(Call::Delete(collection, entry_id.clone()), FailOn::Delete(collection))?;
        let mut inner = self.inner.lock().unwrap();
        inner.entries_mut(collection).retain(|entry| &entry.id != entry_id);
        Ok(())
    }
}
