//! Data loading: catalog, favorites and playlist

use crate::model::{ApiError, Collection, CollectionEntry};
use super::AppController;

impl AppController {
    /// Fetch the catalog and both collections concurrently.
    ///
    /// Each slot is applied as soon as its own request settles.
    pub async fn load_all(&self) {
        tracing::debug!("Loading songs view");
        futures::join!(
            self.load_songs(),
            self.load_collection(Collection::Favorites),
            self.load_collection(Collection::Playlist),
        );
    }

    /// A failed catalog fetch keeps whatever catalog was loaded before.
    pub async fn load_songs(&self) {
        match self.model.api().fetch_songs().await {
            Ok(songs) => {
                tracing::info!(count = songs.len(), "Fetched songs");
                self.model.replace_songs(songs).await;
                self.model.mark_synced().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching songs, keeping previous catalog");
            }
        }
    }

    /// A failed collection fetch clears the collection so no stale entries remain.
    pub async fn load_collection(&self, collection: Collection) {
        let result = self.model.api().fetch_entries(collection).await;
        self.apply_collection_load(collection, result).await;
    }

    async fn apply_collection_load(
        &self,
        collection: Collection,
        result: Result<Vec<CollectionEntry>, ApiError>,
    ) {
        match result {
            Ok(entries) => {
                tracing::info!(
                    collection = collection.path(),
                    count = entries.len(),
                    "Fetched collection"
                );
                self.model.replace_entries(collection, entries).await;
            }
            Err(e) => {
                tracing::error!(
                    collection = collection.path(),
                    error = %e,
                    "Error fetching collection, clearing it"
                );
                self.model.replace_entries(collection, Vec::new()).await;
            }
        }
    }
}
