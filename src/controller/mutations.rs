//! Favorite and playlist mutation handlers
//!
//! Every handler performs one write and then re-fetches the whole collection,
//! replacing local state with what the backend returns. Failures are logged and
//! leave local state as it was.

use crate::model::{ApiError, Collection, CollectionEntry, ItemId, MutationOutcome};
use super::AppController;

impl AppController {
    pub async fn add_favorite(&self, song_id: &ItemId) -> MutationOutcome {
        self.add_to_collection(Collection::Favorites, song_id).await
    }

    pub async fn remove_favorite(&self, song_id: &ItemId) -> MutationOutcome {
        self.remove_from_collection(Collection::Favorites, song_id).await
    }

    pub async fn add_to_playlist(&self, song_id: &ItemId) -> MutationOutcome {
        self.add_to_collection(Collection::Playlist, song_id).await
    }

    pub async fn remove_from_playlist(&self, song_id: &ItemId) -> MutationOutcome {
        self.remove_from_collection(Collection::Playlist, song_id).await
    }

    pub async fn toggle_favorite(&self, song_id: &ItemId) -> MutationOutcome {
        self.toggle_membership(Collection::Favorites, song_id).await
    }

    pub async fn toggle_playlist(&self, song_id: &ItemId) -> MutationOutcome {
        self.toggle_membership(Collection::Playlist, song_id).await
    }

    async fn toggle_membership(&self, collection: Collection, song_id: &ItemId) -> MutationOutcome {
        if self.model.contains(collection, song_id).await {
            self.remove_from_collection(collection, song_id).await
        } else {
            self.add_to_collection(collection, song_id).await
        }
    }

    /// Create an entry for a song from the loaded catalog, then re-fetch.
    pub async fn add_to_collection(&self, collection: Collection, song_id: &ItemId) -> MutationOutcome {
        let Some(song) = self.model.find_song(song_id).await else {
            tracing::debug!(
                collection = collection.path(),
                song_id = %song_id,
                "Song not in catalog, nothing to add"
            );
            return MutationOutcome::NotFound;
        };

        if !self.model.try_begin_mutation(collection, song_id).await {
            tracing::debug!(collection = collection.path(), song_id = %song_id, "Mutation already in flight");
            return MutationOutcome::InFlight;
        }

        let api = self.model.api();
        let result = async {
            api.create_entry(collection, &song).await?;
            api.fetch_entries(collection).await
        }
        .await;

        let outcome = self.apply_mutation_result(collection, song_id, "add", result).await;
        self.model.finish_mutation(collection, song_id).await;
        outcome
    }

    /// Delete the entry that references `song_id` (by the entry's own id),
    /// then re-fetch.
    pub async fn remove_from_collection(&self, collection: Collection, song_id: &ItemId) -> MutationOutcome {
        let Some(entry) = self.model.find_entry(collection, song_id).await else {
            tracing::debug!(
                collection = collection.path(),
                song_id = %song_id,
                "No entry for song, nothing to remove"
            );
            return MutationOutcome::NotFound;
        };

        if !self.model.try_begin_mutation(collection, song_id).await {
            tracing::debug!(collection = collection.path(), song_id = %song_id, "Mutation already in flight");
            return MutationOutcome::InFlight;
        }

        let api = self.model.api();
        let result = async {
            api.delete_entry(collection, &entry.id).await?;
            api.fetch_entries(collection).await
        }
        .await;

        let outcome = self.apply_mutation_result(collection, song_id, "remove", result).await;
        self.model.finish_mutation(collection, song_id).await;
        outcome
    }

    async fn apply_mutation_result(
        &self,
        collection: Collection,
        song_id: &ItemId,
        action: &'static str,
        result: Result<Vec<CollectionEntry>, ApiError>,
    ) -> MutationOutcome {
        match result {
            Ok(entries) => {
                tracing::info!(
                    collection = collection.path(),
                    song_id = %song_id,
                    action,
                    count = entries.len(),
                    "Collection updated"
                );
                self.model.replace_entries(collection, entries).await;
                self.model.mark_synced().await;
                MutationOutcome::Applied
            }
            Err(e) => {
                tracing::error!(
                    collection = collection.path(),
                    song_id = %song_id,
                    action,
                    error = %e,
                    "Error updating collection"
                );
                MutationOutcome::Failed
            }
        }
    }
}
