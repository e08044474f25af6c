//! Immutable snapshot of the songs view.
//!
//! Every update consumes the snapshot and returns a new one; membership and
//! filtering are derived from the lists on each call rather than stored.

use super::types::{Collection, CollectionEntry, ItemId, Song};

/// Placeholder image shown when a song has no usable image URL
pub const DEFAULT_ALBUM_IMAGE: &str = "/default-album.jpg";

/// Message shown instead of the song list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyState {
    /// Catalog has not produced any songs yet
    Loading,
    /// Catalog is loaded but the search matched nothing
    NoMatches,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            EmptyState::Loading => "Loading songs...",
            EmptyState::NoMatches => "No songs found matching your search.",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SongsViewState {
    songs: Vec<Song>,
    favorites: Vec<CollectionEntry>,
    playlist: Vec<CollectionEntry>,
    search: String,
}

impl SongsViewState {
    #[cfg(test)]
    pub fn new(
        songs: Vec<Song>,
        favorites: Vec<CollectionEntry>,
        playlist: Vec<CollectionEntry>,
    ) -> Self {
        Self {
            songs,
            favorites,
            playlist,
            search: String::new(),
        }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn entries(&self, collection: Collection) -> &[CollectionEntry] {
        match collection {
            Collection::Favorites => &self.favorites,
            Collection::Playlist => &self.playlist,
        }
    }

    pub fn with_songs(self, songs: Vec<Song>) -> Self {
        Self { songs, ..self }
    }

    pub fn with_entries(self, collection: Collection, entries: Vec<CollectionEntry>) -> Self {
        match collection {
            Collection::Favorites => Self { favorites: entries, ..self },
            Collection::Playlist => Self { playlist: entries, ..self },
        }
    }

    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self
        }
    }

    pub fn find_song(&self, song_id: &ItemId) -> Option<&Song> {
        self.songs.iter().find(|song| &song.id == song_id)
    }

    /// The entry referencing `song_id`, whose own id is the delete target
    pub fn find_entry(&self, collection: Collection, song_id: &ItemId) -> Option<&CollectionEntry> {
        self.entries(collection)
            .iter()
            .find(|entry| &entry.item_id == song_id)
    }

    pub fn contains(&self, collection: Collection, song_id: &ItemId) -> bool {
        self.entries(collection)
            .iter()
            .any(|entry| &entry.item_id == song_id)
    }

    pub fn in_favorites(&self, song_id: &ItemId) -> bool {
        self.contains(Collection::Favorites, song_id)
    }

    pub fn in_playlist(&self, song_id: &ItemId) -> bool {
        self.contains(Collection::Playlist, song_id)
    }

    /// Songs matching the current search string, in catalog order
    pub fn filtered_songs(&self) -> Vec<&Song> {
        filter_songs(&self.songs, &self.search)
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.songs.is_empty() {
            Some(EmptyState::Loading)
        } else if self.filtered_songs().is_empty() {
            Some(EmptyState::NoMatches)
        } else {
            None
        }
    }

    /// Display name for a collection entry: the song title, or the raw id
    /// when the song is not in the loaded catalog
    pub fn entry_label(&self, entry: &CollectionEntry) -> String {
        match self.find_song(&entry.item_id) {
            Some(song) => format!("{} - {}", song.title, song.singer),
            None => format!("#{}", entry.item_id),
        }
    }
}

/// Case-insensitive substring match over title, singer and genre.
/// An empty query keeps every song.
pub fn filter_songs<'a>(songs: &'a [Song], query: &str) -> Vec<&'a Song> {
    if query.is_empty() {
        return songs.iter().collect();
    }

    let query_lower = query.to_lowercase();
    songs
        .iter()
        .filter(|song| {
            song.title.to_lowercase().contains(&query_lower)
                || song.singer.to_lowercase().contains(&query_lower)
                || song.genre.to_lowercase().contains(&query_lower)
        })
        .collect()
}

/// Image reference to display for a song
pub fn image_source(song: &Song) -> &str {
    if song.img_url.trim().is_empty() {
        DEFAULT_ALBUM_IMAGE
    } else {
        &song.img_url
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::Map;

    use super::*;

    pub fn song(id: i64, title: &str, singer: &str, genre: &str) -> Song {
        Song {
            id: ItemId::Number(id),
            title: title.to_string(),
            singer: singer.to_string(),
            genre: genre.to_string(),
            img_url: format!("http://img/{}.jpg", id),
            song_url: format!("http://audio/{}.mp3", id),
            extra: Map::new(),
        }
    }

    pub fn entry(id: i64, item_id: i64) -> CollectionEntry {
        CollectionEntry {
            id: ItemId::Number(id),
            item_id: ItemId::Number(item_id),
        }
    }
}
