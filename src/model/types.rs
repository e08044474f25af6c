//! Core type definitions for the application

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Backend identifier. JSON backends hand out numbers or strings; the
/// original JSON type is kept so values round-trip unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

/// A song from the backend catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub singer: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genre: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub img_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub song_url: String,
    /// Any other fields the backend stores on the song
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Missing and `null` string fields both read as empty
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A favorites or playlist record pointing at a song
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionEntry {
    /// Identifier of the entry itself, used for deletion
    pub id: ItemId,
    /// Identifier of the referenced song
    #[serde(rename = "itemId")]
    pub item_id: ItemId,
}

/// Body of a create request: the song's fields plus `itemId`.
///
/// The song's own `id` is left out so the backend assigns the entry id.
/// Earlier clients spread the whole song, `id` included.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry<'a> {
    pub item_id: &'a ItemId,
    pub title: &'a str,
    pub singer: &'a str,
    pub genre: &'a str,
    pub img_url: &'a str,
    pub song_url: &'a str,
    #[serde(flatten)]
    pub extra: &'a Map<String, Value>,
}

impl<'a> NewEntry<'a> {
    pub fn from_song(song: &'a Song) -> Self {
        Self {
            item_id: &song.id,
            title: &song.title,
            singer: &song.singer,
            genre: &song.genre,
            img_url: &song.img_url,
            song_url: &song.song_url,
            extra: &song.extra,
        }
    }
}

/// The two user collections a song can be toggled into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Favorites,
    Playlist,
}

impl Collection {
    /// Path segment of the collection on the backend
    pub fn path(self) -> &'static str {
        match self {
            Collection::Favorites => "favorites",
            Collection::Playlist => "playlist",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Collection::Favorites => "Favorites",
            Collection::Playlist => "Playlist",
        }
    }
}

/// Result of a mutation request, reported to callers but never shown in the UI
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Write and re-fetch both succeeded
    Applied,
    /// Song (for adds) or entry (for removes) not present locally, nothing sent
    NotFound,
    /// Another mutation for the same song and collection is still pending
    InFlight,
    /// A request failed; local state left untouched
    Failed,
}

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Songs,
    Favorites,
    Playlist,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Songs,
            ActiveSection::Songs => ActiveSection::Favorites,
            ActiveSection::Favorites => ActiveSection::Playlist,
            ActiveSection::Playlist => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Playlist,
            ActiveSection::Songs => ActiveSection::Search,
            ActiveSection::Favorites => ActiveSection::Songs,
            ActiveSection::Playlist => ActiveSection::Favorites,
        }
    }

    /// The collection shown by this section, if it is a sidebar list
    pub fn collection(self) -> Option<Collection> {
        match self {
            ActiveSection::Favorites => Some(Collection::Favorites),
            ActiveSection::Playlist => Some(Collection::Playlist),
            _ => None,
        }
    }
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub song_selected: usize,
    pub favorites_selected: usize,
    pub playlist_selected: usize,
    /// Song whose audio source is shown in the player bar
    pub now_playing: Option<ItemId>,
    pub last_synced: Option<DateTime<Local>>,
    pub show_help_popup: bool,
    pub in_flight: HashSet<(Collection, ItemId)>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            song_selected: 0,
            favorites_selected: 0,
            playlist_selected: 0,
            now_playing: None,
            last_synced: None,
            show_help_popup: false,
            in_flight: HashSet::new(),
        }
    }
}

impl UiState {
    pub fn is_in_flight(&self, collection: Collection, song_id: &ItemId) -> bool {
        self.in_flight.contains(&(collection, song_id.clone()))
    }
}
