//! Main application model with state management

use std::sync::Arc;
use chrono::Local;
use tokio::sync::Mutex;

use super::api_client::CatalogApi;
use super::types::{ActiveSection, Collection, CollectionEntry, ItemId, Song, UiState};
use super::view_state::SongsViewState;

/// Main application model containing all state.
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct AppModel {
    api: Arc<dyn CatalogApi>,
    view_state: Arc<Mutex<SongsViewState>>,
    ui_state: Arc<Mutex<UiState>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            view_state: Arc::new(Mutex::new(SongsViewState::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn api(&self) -> Arc<dyn CatalogApi> {
        self.api.clone()
    }

    // ========================================================================
    // View State
    // ========================================================================

    pub async fn get_view_state(&self) -> SongsViewState {
        self.view_state.lock().await.clone()
    }

    /// Replace the view state with the snapshot returned by `update`
    pub async fn update_view_state<F>(&self, update: F)
    where
        F: FnOnce(SongsViewState) -> SongsViewState,
    {
        let snapshot = {
            let mut state = self.view_state.lock().await;
            let next = update(std::mem::take(&mut *state));
            *state = next.clone();
            next
        };
        self.clamp_selections(&snapshot).await;
    }

    pub async fn replace_songs(&self, songs: Vec<Song>) {
        self.update_view_state(|state| state.with_songs(songs)).await;
    }

    pub async fn replace_entries(&self, collection: Collection, entries: Vec<CollectionEntry>) {
        self.update_view_state(|state| state.with_entries(collection, entries))
            .await;
    }

    pub async fn find_song(&self, song_id: &ItemId) -> Option<Song> {
        self.view_state.lock().await.find_song(song_id).cloned()
    }

    pub async fn find_entry(&self, collection: Collection, song_id: &ItemId) -> Option<CollectionEntry> {
        self.view_state
            .lock()
            .await
            .find_entry(collection, song_id)
            .cloned()
    }

    pub async fn contains(&self, collection: Collection, song_id: &ItemId) -> bool {
        self.view_state.lock().await.contains(collection, song_id)
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub async fn append_to_search(&self, c: char) {
        self.update_view_state(|state| {
            let mut search = state.search().to_string();
            search.push(c);
            state.with_search(search)
        })
        .await;
    }

    pub async fn backspace_search(&self) {
        self.update_view_state(|state| {
            let mut search = state.search().to_string();
            search.pop();
            state.with_search(search)
        })
        .await;
    }

    pub async fn clear_search(&self) {
        self.update_view_state(|state| state.with_search(String::new()))
            .await;
    }

    // ========================================================================
    // UI State
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn move_selection_up(&self) {
        let mut guard = self.ui_state.lock().await;
        let state = &mut *guard;
        let selected = match state.active_section {
            ActiveSection::Songs => &mut state.song_selected,
            ActiveSection::Favorites => &mut state.favorites_selected,
            ActiveSection::Playlist => &mut state.playlist_selected,
            ActiveSection::Search => return,
        };
        *selected = selected.saturating_sub(1);
    }

    pub async fn move_selection_down(&self) {
        let lengths = self.list_lengths().await;
        let mut guard = self.ui_state.lock().await;
        let state = &mut *guard;
        let (selected, len) = match state.active_section {
            ActiveSection::Songs => (&mut state.song_selected, lengths.songs),
            ActiveSection::Favorites => (&mut state.favorites_selected, lengths.favorites),
            ActiveSection::Playlist => (&mut state.playlist_selected, lengths.playlist),
            ActiveSection::Search => return,
        };
        if *selected < len.saturating_sub(1) {
            *selected += 1;
        }
    }

    /// Id of the highlighted song in the filtered list
    pub async fn selected_song_id(&self) -> Option<ItemId> {
        let index = self.ui_state.lock().await.song_selected;
        let view = self.view_state.lock().await;
        view.filtered_songs().get(index).map(|song| song.id.clone())
    }

    /// Song id referenced by the highlighted sidebar entry
    pub async fn selected_entry_song_id(&self, collection: Collection) -> Option<ItemId> {
        let index = {
            let state = self.ui_state.lock().await;
            match collection {
                Collection::Favorites => state.favorites_selected,
                Collection::Playlist => state.playlist_selected,
            }
        };
        let view = self.view_state.lock().await;
        view.entries(collection)
            .get(index)
            .map(|entry| entry.item_id.clone())
    }

    pub async fn set_now_playing(&self, song_id: ItemId) {
        self.ui_state.lock().await.now_playing = Some(song_id);
    }

    pub async fn mark_synced(&self) {
        self.ui_state.lock().await.last_synced = Some(Local::now());
    }

    pub async fn toggle_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = !state.show_help_popup;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // In-flight mutations
    // ========================================================================

    /// Claim the (collection, song) slot. Returns false if a mutation for the
    /// same pair is already pending.
    pub async fn try_begin_mutation(&self, collection: Collection, song_id: &ItemId) -> bool {
        self.ui_state
            .lock()
            .await
            .in_flight
            .insert((collection, song_id.clone()))
    }

    pub async fn finish_mutation(&self, collection: Collection, song_id: &ItemId) {
        self.ui_state
            .lock()
            .await
            .in_flight
            .remove(&(collection, song_id.clone()));
    }

    #[cfg(test)]
    pub async fn is_in_flight(&self, collection: Collection, song_id: &ItemId) -> bool {
        self.ui_state.lock().await.is_in_flight(collection, song_id)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    async fn list_lengths(&self) -> ListLengths {
        let view = self.view_state.lock().await;
        ListLengths::of(&view)
    }

    /// Keep selections inside their lists after the lists change
    async fn clamp_selections(&self, view: &SongsViewState) {
        let lengths = ListLengths::of(view);
        let mut state = self.ui_state.lock().await;
        state.song_selected = state.song_selected.min(lengths.songs.saturating_sub(1));
        state.favorites_selected = state
            .favorites_selected
            .min(lengths.favorites.saturating_sub(1));
        state.playlist_selected = state
            .playlist_selected
            .min(lengths.playlist.saturating_sub(1));
    }
}

struct ListLengths {
    songs: usize,
    favorites: usize,
    playlist: usize,
}

impl ListLengths {
    fn of(view: &SongsViewState) -> Self {
        Self {
            songs: view.filtered_songs().len(),
            favorites: view.entries(Collection::Favorites).len(),
            playlist: view.entries(Collection::Playlist).len(),
        }
    }
}
