//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (truncation, scrollable lists)
//! - `layout`: Top bar and sidebar (favorites, playlist)
//! - `songs`: Song cards with favorite and playlist toggles
//! - `player`: Bottom bar with the selected song's audio source
//! - `overlays`: Help popup

mod utils;
mod layout;
mod songs;
mod player;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{SongsViewState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, view_state: &SongsViewState, ui_state: &UiState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + sync status
                Constraint::Min(0),    // Songs + sidebar
                Constraint::Length(3), // Player bar
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], view_state, ui_state);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(70), // Song cards
                Constraint::Percentage(30), // Favorites + playlist
            ])
            .split(chunks[1]);

        songs::render_songs(frame, main_chunks[0], view_state, ui_state);
        layout::render_sidebar(frame, main_chunks[1], view_state, ui_state);

        let now_playing = ui_state
            .now_playing
            .as_ref()
            .and_then(|id| view_state.find_song(id));
        player::render_player_bar(frame, chunks[2], now_playing);

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
