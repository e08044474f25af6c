//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, Collection};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = &self.model;

        // Help popup swallows everything except closing it
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        // Tab cycling works from every section, including search
        match key.code {
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                model.cycle_section_backward().await;
                return Ok(());
            }
            KeyCode::Tab => {
                model.cycle_section_forward().await;
                return Ok(());
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
                return Ok(());
            }
            _ => {}
        }

        // Search input filters live as the user types
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Enter | KeyCode::Down => {
                    model.set_active_section(ActiveSection::Songs).await;
                }
                KeyCode::Esc => {
                    model.clear_search().await;
                }
                KeyCode::Backspace => {
                    model.backspace_search().await;
                }
                KeyCode::Char(c) => {
                    if (c == 'q' || c == 'Q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        model.set_should_quit(true).await;
                    } else {
                        model.append_to_search(c).await;
                    }
                }
                _ => {}
            }
            return Ok(());
        }

        if ui_state.active_section == ActiveSection::Songs {
            match key.code {
                KeyCode::Char('f') | KeyCode::Char('F') => {
                    if let Some(song_id) = model.selected_song_id().await {
                        self.spawn_action(move |controller| async move {
                            controller.toggle_favorite(&song_id).await;
                        });
                    }
                    return Ok(());
                }
                KeyCode::Char('a') | KeyCode::Char('A') => {
                    if let Some(song_id) = model.selected_song_id().await {
                        self.spawn_action(move |controller| async move {
                            controller.toggle_playlist(&song_id).await;
                        });
                    }
                    return Ok(());
                }
                KeyCode::Enter => {
                    if let Some(song_id) = model.selected_song_id().await {
                        tracing::debug!(song_id = %song_id, "Selected song for playback");
                        model.set_now_playing(song_id).await;
                    }
                    return Ok(());
                }
                _ => {}
            }
        }

        if let Some(collection) = ui_state.active_section.collection() {
            if matches!(key.code, KeyCode::Delete | KeyCode::Char('x') | KeyCode::Char('X')) {
                if let Some(song_id) = model.selected_entry_song_id(collection).await {
                    self.spawn_action(move |controller| async move {
                        match collection {
                            Collection::Favorites => controller.remove_favorite(&song_id).await,
                            Collection::Playlist => controller.remove_from_playlist(&song_id).await,
                        };
                    });
                }
                return Ok(());
            }
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Up => {
                model.move_selection_up().await;
            }
            KeyCode::Down => {
                model.move_selection_down().await;
            }
            KeyCode::Char('/') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Esc => {
                model.set_active_section(ActiveSection::Search).await;
            }
            // Reload everything from the backend
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.spawn_action(|controller| async move {
                    controller.load_all().await;
                });
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.toggle_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}
