//! Layout rendering (top bar, sidebar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, Collection, SongsViewState, UiState};
use super::utils::{render_scrollable_list, section_border_style};

const SEARCH_PLACEHOLDER: &str = "Search by singer, genre, or song name";

pub fn render_top_bar(frame: &mut Frame, area: Rect, view_state: &SongsViewState, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(25), // Sync status
        ])
        .split(area);

    let is_focused = ui_state.active_section == ActiveSection::Search;

    let (search_text, search_style) = if view_state.search().is_empty() {
        (SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else if is_focused {
        (view_state.search(), Style::default().fg(Color::Green))
    } else {
        (view_state.search(), Style::default().fg(Color::White))
    };

    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(section_border_style(is_focused)),
        );
    frame.render_widget(search, chunks[0]);

    let sync_text = match ui_state.last_synced {
        Some(at) => format!("Synced {}", at.format("%H:%M:%S")),
        None => "Not synced yet".to_string(),
    };
    let sync = Paragraph::new(sync_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Backend "));
    frame.render_widget(sync, chunks[1]);
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, view_state: &SongsViewState, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_collection(
        frame,
        chunks[0],
        view_state,
        ui_state,
        Collection::Favorites,
        ui_state.favorites_selected,
    );
    render_collection(
        frame,
        chunks[1],
        view_state,
        ui_state,
        Collection::Playlist,
        ui_state.playlist_selected,
    );
}

fn render_collection(
    frame: &mut Frame,
    area: Rect,
    view_state: &SongsViewState,
    ui_state: &UiState,
    collection: Collection,
    selected: usize,
) {
    let is_focused = ui_state.active_section.collection() == Some(collection);
    let entries = view_state.entries(collection);
    let width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == selected && is_focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let label = super::utils::truncate_string(&view_state.entry_label(entry), width);
            ListItem::new(label).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ({}) ", collection.label(), entries.len()))
        .padding(Padding::horizontal(1))
        .border_style(section_border_style(is_focused));

    render_scrollable_list(frame, area, items, selected, block);
}
