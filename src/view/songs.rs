//! Song cards: details, audio source, favorite and playlist toggles

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{image_source, ActiveSection, Collection, Song, SongsViewState, UiState};
use super::utils::{render_scrollable_list, section_border_style, truncate_string};

const FAVORITE_ON: &str = "♥";
const FAVORITE_OFF: &str = "♡";
const PENDING_LABEL: &str = "[Saving...]";

pub fn render_songs(frame: &mut Frame, area: Rect, view_state: &SongsViewState, ui_state: &UiState) {
    let is_focused = ui_state.active_section == ActiveSection::Songs;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Songs List ")
        .title_bottom(Line::from(format!(" Total songs: {} ", view_state.songs().len())).right_aligned())
        .padding(Padding::horizontal(1))
        .border_style(section_border_style(is_focused));

    if let Some(empty) = view_state.empty_state() {
        let message = Paragraph::new(empty.message())
            .style(Style::default().fg(Color::DarkGray))
            .centered()
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = view_state
        .filtered_songs()
        .into_iter()
        .enumerate()
        .map(|(i, song)| {
            let selected = i == ui_state.song_selected;
            song_card(song, view_state, ui_state, selected && is_focused, selected, content_width)
        })
        .collect();

    render_scrollable_list(frame, area, items, ui_state.song_selected, block);
}

fn song_card(
    song: &Song,
    view_state: &SongsViewState,
    ui_state: &UiState,
    is_highlighted: bool,
    is_selected: bool,
    width: usize,
) -> ListItem<'static> {
    let title_style = if is_highlighted {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if is_selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let detail_style = Style::default().fg(Color::Gray);

    let heart = if ui_state.is_in_flight(Collection::Favorites, &song.id) {
        Span::styled("…", Style::default().fg(Color::Yellow))
    } else if view_state.in_favorites(&song.id) {
        Span::styled(FAVORITE_ON, Style::default().fg(Color::Red))
    } else {
        Span::styled(FAVORITE_OFF, Style::default().fg(Color::DarkGray))
    };

    let playlist_button = if ui_state.is_in_flight(Collection::Playlist, &song.id) {
        Span::styled(PENDING_LABEL, Style::default().fg(Color::Yellow))
    } else if view_state.in_playlist(&song.id) {
        Span::styled("[Remove From Playlist]", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled("[Add to Playlist]", Style::default().fg(Color::Blue))
    };

    // Title on the left, playlist toggle pushed to the right edge
    let button_width = playlist_button.content.chars().count();
    let title_width = width.saturating_sub(button_width + 4);
    let title = truncate_string(&song.title, title_width);
    let gap = width.saturating_sub(2 + title.chars().count() + button_width).max(1);

    let header = Line::from(vec![
        heart,
        Span::raw(" "),
        Span::styled(title, title_style),
        Span::raw(" ".repeat(gap)),
        playlist_button,
    ]);

    let details = Line::from(Span::styled(
        truncate_string(&format!("  Genre: {}   Singer: {}", song.genre, song.singer), width),
        detail_style,
    ));
    let audio = Line::from(vec![
        Span::styled("  ♪ ", Style::default().fg(Color::Cyan)),
        Span::styled(
            truncate_string(&song.song_url, width.saturating_sub(4)),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    let image = Line::from(Span::styled(
        truncate_string(&format!("  Image: {}", image_source(song)), width),
        Style::default().fg(Color::DarkGray),
    ));

    ListItem::new(Text::from(vec![header, details, audio, image, Line::raw("")]))
}
