//! Player bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::Song;

/// Bottom bar showing the selected song and its audio source.
/// Playback itself is left to whatever player opens the URL.
pub fn render_player_bar(frame: &mut Frame, area: Rect, song: Option<&Song>) {
    let (title, source) = match song {
        Some(song) => (
            format!(" ▶ {} | {} ({}) ", song.title, song.singer, song.genre),
            if song.song_url.is_empty() {
                "No audio source".to_string()
            } else {
                song.song_url.clone()
            },
        ),
        None => (
            " No song selected ".to_string(),
            "Select a song and press Enter".to_string(),
        ),
    };

    let player = Paragraph::new(source)
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(" H: help ").right_aligned())
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(player, area);
}
