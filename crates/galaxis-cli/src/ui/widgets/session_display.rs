use galaxis_engine::{SessionSnapshot, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{
    AchievementsDisplay, BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style,
};

#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: &'a SessionSnapshot,
    toast: Option<&'a str>,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(snapshot: &'a SessionSnapshot) -> Self {
        Self {
            snapshot,
            toast: None,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    /// Short notice shown under the board, e.g. an unlocked achievement.
    pub fn toast(self, toast: Option<&'a str>) -> Self {
        Self { toast, ..self }
    }
}

fn popup(state: SessionState) -> Option<(&'static str, Style)> {
    match state {
        SessionState::Active => None,
        SessionState::Idle => Some((
            "PRESS ENTER\nTO LAUNCH",
            Style::new().fg(color::BLACK).bg(color::STARLIGHT),
        )),
        SessionState::Paused => Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW))),
        SessionState::GameOver => Some((
            "GAME OVER\nENTER: NEW GAME",
            Style::new().fg(color::WHITE).bg(color::RED),
        )),
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let snapshot = self.snapshot;
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match snapshot.state {
            SessionState::Idle => color::GRAY,
            SessionState::Active => color::STARLIGHT,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_board = BoardDisplay::new(&snapshot.board)
            .falling_piece(snapshot.active_piece.as_ref())
            .ghost(snapshot.ghost_piece.as_ref())
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let next_panel = PieceDisplay::new()
            .piece(snapshot.next_piece)
            .block(panel("NEXT"));
        let session_stats = SessionStatsDisplay::new(snapshot).block(panel("STATS"));
        let achievements = AchievementsDisplay::new(&snapshot.achievements).block(panel("BADGES"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(u16::max(next_panel.width(), session_stats.width())),
            Constraint::Length(game_board.width()),
            Constraint::Length(achievements.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [next_area, stats_area] = Layout::vertical([
            Constraint::Length(next_panel.height()),
            Constraint::Length(session_stats.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let next_area = next_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(next_panel.width())]).flex(Flex::End),
        )[0];
        let stats_area = stats_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(session_stats.width())]).flex(Flex::End),
        )[0];

        let [board_area, toast_area] = Layout::vertical([
            Constraint::Length(game_board.height()),
            Constraint::Length(1),
        ])
        .areas(center_column);

        let [achievements_area] =
            Layout::vertical([Constraint::Length(achievements.height())]).areas(right_column);

        let game_board_width = game_board.width();
        next_panel.render(next_area, buf);
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        achievements.render(achievements_area, buf);

        if let Some(toast) = self.toast {
            Line::styled(toast, style::UNLOCKED)
                .centered()
                .render(toast_area, buf);
        }

        if let Some((text, style)) = popup(snapshot.state) {
            let text = Text::styled(text, style).centered();
            let height = u16::try_from(text.height()).unwrap_or(1);
            let block = Block::new().style(style);
            let area = board_area.centered(
                Constraint::Length(game_board_width),
                Constraint::Length(height + 2),
            );
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(height)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use galaxis_engine::{GameSession, MemoryStore, PieceSeed, SessionConfig};

    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn render(snapshot: &SessionSnapshot, toast: Option<&str>) -> String {
        let area = Rect::new(0, 0, 80, 26);
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(snapshot).toast(toast).render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn test_popup_by_state() {
        assert!(popup(SessionState::Active).is_none());
        assert!(popup(SessionState::Paused).is_some_and(|(text, _)| text == "PAUSED"));
        assert!(popup(SessionState::GameOver).is_some_and(|(text, _)| text.starts_with("GAME OVER")));
    }

    #[test]
    fn test_render_idle_and_paused() {
        let config = SessionConfig {
            seed: Some(PieceSeed::from_bytes([3; 16])),
            ..SessionConfig::default()
        };
        let mut session = GameSession::new(MemoryStore::new(), config);
        let idle = render(&session.snapshot(), None);
        assert!(idle.contains("PRESS ENTER"));
        assert!(idle.contains("STATS"));
        assert!(idle.contains("BADGES"));

        session.start(Duration::ZERO);
        let active = render(&session.snapshot(), Some("Level 2"));
        assert!(!active.contains("PRESS ENTER"));
        assert!(active.contains("Level 2"));

        session.toggle_pause(Duration::ZERO);
        assert!(render(&session.snapshot(), None).contains("PAUSED"));
    }
}
