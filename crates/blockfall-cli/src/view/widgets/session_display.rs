use blockfall_engine::{Session, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// Full play screen for one session: stats, board and next-piece preview.
///
/// A popup covers the board while the session is paused or over.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a Session,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height() -> u16 {
        blockfall_engine::GRID_HEIGHT as u16 + 2
    }

    fn popup(&self) -> Option<(Text<'static>, Style)> {
        match self.session.state() {
            SessionState::Playing => None,
            SessionState::Paused => Some((Text::from("PAUSED"), style::PAUSED_POPUP)),
            SessionState::GameOver => {
                let text = Text::from(vec![
                    Line::from("GAME OVER"),
                    Line::from(format!("Score: {}", self.session.score())),
                    Line::from(format!("Level: {}", self.session.level())),
                ]);
                Some((text, style::GAME_OVER_POPUP))
            }
        }
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
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.session.state() {
            SessionState::Playing => color::WHITE,
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

        let game_board = BoardDisplay::new(self.session.grid())
            .falling_piece(self.session.falling_piece().copied())
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let next_panel = PieceDisplay::new()
            .piece(self.session.next_piece().copied())
            .block(panel("NEXT"));
        let session_stats = SessionStatsDisplay::new(self.session).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some((text, style)) = self.popup() {
            #[expect(clippy::cast_possible_truncation)]
            let text_height = text.height() as u16;
            let block = Block::new().style(style);
            let area = board_area.centered(
                Constraint::Length(game_board_width),
                Constraint::Length(text_height + 2),
            );
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.style(style)
                .centered()
                .render(inner.centered_vertically(Constraint::Length(text_height)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Game, Intent};

    use super::*;

    fn render(session: &Session) -> Buffer {
        let area = Rect::new(0, 0, 60, SessionDisplay::height());
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(session).render(area, &mut buf);
        buf
    }

    fn contains(buf: &Buffer, needle: &str) -> bool {
        let area = buf.area;
        (area.top()..area.bottom()).any(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect();
            line.contains(needle)
        })
    }

    #[test]
    fn test_playing_has_no_popup() {
        let mut game = Game::with_seed(1);
        game.start();
        let buf = render(game.session().unwrap());
        assert!(contains(&buf, "NEXT"));
        assert!(contains(&buf, "STATS"));
        assert!(!contains(&buf, "PAUSED"));
    }

    #[test]
    fn test_paused_popup() {
        let mut game = Game::with_seed(1);
        game.start();
        game.handle(Intent::TogglePause);
        assert!(contains(&render(game.session().unwrap()), "PAUSED"));
    }

    #[test]
    fn test_game_over_popup_shows_final_score() {
        let mut game = Game::with_seed(1);
        game.start();
        while !game.is_game_over() {
            game.handle(Intent::SoftDrop);
        }
        let buf = render(game.session().unwrap());
        assert!(contains(&buf, "GAME OVER"));
        assert!(contains(&buf, "Score: 0"));
        assert!(contains(&buf, "Level: 1"));
    }
}
