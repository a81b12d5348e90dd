use blockfall_engine::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the play screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Game(Intent),
    NewGame,
    Quit,
}

impl Action {
    pub(crate) fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Self::Quit,
            KeyCode::Left | KeyCode::Char('a' | 'A') => Self::Game(Intent::MoveLeft),
            KeyCode::Right | KeyCode::Char('d' | 'D') => Self::Game(Intent::MoveRight),
            KeyCode::Down | KeyCode::Char('s' | 'S') => Self::Game(Intent::SoftDrop),
            KeyCode::Up | KeyCode::Char('w' | 'W') => Self::Game(Intent::Rotate),
            KeyCode::Char('p' | 'P') => Self::Game(Intent::TogglePause),
            KeyCode::Enter | KeyCode::Char('r' | 'R') => Self::NewGame,
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Self::Quit,
            _ => return None,
        };
        Some(action)
    }
}
