use std::time::Duration;

use blockfall_engine::{Game, Session, SessionState};
use crossterm::event::Event;
use log::info;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    widgets::{Block, Padding},
};

use crate::{
    tui::{App, RenderMode, Runtime},
    view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

use super::action::Action;

const PLAYING_BINDINGS: &[KeyBinding] = &[
    KeyBinding::new(&["←", "A"], "Left"),
    KeyBinding::new(&["→", "D"], "Right"),
    KeyBinding::new(&["↓", "S"], "Drop"),
    KeyBinding::new(&["↑", "W"], "Rotate"),
    KeyBinding::new(&["P"], "Pause"),
    KeyBinding::new(&["Q"], "Quit"),
];
const PAUSED_BINDINGS: &[KeyBinding] = &[
    KeyBinding::new(&["P"], "Resume"),
    KeyBinding::new(&["Q"], "Quit"),
];
const IDLE_BINDINGS: &[KeyBinding] = &[
    KeyBinding::new(&["Enter", "R"], "New Game"),
    KeyBinding::new(&["Q"], "Quit"),
];

/// Interactive play screen driving a [`Game`] from the terminal.
#[derive(Debug)]
pub(crate) struct PlayApp {
    game: Game,
    frame_rate: f64,
    rendered_revision: Option<u64>,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(game: Game, frame_rate: f64) -> Self {
        Self {
            game,
            frame_rate,
            rendered_revision: None,
            is_exiting: false,
        }
    }

    pub(crate) fn game(&self) -> &Game {
        &self.game
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Game(intent) => _ = self.game.handle(intent),
            Action::NewGame if !self.game.is_started() => self.game.start(),
            Action::NewGame => {}
            Action::Quit => {
                info!("quit requested");
                self.is_exiting = true;
            }
        }
    }

    /// Requests a render if the game changed since the last request.
    fn sync_render(&mut self, runtime: &mut Runtime) {
        let revision = self.game.revision();
        if self.rendered_revision != Some(revision) {
            self.rendered_revision = Some(revision);
            runtime.request_render();
        }
    }

    fn key_bindings(&self) -> &'static [KeyBinding<'static>] {
        match self.game.session().map(Session::state) {
            Some(SessionState::Playing) => PLAYING_BINDINGS,
            Some(SessionState::Paused) => PAUSED_BINDINGS,
            Some(SessionState::GameOver) | None => IDLE_BINDINGS,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(self.frame_rate));
        runtime.set_render_mode(RenderMode::throttled_from_rate(self.frame_rate));
        self.game.start();
        self.sync_render(runtime);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        match event {
            Event::Key(key) => {
                if let Some(action) = Action::from_key(key) {
                    self.apply(action);
                }
            }
            Event::Resize(..) => runtime.request_render(),
            _ => {}
        }
        self.sync_render(runtime);
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(SessionDisplay::height()),
            Constraint::Length(1),
        ])
        .areas::<2>(frame.area());

        if let Some(session) = self.game.session() {
            frame.render_widget(SessionDisplay::new(session), main_area);
        }
        let help = KeyBindingDisplay::new(self.key_bindings())
            .block(Block::new().padding(Padding::horizontal(1)));
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, runtime: &mut Runtime, elapsed: Duration) {
        self.game.advance(elapsed);
        self.sync_render(runtime);
    }
}
