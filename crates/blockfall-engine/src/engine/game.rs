use std::time::Duration;

use log::{info, trace};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::MotionError;

use super::{
    drop_timer::DropTimer,
    game_stats::drop_interval,
    piece_generator::PieceGenerator,
    session::{Descent, LockReport, Session},
};

/// A discrete player request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    TogglePause,
}

/// Owns the current session and paces it with a drop timer.
///
/// The front end feeds wall-clock time to [`Game::advance`] and player intents to
/// [`Game::handle`]. Each session gets its own piece generator, seeded from the game's
/// random source, so a seeded game replays the same piece sequence across restarts.
///
/// Every operation that reaches the session bumps [`Game::revision`]; a renderer redraws
/// whenever the revision it last saw differs.
#[derive(Debug, Clone)]
pub struct Game {
    rng: Pcg32,
    session: Option<Session>,
    timer: Option<DropTimer>,
    revision: u64,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game with no session, seeded from the OS's random data source.
    #[must_use]
    pub fn new() -> Self {
        Self::from_pcg(Pcg32::from_os_rng())
    }

    /// Creates a game with no session whose piece sequences are determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_pcg(Pcg32::seed_from_u64(seed))
    }

    const fn from_pcg(rng: Pcg32) -> Self {
        Self {
            rng,
            session: None,
            timer: None,
            revision: 0,
        }
    }

    /// The current or most recently finished session.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Returns `true` while a session is running, paused or not.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| !s.state().is_game_over())
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.state().is_paused())
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.state().is_game_over())
    }

    /// The pending drop timer, present only while a session is running.
    #[must_use]
    pub fn timer(&self) -> Option<&DropTimer> {
        self.timer.as_ref()
    }

    /// Changes whenever the visible state may have changed.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Starts a brand-new session, replacing any running one.
    pub fn start(&mut self) {
        self.cancel_timer();
        let session = Session::new(PieceGenerator::from_rng(&mut self.rng));
        let interval = session.stats().drop_interval();
        self.session = Some(session);
        self.schedule_timer(interval);
        info!("session started at level 1");
        self.touch();
    }

    /// Stops the pending drop timer, if any, and returns it.
    pub fn cancel_timer(&mut self) -> Option<DropTimer> {
        let timer = self.timer.take();
        if let Some(timer) = &timer {
            trace!("drop timer cancelled ({:?})", timer.interval());
        }
        timer
    }

    /// Replaces any pending drop timer with a fresh one firing every `interval`.
    pub fn schedule_timer(&mut self, interval: Duration) {
        self.cancel_timer();
        trace!("drop timer scheduled every {interval:?}");
        self.timer = Some(DropTimer::new(interval));
    }

    /// Feeds elapsed wall-clock time to the session and the drop timer.
    ///
    /// A due tick moves the falling piece down one row. At most one tick runs per call, so
    /// a single long step never drops the piece more than once.
    pub fn advance(&mut self, elapsed: Duration) {
        if self
            .session
            .as_mut()
            .is_some_and(|s| s.add_play_time(elapsed))
        {
            self.touch();
        }
        if self.timer.as_mut().is_some_and(|t| t.advance(elapsed)) {
            self.tick();
        }
    }

    /// Runs one gravity tick.
    fn tick(&mut self) {
        if self.accepts_motion() {
            self.drop_falling_piece();
        }
    }

    fn accepts_motion(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.state().is_playing())
    }

    fn drop_falling_piece(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };
        let descent = session.move_down();
        self.touch();
        if let Ok(Descent::Locked(report)) = descent {
            self.after_lock(report);
        }
    }

    fn after_lock(&mut self, report: LockReport) {
        if report.topped_out {
            self.game_over();
        } else if let Some(level) = report.new_level {
            info!("level up: {level}");
            self.schedule_timer(drop_interval(level));
        }
    }

    /// Ends the running session: the timer is cancelled and the final stats are kept
    /// readable until the next [`Game::start`].
    pub fn game_over(&mut self) {
        self.cancel_timer();
        let Some(session) = &mut self.session else {
            return;
        };
        session.finish();
        info!(
            "game over: score={}, level={}, lines={}, pieces={}",
            session.score(),
            session.level(),
            session.total_cleared_lines(),
            session.stats().completed_pieces(),
        );
        self.touch();
    }

    /// Routes a player intent to the session.
    ///
    /// Returns `false` if the intent was ignored: nothing is running, or the game is
    /// paused and the intent is not [`Intent::TogglePause`].
    pub fn handle(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => self.move_left(),
            Intent::MoveRight => self.move_right(),
            Intent::SoftDrop => self.soft_drop(),
            Intent::Rotate => self.rotate(),
            Intent::TogglePause => self.toggle_pause(),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.with_active_session(Session::try_move_left)
    }

    pub fn move_right(&mut self) -> bool {
        self.with_active_session(Session::try_move_right)
    }

    pub fn rotate(&mut self) -> bool {
        self.with_active_session(Session::try_rotate)
    }

    /// Moves the falling piece down one row, exactly like a gravity tick.
    pub fn soft_drop(&mut self) -> bool {
        if !self.accepts_motion() {
            return false;
        }
        self.drop_falling_piece();
        true
    }

    /// Pauses or resumes the running session. Does nothing otherwise.
    pub fn toggle_pause(&mut self) -> bool {
        let Some(session) = self
            .session
            .as_mut()
            .filter(|s| !s.state().is_game_over())
        else {
            return false;
        };
        session.toggle_pause();
        info!("{}", if session.state().is_paused() { "paused" } else { "resumed" });
        self.touch();
        true
    }

    fn with_active_session(
        &mut self,
        motion: impl FnOnce(&mut Session) -> Result<(), MotionError>,
    ) -> bool {
        let Some(session) = self.session.as_mut().filter(|s| s.state().is_playing()) else {
            return false;
        };
        // A rejected move is not a fault; the piece simply stays where it was.
        _ = motion(session);
        self.touch();
        true
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }
}
