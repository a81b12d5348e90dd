use std::time::Duration;

use log::debug;

use crate::{
    MotionError,
    core::{Grid, Piece},
};

use super::{game_stats::GameStats, piece_generator::PieceGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Outcome of moving the falling piece down one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Descent {
    /// The piece moved down.
    Moved,
    /// The piece could not move and was locked into the grid.
    Locked(LockReport),
}

/// What happened when a piece locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    /// Number of rows cleared by this lock.
    pub cleared_rows: usize,
    /// The new level, if this lock changed it.
    pub new_level: Option<usize>,
    /// The next piece collided at spawn and the session is over.
    pub topped_out: bool,
}

/// A single game, from the first spawn to the top-out.
///
/// The session owns the grid, the falling piece and the generator supplying its
/// successors. Every motion builds a candidate piece and swaps it in only if it fits,
/// so a rejected move leaves the session untouched.
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    falling_piece: Option<Piece>,
    generator: PieceGenerator,
    stats: GameStats,
    state: SessionState,
    play_time: Duration,
}

impl Session {
    /// Starts a session on an empty grid with the generator's first piece falling.
    #[must_use]
    pub fn new(mut generator: PieceGenerator) -> Self {
        let falling_piece = generator.next();
        Self {
            grid: Grid::EMPTY,
            falling_piece: Some(falling_piece),
            generator,
            stats: GameStats::new(),
            state: SessionState::Playing,
            play_time: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The falling piece, or `None` once the session is over.
    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    /// The piece that spawns after the falling one locks.
    #[must_use]
    pub fn next_piece(&self) -> Option<&Piece> {
        self.generator.peek()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn total_cleared_lines(&self) -> usize {
        self.stats.total_cleared_lines()
    }

    /// Time spent in the [`SessionState::Playing`] state.
    #[must_use]
    pub fn play_time(&self) -> Duration {
        self.play_time
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Freezes the session. Stats and grid stay readable.
    pub(crate) fn finish(&mut self) {
        self.state = SessionState::GameOver;
    }

    /// Counts `elapsed` as play time while playing. Returns `true` if it was counted.
    pub(crate) fn add_play_time(&mut self, elapsed: Duration) -> bool {
        if !self.state.is_playing() || elapsed.is_zero() {
            return false;
        }
        self.play_time += elapsed;
        true
    }

    fn active_piece(&self) -> Result<Piece, MotionError> {
        if !self.state.is_playing() {
            return Err(MotionError::Inactive);
        }
        self.falling_piece.ok_or(MotionError::Inactive)
    }

    fn try_replace(&mut self, candidate: Piece) -> Result<(), MotionError> {
        if self.grid.collides(&candidate) {
            return Err(MotionError::Collision);
        }
        self.falling_piece = Some(candidate);
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), MotionError> {
        let piece = self.active_piece()?;
        self.try_replace(piece.left())
    }

    pub fn try_move_right(&mut self) -> Result<(), MotionError> {
        let piece = self.active_piece()?;
        self.try_replace(piece.right())
    }

    /// Rotates the falling piece clockwise in place. There are no wall kicks.
    pub fn try_rotate(&mut self) -> Result<(), MotionError> {
        let piece = self.active_piece()?;
        self.try_replace(piece.rotated())
    }

    /// Moves the falling piece down one row, locking it if it cannot move.
    pub fn move_down(&mut self) -> Result<Descent, MotionError> {
        let piece = self.active_piece()?;
        match self.try_replace(piece.down()) {
            Ok(()) => Ok(Descent::Moved),
            Err(_) => Ok(Descent::Locked(self.lock(piece))),
        }
    }

    fn lock(&mut self, piece: Piece) -> LockReport {
        self.grid.merge(&piece);
        let cleared_rows = self.grid.clear_completed_rows();
        let new_level = self.stats.complete_piece_drop(cleared_rows);
        debug!(
            "locked {} at ({}, {}), cleared {cleared_rows} rows",
            piece.kind().as_char(),
            piece.position().col(),
            piece.position().row(),
        );

        let spawned = self.generator.next();
        let topped_out = self.grid.collides(&spawned);
        if topped_out {
            debug!("{} collides at spawn", spawned.kind().as_char());
            self.falling_piece = None;
            self.state = SessionState::GameOver;
        } else {
            self.falling_piece = Some(spawned);
        }

        LockReport {
            cleared_rows,
            new_level,
            topped_out,
        }
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn stats_mut(&mut self) -> &mut GameStats {
        &mut self.stats
    }

    #[cfg(test)]
    pub(crate) fn set_falling_piece(&mut self, piece: Piece) {
        self.falling_piece = Some(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, GRID_HEIGHT, GRID_WIDTH, PieceKind, PiecePosition};

    const GRAY: Cell = Cell::Filled(crate::core::PieceColor::from_rgb(0x80, 0x80, 0x80));

    fn session() -> Session {
        Session::new(PieceGenerator::with_seed(5))
    }

    fn piece_at(kind: PieceKind, col: i32, row: i32) -> Piece {
        Piece::new(kind).with_position(PiecePosition::new(col, row))
    }

    fn drop_until_locked(session: &mut Session) -> LockReport {
        loop {
            if let Descent::Locked(report) = session.move_down().unwrap() {
                return report;
            }
        }
    }

    #[test]
    fn test_new_session_has_falling_and_next_piece() {
        let session = session();
        assert!(session.state().is_playing());
        assert!(session.falling_piece().is_some());
        assert!(session.next_piece().is_some());
        assert_eq!(session.grid(), &Grid::EMPTY);
        assert_eq!(session.level(), 1);
    }

    #[test]
    fn test_move_left_stops_at_wall() {
        let mut session = session();
        session.set_falling_piece(piece_at(PieceKind::O, 3, 0));
        for _ in 0..10 {
            _ = session.try_move_left();
        }
        assert_eq!(session.falling_piece().unwrap().position().col(), 0);
        assert_eq!(session.try_move_left(), Err(MotionError::Collision));
        assert_eq!(session.falling_piece().unwrap().position().col(), 0);
    }

    #[test]
    fn test_move_right_stops_at_wall() {
        let mut session = session();
        session.set_falling_piece(piece_at(PieceKind::I, 3, 0));
        for _ in 0..10 {
            _ = session.try_move_right();
        }
        assert_eq!(session.falling_piece().unwrap().position().col(), 6);
    }

    #[test]
    fn test_rotate_reverts_on_collision() {
        let mut session = session();
        let vertical = piece_at(PieceKind::I, 9, 0).rotated();
        session.set_falling_piece(vertical);

        assert_eq!(session.try_rotate(), Err(MotionError::Collision));
        assert_eq!(session.falling_piece(), Some(&vertical));

        session.set_falling_piece(piece_at(PieceKind::T, 3, 5));
        assert_eq!(session.try_rotate(), Ok(()));
        assert_eq!(session.falling_piece().unwrap().shape().rows(), 3);
    }

    #[test]
    fn test_rotate_blocked_by_stack() {
        let mut session = session();
        session.set_falling_piece(piece_at(PieceKind::I, 3, 10));
        session.grid_mut().set_cell(3, 12, GRAY);
        let before = *session.falling_piece().unwrap();

        assert_eq!(session.try_rotate(), Err(MotionError::Collision));
        assert_eq!(session.falling_piece(), Some(&before));
    }

    #[test]
    fn test_move_down_locks_on_floor() {
        let mut session = session();
        session.set_falling_piece(piece_at(PieceKind::O, 0, 17));

        assert_eq!(session.move_down(), Ok(Descent::Moved));
        let report = drop_until_locked(&mut session);
        assert_eq!(
            report,
            LockReport {
                cleared_rows: 0,
                new_level: None,
                topped_out: false,
            }
        );

        let color = PieceKind::O.color();
        for (col, row) in [(0, 18), (1, 18), (0, 19), (1, 19)] {
            assert_eq!(session.grid().cell(col, row), Some(Cell::Filled(color)));
        }
        assert_eq!(session.stats().completed_pieces(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.total_cleared_lines(), 0);
        assert_eq!(
            session.falling_piece().unwrap().position(),
            PiecePosition::SPAWN
        );
    }

    #[test]
    fn test_lock_takes_preview_as_next_piece() {
        let mut session = session();
        let preview = *session.next_piece().unwrap();
        drop_until_locked(&mut session);
        assert_eq!(session.falling_piece(), Some(&preview));
    }

    #[test]
    fn test_lock_clears_rows_and_scores() {
        let mut session = session();
        for row in [18, 19] {
            for col in 2..GRID_WIDTH {
                session.grid_mut().set_cell(col, row, GRAY);
            }
        }
        session.set_falling_piece(piece_at(PieceKind::O, 0, 0));

        let report = drop_until_locked(&mut session);
        assert_eq!(report.cleared_rows, 2);
        assert_eq!(session.score(), 200);
        assert_eq!(session.total_cleared_lines(), 2);
        assert_eq!(session.grid(), &Grid::EMPTY);
    }

    #[test]
    fn test_lock_reports_level_change() {
        let mut session = session();
        session.stats_mut().set_total_cleared_lines(9);
        for col in 4..GRID_WIDTH {
            session.grid_mut().set_cell(col, GRID_HEIGHT - 1, GRAY);
        }
        session.set_falling_piece(piece_at(PieceKind::I, 0, 19));

        let Ok(Descent::Locked(report)) = session.move_down() else {
            panic!("I piece on the floor should lock");
        };
        assert_eq!(report.new_level, Some(2));
        assert_eq!(session.level(), 2);
        assert_eq!(session.score(), 100);
    }

    #[test]
    fn test_spawn_collision_ends_session() {
        let mut session = session();
        for row in 0..GRID_HEIGHT {
            session.grid_mut().set_cell(4, row, GRAY);
        }
        session.set_falling_piece(piece_at(PieceKind::O, 0, 0));

        let report = drop_until_locked(&mut session);
        assert!(report.topped_out);
        assert!(session.state().is_game_over());
        assert!(session.falling_piece().is_none());

        let grid = session.grid().clone();
        assert_eq!(session.move_down(), Err(MotionError::Inactive));
        assert_eq!(session.try_move_left(), Err(MotionError::Inactive));
        assert_eq!(session.try_rotate(), Err(MotionError::Inactive));
        assert_eq!(session.grid(), &grid);
    }

    #[test]
    fn test_pause_blocks_motion() {
        let mut session = session();
        let before = *session.falling_piece().unwrap();
        session.toggle_pause();
        assert!(session.state().is_paused());

        assert_eq!(session.move_down(), Err(MotionError::Inactive));
        assert_eq!(session.try_move_right(), Err(MotionError::Inactive));
        assert_eq!(session.falling_piece(), Some(&before));

        session.toggle_pause();
        assert_eq!(session.move_down(), Ok(Descent::Moved));
    }

    #[test]
    fn test_play_time_only_counts_while_playing() {
        let mut session = session();
        session.add_play_time(Duration::from_secs(2));
        session.toggle_pause();
        session.add_play_time(Duration::from_secs(5));
        session.toggle_pause();
        session.add_play_time(Duration::from_secs(1));
        assert_eq!(session.play_time(), Duration::from_secs(3));
    }
}
