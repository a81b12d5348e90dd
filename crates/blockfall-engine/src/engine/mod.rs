//! Game engine logic and state management.
//!
//! This module drives the core data structures through a game:
//!
//! - [`PieceGenerator`] - Uniform random pieces with a one-piece preview
//! - [`Session`] - One game from spawn to top-out: motion, locking and stats
//! - [`GameStats`] - Score, level and line counters
//! - [`DropTimer`] - Repeating timer that paces gravity
//! - [`Game`] - Owns the session and its timer, routes player input
//!
//! # Game Flow
//!
//! 1. [`Game::start`] creates a session and schedules the drop timer
//! 2. The front end feeds wall-clock time to [`Game::advance`]; a due tick moves the
//!    falling piece down one row, at most once per call
//! 3. Player intents go through [`Game::handle`]
//! 4. A piece that cannot move down locks, completed rows are cleared and the next
//!    piece spawns
//! 5. Repeat until a new piece collides at its spawn position
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{Game, Intent};
//!
//! let mut game = Game::with_seed(7);
//! game.start();
//!
//! assert!(game.handle(Intent::MoveLeft));
//! game.advance(Duration::from_millis(900));
//!
//! let session = game.session().unwrap();
//! assert_eq!(session.falling_piece().unwrap().position().row(), 1);
//! ```

pub use self::{drop_timer::*, game::*, game_stats::*, piece_generator::*, session::*};

mod drop_timer;
mod game;
mod game_stats;
mod piece_generator;
mod session;
