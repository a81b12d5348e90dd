use std::time::Duration;

/// Number of cleared lines needed to advance one level.
pub const LINES_PER_LEVEL: usize = 10;

const SCORE_PER_LINE: usize = 100;

/// Game statistics tracking score, level, lines cleared and piece count.
///
/// # Scoring
///
/// Each line clear is worth `100 × lines × level`, using the level in effect before the
/// clear. The level is recomputed from the total line count after every clear, starting
/// at 1 and advancing every [`LINES_PER_LEVEL`] lines.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 400);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new tracker: score and counters at zero, level 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by the number of lines they cleared.
    ///
    /// Index 0 counts locks that cleared nothing, index 4 counts four-line clears.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Time between gravity ticks at the current level.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        drop_interval(self.level)
    }

    /// Updates statistics after a piece locks.
    ///
    /// Returns the new level if this drop changed it.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> Option<usize> {
        self.completed_pieces += 1;
        self.line_cleared_counter[cleared_lines.min(4)] += 1;
        if cleared_lines == 0 {
            return None;
        }

        let previous_level = self.level;
        self.total_cleared_lines += cleared_lines;
        self.score += cleared_lines * SCORE_PER_LINE * previous_level;
        self.level = self.total_cleared_lines / LINES_PER_LEVEL + 1;
        (self.level != previous_level).then_some(self.level)
    }

    #[cfg(test)]
    pub(crate) fn set_total_cleared_lines(&mut self, lines: usize) {
        self.total_cleared_lines = lines;
        self.level = lines / LINES_PER_LEVEL + 1;
    }
}

/// Time between gravity ticks at `level`: `max(100, 1000 - level × 100)` milliseconds.
#[must_use]
pub fn drop_interval(level: usize) -> Duration {
    let level = u64::try_from(level).unwrap_or(u64::MAX);
    Duration::from_millis(100 + u64::saturating_sub(900, level.saturating_mul(100)))
}
