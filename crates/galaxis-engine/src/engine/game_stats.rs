use serde::{Deserialize, Serialize};

/// Score values for line clears at level 1.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Number of cleared lines needed to advance one level.
pub const LINES_PER_LEVEL: usize = 10;

/// Points awarded for clearing `lines` rows at once while playing at `level`.
///
/// Clears of more than four rows cannot happen with tetrominoes and score
/// nothing.
#[must_use]
pub fn line_clear_score(lines: usize, level: usize) -> usize {
    SCORE_TABLE.get(lines).copied().unwrap_or(0) * level
}

/// Level reached after clearing `lines` rows in total.
#[must_use]
pub const fn level_for_lines(lines: usize) -> usize {
    lines / LINES_PER_LEVEL + 1
}

/// Per-game statistics: score, level and cleared lines.
///
/// # Scoring
///
/// - Soft drop: 1 point per row
/// - Hard drop: 2 points per row fallen
/// - Line clears: [`line_clear_score`] at the level before the clear
///
/// There are no combo, back-to-back or T-spin bonuses.
///
/// # Example
///
/// ```
/// use galaxis_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4); // Tetris (4 lines)
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.lines(), 4);
/// assert_eq!(stats.level(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStats {
    score: usize,
    level: usize,
    lines: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates the statistics of a fresh game: score 0, level 1, no lines.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
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

    #[must_use]
    pub const fn lines(&self) -> usize {
        self.lines
    }

    /// Adds drop bonus points (soft or hard drop distance).
    pub const fn add_drop_bonus(&mut self, points: usize) {
        self.score += points;
    }

    /// Updates score, lines and level after a piece locks.
    ///
    /// Returns the points awarded for the clear.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        let points = line_clear_score(cleared_lines, self.level);
        self.score += points;
        self.lines += cleared_lines;
        self.level = level_for_lines(self.lines);
        points
    }
}

/// Counters that accumulate across every game ever played.
///
/// Serialized with camelCase keys, e.g.
/// `{"totalLinesCleared":12,"totalPiecesPlaced":40,"totalHardDrops":7}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeStats {
    pub total_lines_cleared: usize,
    pub total_pieces_placed: usize,
    pub total_hard_drops: usize,
}

impl LifetimeStats {
    pub const fn record_piece(&mut self, cleared_lines: usize) {
        self.total_lines_cleared += cleared_lines;
        self.total_pieces_placed += 1;
    }

    pub const fn record_hard_drop(&mut self) {
        self.total_hard_drops += 1;
    }
}
