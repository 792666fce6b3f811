use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    ActionError, PieceCollisionError, SessionError,
    core::{
        board::{Board, LineClear},
        piece::{Position, Tetromino},
        rotation::rotate_with_kick,
    },
};

use super::{
    achievement::{Achievement, Milestones, TETRIS_ACHIEVEMENT_ID},
    config::SessionConfig,
    event::GameEvent,
    game_stats::{GameStats, LifetimeStats},
    piece_generator::PieceGenerator,
    snapshot::{PieceSnapshot, SessionSnapshot},
    store::{KeyValueStore, Progress, ProgressStore},
    timer::{DropTimer, drop_interval},
};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    /// No game has been started yet.
    #[default]
    Idle,
    Active,
    Paused,
    GameOver,
}

/// A player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    TogglePause,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActivePiece {
    piece: Tetromino,
    position: Position,
}

/// A running game plus the progress that outlives it.
///
/// The session owns the board, the falling piece, the next-piece preview and
/// the drop timer. Time is never read from a clock: every time-dependent
/// operation takes `now`, a monotonic timestamp chosen by the caller.
///
/// Persistent progress (high score, achievements, galaxy points, lifetime
/// counters) is loaded from the store on construction and written back on
/// game over and whenever an achievement unlocks.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use galaxis_engine::{Action, GameSession, MemoryStore, SessionConfig};
///
/// let mut session = GameSession::new(MemoryStore::new(), SessionConfig::default());
/// session.start(Duration::ZERO);
/// assert!(session.state().is_active());
///
/// session.apply(Action::HardDrop, Duration::ZERO).unwrap();
/// assert_eq!(session.lifetime_stats().total_pieces_placed, 1);
///
/// // One second later the automatic drop has moved the new piece down once.
/// assert_eq!(session.advance(Duration::from_secs(1)), 1);
/// ```
#[derive(Debug)]
pub struct GameSession<S> {
    store: ProgressStore<S>,
    config: SessionConfig,
    generator: PieceGenerator,
    state: SessionState,
    board: Board,
    active: Option<ActivePiece>,
    next: Option<Tetromino>,
    stats: GameStats,
    progress: Progress,
    timer: DropTimer,
    events: Vec<GameEvent>,
}

impl<S> GameSession<S>
where
    S: KeyValueStore,
{
    /// Creates an idle session, loading persisted progress from `store`.
    pub fn new(store: S, config: SessionConfig) -> Self {
        let store = ProgressStore::new(store);
        let progress = store.load();
        let generator = config
            .seed
            .map_or_else(PieceGenerator::new, PieceGenerator::with_seed);
        Self {
            store,
            config,
            generator,
            state: SessionState::Idle,
            board: Board::new(),
            active: None,
            next: None,
            stats: GameStats::new(),
            progress,
            timer: DropTimer::new(),
            events: vec![],
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        self.store.store()
    }

    pub fn into_store(self) -> S {
        self.store.into_inner()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<(&Tetromino, Position)> {
        self.active.as_ref().map(|a| (&a.piece, a.position))
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<&Tetromino> {
        self.next.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn high_score(&self) -> usize {
        self.progress.high_score
    }

    #[must_use]
    pub fn galaxy_points(&self) -> usize {
        self.progress.achievements.galaxy_points()
    }

    #[must_use]
    pub fn achievements(&self) -> Vec<Achievement> {
        self.progress.achievements.achievements()
    }

    #[must_use]
    pub fn lifetime_stats(&self) -> &LifetimeStats {
        &self.progress.lifetime
    }

    /// Number of four-line clears counted towards the five-tetris achievement.
    #[must_use]
    pub fn tetris_count(&self) -> usize {
        self.progress.tetris_count
    }

    /// When the next automatic drop is due, if the timer is running.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timer.next_deadline()
    }

    /// Where the active piece would land on a hard drop.
    #[must_use]
    pub fn ghost_position(&self) -> Option<Position> {
        self.active.as_ref().map(|a| self.drop_position(a))
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let active_piece = self
            .active
            .as_ref()
            .map(|a| PieceSnapshot::new(&a.piece, a.position));
        let ghost_piece = self
            .active
            .as_ref()
            .map(|a| PieceSnapshot::new(&a.piece, self.drop_position(a)));
        SessionSnapshot {
            state: self.state,
            board: self.board.clone(),
            active_piece,
            ghost_piece,
            next_piece: self.next.as_ref().map(Tetromino::kind),
            score: self.stats.score(),
            level: self.stats.level(),
            lines: self.stats.lines(),
            high_score: self.progress.high_score,
            galaxy_points: self.galaxy_points(),
            achievements: self.achievements(),
            lifetime: self.progress.lifetime,
            tetris_count: self.progress.tetris_count,
            is_game_active: self.state.is_active() || self.state.is_paused(),
            is_paused: self.state.is_paused(),
        }
    }

    /// Takes every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Starts a new game, or resumes a paused one.
    ///
    /// Does nothing while a game is active.
    pub fn start(&mut self, now: Duration) {
        match self.state {
            SessionState::Idle | SessionState::GameOver => self.new_game(now),
            SessionState::Paused => self.toggle_pause(now),
            SessionState::Active => {}
        }
    }

    /// Abandons the current game, if any, and starts a new one.
    ///
    /// An abandoned game goes through the regular game-over handling, so its
    /// score still counts for the high score.
    pub fn restart(&mut self, now: Duration) {
        self.end_game();
        self.new_game(now);
    }

    /// Ends the current game as if the stack had topped out.
    ///
    /// Does nothing unless a game is active or paused.
    pub fn end_game(&mut self) {
        if self.state.is_active() || self.state.is_paused() {
            self.game_over();
        }
    }

    pub fn toggle_pause(&mut self, now: Duration) {
        match self.state {
            SessionState::Active => {
                self.state = SessionState::Paused;
                self.timer.stop();
                log::debug!("paused");
            }
            SessionState::Paused => {
                self.state = SessionState::Active;
                self.timer.start(now, drop_interval(self.stats.level()));
                log::debug!("resumed");
            }
            SessionState::Idle | SessionState::GameOver => {}
        }
    }

    pub fn try_move_left(&mut self) -> Result<(), ActionError> {
        self.try_shift(-1)
    }

    pub fn try_move_right(&mut self) -> Result<(), ActionError> {
        self.try_shift(1)
    }

    pub fn try_rotate(&mut self) -> Result<(), ActionError> {
        let active = self.current()?;
        let (piece, position) = rotate_with_kick(&self.board, &active.piece, active.position)
            .ok_or(PieceCollisionError)?;
        self.active = Some(ActivePiece { piece, position });
        self.events.push(GameEvent::Rotated);
        Ok(())
    }

    /// Moves the active piece down one row for 1 point, or lands it if blocked.
    pub fn try_soft_drop(&mut self) -> Result<(), ActionError> {
        let active = self.current()?;
        let below = active.position.down();
        if self.board.is_colliding(active.piece.shape(), below) {
            return self.land();
        }
        self.active = Some(ActivePiece {
            position: below,
            ..active
        });
        self.stats.add_drop_bonus(1);
        self.events.push(GameEvent::Moved);
        Ok(())
    }

    /// Drops the active piece as far as it goes and lands it.
    ///
    /// Awards 2 points per row fallen and returns the number of rows. The
    /// piece lands even when it could not fall at all.
    pub fn hard_drop(&mut self) -> Result<usize, ActionError> {
        self.current()?;
        let (active, next) = self.landing_pieces()?;
        let position = self.drop_position(&active);
        let fallen = usize::try_from(position.y - active.position.y).unwrap_or(0);
        self.stats.add_drop_bonus(2 * fallen);
        self.progress.lifetime.record_hard_drop();
        self.commit_landing(ActivePiece { position, ..active }, next);
        Ok(fallen)
    }

    /// One automatic drop step. Does nothing unless a game is active.
    pub fn tick(&mut self) {
        if !self.state.is_active() {
            return;
        }
        if let Err(e) = self.try_soft_drop() {
            log::debug!("automatic drop skipped: {e}");
        }
    }

    /// Runs every automatic drop that is due at `now`, in order.
    ///
    /// Returns the number of drops performed.
    pub fn advance(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while self.timer.poll(now) {
            self.tick();
            fired += 1;
        }
        fired
    }

    /// Applies a player action at `now`.
    ///
    /// Automatic drops due before `now` run first, so an input never
    /// overtakes a tick that was already due.
    pub fn apply(&mut self, action: Action, now: Duration) -> Result<(), ActionError> {
        self.advance(now);
        match action {
            Action::MoveLeft => self.try_move_left(),
            Action::MoveRight => self.try_move_right(),
            Action::Rotate => self.try_rotate(),
            Action::SoftDrop => self.try_soft_drop(),
            Action::HardDrop => self.hard_drop().map(|_| ()),
            Action::TogglePause => {
                self.toggle_pause(now);
                Ok(())
            }
            Action::Restart => {
                self.restart(now);
                Ok(())
            }
        }
    }

    fn current(&self) -> Result<ActivePiece, ActionError> {
        if !self.state.is_active() {
            return Err(ActionError::NotActive);
        }
        self.active
            .ok_or_else(|| invariant_violated(SessionError::NoActivePiece))
    }

    fn try_shift(&mut self, dx: i32) -> Result<(), ActionError> {
        let active = self.current()?;
        let position = active.position.offset(dx, 0);
        if self.board.is_colliding(active.piece.shape(), position) {
            return Err(PieceCollisionError.into());
        }
        self.active = Some(ActivePiece { position, ..active });
        self.events.push(GameEvent::Moved);
        Ok(())
    }

    fn drop_position(&self, active: &ActivePiece) -> Position {
        let shape = active.piece.shape();
        let mut position = active.position;
        while !self.board.is_colliding(shape, position.down()) {
            position = position.down();
        }
        position
    }

    fn new_game(&mut self, now: Duration) {
        self.board = Board::new();
        self.stats = GameStats::new();
        if self.config.tetris_counter.is_reset_per_game()
            && !self
                .progress
                .achievements
                .is_unlocked(TETRIS_ACHIEVEMENT_ID)
        {
            self.progress.tetris_count = 0;
        }

        let first = self.generator.next_piece();
        self.next = Some(self.generator.next_piece());
        self.state = SessionState::Active;
        self.timer.start(now, drop_interval(self.stats.level()));
        log::debug!("new game started");
        self.spawn(first);
    }

    /// Puts `piece` at the spawn position, or ends the game if it is blocked.
    fn spawn(&mut self, piece: Tetromino) {
        let position = Position::spawn(piece.shape());
        if self.board.is_colliding(piece.shape(), position) {
            self.active = None;
            self.game_over();
            return;
        }
        self.active = Some(ActivePiece { piece, position });
    }

    fn land(&mut self) -> Result<(), ActionError> {
        let (active, next) = self.landing_pieces()?;
        self.commit_landing(active, next);
        Ok(())
    }

    /// The piece to land and the piece to spawn after it.
    ///
    /// Checked before anything is changed, so a failed landing leaves the
    /// session untouched.
    fn landing_pieces(&self) -> Result<(ActivePiece, Tetromino), ActionError> {
        let active = self
            .active
            .ok_or_else(|| invariant_violated(SessionError::NoActivePiece))?;
        let next = self
            .next
            .ok_or_else(|| invariant_violated(SessionError::NoNextPiece))?;
        Ok((active, next))
    }

    fn commit_landing(&mut self, active: ActivePiece, next: Tetromino) {
        let LineClear {
            board,
            lines_cleared,
        } = self.board.merged(&active.piece, active.position).cleared();
        self.board = board;
        self.active = None;
        self.events.push(GameEvent::Dropped);

        let level_before = self.stats.level();
        self.stats.complete_piece_drop(lines_cleared);
        self.progress.lifetime.record_piece(lines_cleared);
        if lines_cleared > 0 {
            self.events.push(GameEvent::LinesCleared(lines_cleared));
        }
        if lines_cleared == 4 {
            self.progress.tetris_count += 1;
        }
        if self.evaluate_achievements() {
            self.persist();
        }

        let level = self.stats.level();
        if level != level_before {
            self.timer.reschedule(drop_interval(level));
            self.events.push(GameEvent::LevelUp(level));
            log::debug!("level up to {level}");
        }

        self.next = Some(self.generator.next_piece());
        self.spawn(next);
    }

    fn game_over(&mut self) {
        self.state = SessionState::GameOver;
        self.active = None;
        let score = self.stats.score();
        if score > self.progress.high_score {
            self.progress.high_score = score;
            log::info!("new high score {score}");
        }
        self.evaluate_achievements();
        self.persist();
        self.timer.stop();
        self.events.push(GameEvent::GameOver);
        log::info!(
            "game over: score {score}, level {}, lines {}",
            self.stats.level(),
            self.stats.lines()
        );
    }

    /// Returns whether anything was unlocked.
    fn evaluate_achievements(&mut self) -> bool {
        let milestones = Milestones {
            score: self.stats.score(),
            level: self.stats.level(),
            total_lines_cleared: self.progress.lifetime.total_lines_cleared,
            total_hard_drops: self.progress.lifetime.total_hard_drops,
            tetris_count: self.progress.tetris_count,
        };
        let unlocked = self.progress.achievements.evaluate(&milestones);
        for &id in &unlocked {
            log::info!("achievement unlocked: {id}");
            self.events.push(GameEvent::AchievementUnlocked(id));
        }
        !unlocked.is_empty()
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.progress) {
            log::warn!("failed to save progress: {e}");
        }
    }
}

fn invariant_violated(e: SessionError) -> ActionError {
    log::error!("invariant violated: {e}");
    e.into()
}
