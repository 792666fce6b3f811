use serde::Serialize;

/// Something that happened during play, for sound and visual feedback.
///
/// Events queue up inside the session until
/// [`GameSession::drain_events`](super::GameSession::drain_events) is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum GameEvent {
    /// The active piece moved one cell sideways or down.
    Moved,
    Rotated,
    /// The active piece locked into the board.
    Dropped,
    /// One to four rows were cleared by the last lock.
    LinesCleared(usize),
    GameOver,
    AchievementUnlocked(&'static str),
    LevelUp(usize),
}
