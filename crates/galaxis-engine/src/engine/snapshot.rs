use serde::{Deserialize, Serialize};

use crate::core::{
    board::Board,
    piece::{PieceKind, Position, Tetromino},
};

use super::{achievement::Achievement, game_stats::LifetimeStats, session::SessionState};

/// A piece placed on the board, with its cells in board coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub position: Position,
    pub cells: Vec<Position>,
}

impl PieceSnapshot {
    #[must_use]
    pub fn new(piece: &Tetromino, position: Position) -> Self {
        Self {
            kind: piece.kind(),
            position,
            cells: piece
                .cells_at(position)
                .map(|(x, y)| Position::new(x, y))
                .collect(),
        }
    }
}

/// Read-only view of a session for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: SessionState,
    /// Locked cells only; the active piece is not merged in.
    pub board: Board,
    pub active_piece: Option<PieceSnapshot>,
    /// Where the active piece would land on a hard drop.
    pub ghost_piece: Option<PieceSnapshot>,
    pub next_piece: Option<PieceKind>,
    pub score: usize,
    pub level: usize,
    pub lines: usize,
    pub high_score: usize,
    pub galaxy_points: usize,
    pub achievements: Vec<Achievement>,
    pub lifetime: LifetimeStats,
    pub tetris_count: usize,
    /// A game is in progress, running or paused.
    pub is_game_active: bool,
    pub is_paused: bool,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::engine::{
        config::SessionConfig, piece_generator::PieceSeed, session::GameSession,
        store::MemoryStore,
    };

    #[test]
    fn test_piece_snapshot_cells() {
        let piece = Tetromino::new(PieceKind::O);
        let snapshot = PieceSnapshot::new(&piece, Position::new(4, 7));
        assert_eq!(snapshot.kind, PieceKind::O);
        assert_eq!(
            snapshot.cells,
            [
                Position::new(4, 7),
                Position::new(5, 7),
                Position::new(4, 8),
                Position::new(5, 8),
            ]
        );
    }

    #[test]
    fn test_idle_snapshot() {
        let session = GameSession::new(MemoryStore::new(), SessionConfig::default());
        let snapshot = session.snapshot();
        assert!(snapshot.state.is_idle());
        assert!(!snapshot.is_game_active);
        assert!(snapshot.active_piece.is_none());
        assert!(snapshot.next_piece.is_none());
        assert_eq!((snapshot.score, snapshot.level, snapshot.lines), (0, 1, 0));
        assert_eq!(snapshot.achievements.len(), 7);
    }

    #[test]
    fn test_snapshot_json_keys() {
        let config = SessionConfig {
            seed: Some(PieceSeed::from_bytes([1; 16])),
            ..SessionConfig::default()
        };
        let mut session = GameSession::new(MemoryStore::new(), config);
        session.start(Duration::ZERO);
        session.toggle_pause(Duration::ZERO);
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["state"], "paused");
        assert_eq!(json["isGameActive"], true);
        assert_eq!(json["isPaused"], true);
        assert_eq!(json["level"], 1);
        assert!(json["activePiece"]["cells"].is_array());
        assert!(json["lifetime"]["totalPiecesPlaced"].is_number());

        let parsed: SessionSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, session.snapshot());
    }
}
