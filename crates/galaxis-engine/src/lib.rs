pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding when moving falling piece")]
pub struct PieceCollisionError;

/// An engine invariant did not hold; the operation was aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SessionError {
    #[display("no active piece to land")]
    NoActivePiece,
    #[display("no next piece queued")]
    NoNextPiece,
}

/// Why a player action had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ActionError {
    #[display("no game in progress")]
    NotActive,
    #[display("{_0}")]
    Collision(PieceCollisionError),
    #[display("{_0}")]
    Invariant(SessionError),
}

impl From<PieceCollisionError> for ActionError {
    fn from(e: PieceCollisionError) -> Self {
        Self::Collision(e)
    }
}

impl From<SessionError> for ActionError {
    fn from(e: SessionError) -> Self {
        Self::Invariant(e)
    }
}
