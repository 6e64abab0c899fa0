//! Error types for the session core.
//!
//! None of these are fatal: every rejection is reported to the
//! connection that caused it and the coordinator keeps serving.

use thiserror::Error;

/// Why the rules engine refused a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMoveReason {
    #[error("no piece on {0}")]
    EmptySource(String),

    #[error("piece on {0} belongs to the other side")]
    WrongColor(String),

    #[error("{0} is not a legal move")]
    NotLegal(String),
}

/// Errors returned by a [`RulesEngine`](crate::RulesEngine).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error(transparent)]
    Rejected(#[from] IllegalMoveReason),

    #[error("invalid FEN {0:?}")]
    InvalidFen(String),

    /// Unexpected internal failure.
    #[error("engine fault: {0}")]
    Fault(String),
}

/// Why a move request was turned down by the coordinator.
///
/// The `Display` text is exactly what the requester receives in
/// its `invalidMove` message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveRejection {
    /// Requester holds no seat.
    #[error("Spectators cannot move")]
    NotASeatedPlayer,

    /// Requester holds the seat that is not on move.
    #[error("Not your turn")]
    WrongTurn,

    /// Rules engine refused the move.
    #[error("Invalid move")]
    IllegalMove(#[source] IllegalMoveReason),

    /// Rules engine failed internally; converted, never propagated.
    #[error("{0}")]
    EngineFault(String),
}

impl From<RulesError> for MoveRejection {
    fn from(err: RulesError) -> Self {
        match err {
            RulesError::Rejected(reason) => MoveRejection::IllegalMove(reason),
            RulesError::Fault(msg) => MoveRejection::EngineFault(msg),
            other @ RulesError::InvalidFen(_) => MoveRejection::EngineFault(other.to_string()),
        }
    }
}
