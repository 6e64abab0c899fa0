//! chess-core
//!
//! Pure session logic for a two-player chess game with spectators:
//! - seats and roles
//! - validated move requests
//! - rules engine seam + standard chess rules
//! - seat registry
//! - session coordinator (connect / disconnect / move protocol)

pub mod seat;
pub mod moves;
pub mod messages;
pub mod rules;
pub mod seat_registry;
pub mod session;
pub mod error;

pub use seat::{Role, Seat};
pub use moves::{MoveParseError, MoveRequest, PromotionPiece, Square};

pub use messages::{
    ConnectionId,
    Delivery,
    InputMessage,
    OutputMessage,
    SessionEvent,
};

pub use rules::{DrawReason, GameStatus, RulesEngine, StandardRules, STARTING_FEN};
pub use seat_registry::SeatRegistry;
pub use session::SessionCoordinator;
pub use error::{IllegalMoveReason, MoveRejection, RulesError};
