//! Message types used by the session core.
//!
//! These are **transport-agnostic** logical messages:
//! - [`SessionEvent`]: what the coordinator consumes.
//! - [`OutputMessage`]: what peers receive.
//! - [`Delivery`]: an output message plus who should get it.
//!
//! JSON / text encoders live in the `chess-protocol` crate;
//! this module is purely logical.

use std::fmt;

use crate::moves::MoveRequest;
use crate::seat::Role;

/// Identifier for a connected peer.
///
/// Opaque; unique over the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request coming from a peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMessage {
    Move(MoveRequest),
}

/// One inbound event, processed to completion before the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Connect(ConnectionId),
    Disconnect(ConnectionId),
    Input(ConnectionId, InputMessage),
}

/// A message sent to peers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMessage {
    /// Role of the receiving connection.
    PlayerRole(Role),

    /// Full position snapshot as FEN.
    BoardState(String),

    /// Why the receiver's move was refused.
    InvalidMove(String),

    /// Game finished; text names the winner or says it is drawn.
    GameOver(String),
}

/// Routing for an [`OutputMessage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Only to one connection.
    Unicast(ConnectionId, OutputMessage),

    /// To every connected peer.
    Broadcast(OutputMessage),
}

impl Delivery {
    pub fn message(&self) -> &OutputMessage {
        match self {
            Delivery::Unicast(_, msg) | Delivery::Broadcast(msg) => msg,
        }
    }

    /// Whether `id` receives this delivery.
    pub fn reaches(&self, id: ConnectionId) -> bool {
        match self {
            Delivery::Unicast(target, _) => *target == id,
            Delivery::Broadcast(_) => true,
        }
    }
}
