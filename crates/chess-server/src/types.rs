//! Shared types for the chess TCP server.
//!
//! This module defines:
//! - channel aliases between connections and the session task
//! - `SessionRequest`: messages flowing from connections to the session task

use chess_core::{InputMessage, OutputMessage};
use tokio::sync::mpsc;

pub use chess_core::ConnectionId;

/// Outbound messages from the session task to a given connection.
pub type OutboundTx = mpsc::UnboundedSender<OutputMessage>;
pub type OutboundRx = mpsc::UnboundedReceiver<OutputMessage>;

/// Message flowing from the acceptor / a connection task into the
/// central session task.
#[derive(Debug)]
pub enum SessionRequest {
    /// A socket was accepted; `outbound` feeds its writer task.
    Connect {
        connection_id: ConnectionId,
        outbound: OutboundTx,
    },

    /// The socket closed (EOF, read error or protocol violation).
    Disconnect { connection_id: ConnectionId },

    /// A decoded message from the peer.
    Input {
        connection_id: ConnectionId,
        msg: InputMessage,
    },

    /// A line that failed to decode; answered with `invalidMove`.
    Reject {
        connection_id: ConnectionId,
        reason: String,
    },
}

/// Channel from connections → session task.
pub type SessionTx = mpsc::UnboundedSender<SessionRequest>;
pub type SessionRx = mpsc::UnboundedReceiver<SessionRequest>;
