//! Low-level wire constants and the wire format selector.
//!
//! This module defines:
//! - event names shared by both encodings,
//! - line length limits,
//! - [`WireFormat`], chosen per server by configuration.
//!
//! The actual encode/decode logic lives in `json_codec` and `text_codec`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Server → client: role of the receiving connection.
pub const EVENT_PLAYER_ROLE: &str = "playerRole";

/// Server → client: FEN snapshot.
pub const EVENT_BOARD_STATE: &str = "boardState";

/// Server → client: the receiver's move was refused.
pub const EVENT_INVALID_MOVE: &str = "invalidMove";

/// Server → client: the game finished.
pub const EVENT_GAME_OVER: &str = "gameOver";

/// Client → server: move request.
pub const EVENT_MOVE: &str = "move";

/// Maximum accepted length of one inbound line, newline excluded.
///
/// Longer lines are rejected at the protocol layer without being
/// decoded.
pub const MAX_LINE_LEN: usize = 4096;

/// Check an inbound line against [`MAX_LINE_LEN`].
pub fn validate_line_len(line: &str) -> Result<(), ProtocolError> {
    if line.len() > MAX_LINE_LEN {
        Err(ProtocolError::LineTooLong(line.len()))
    } else {
        Ok(())
    }
}

/// Line encoding spoken on a connection.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// `{"event": ..., "data": ...}` per line.
    #[default]
    Json,

    /// Space-separated words per line; usable from netcat.
    Text,
}

impl FromStr for WireFormat {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(WireFormat::Json),
            "text" => Ok(WireFormat::Text),
            other => Err(ProtocolError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::Json => f.write_str("json"),
            WireFormat::Text => f.write_str("text"),
        }
    }
}
