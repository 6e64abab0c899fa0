//! JSON line codec.
//!
//! One JSON object per line, event name plus payload:
//!
//! ```text
//! Input (client → server)
//! -----------------------
//! {"event":"move","data":{"from":"e2","to":"e4"}}
//! {"event":"move","data":{"from":"e7","to":"e8","promotion":"q"}}
//!
//! Output (server → client)
//! ------------------------
//! {"event":"playerRole","data":"W"}           "W" | "B" | "Spectator"
//! {"event":"boardState","data":"<fen>"}
//! {"event":"invalidMove","data":"Not your turn"}
//! {"event":"gameOver","data":"Checkmate! White wins!"}
//! ```
//!
//! Lines never contain a trailing newline here; framing is the
//! server's job.

use chess_core::{InputMessage, MoveRequest, OutputMessage, Role};
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::wire_types::{
    EVENT_BOARD_STATE, EVENT_GAME_OVER, EVENT_INVALID_MOVE, EVENT_MOVE, EVENT_PLAYER_ROLE,
};

/// `{"event": ..., "data": ...}`; `data` is decoded once the event is known.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<E, T> {
    event: E,
    #[serde(default)]
    data: T,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMove {
    from: String,
    to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    promotion: Option<String>,
}

/// Decode one inbound line.
pub fn decode_input(line: &str) -> Result<InputMessage, ProtocolError> {
    let envelope = serde_json::from_str::<Envelope<String, serde_json::Value>>(line)?;
    match envelope.event.as_str() {
        EVENT_MOVE => {
            let m = serde_json::from_value::<WireMove>(envelope.data)?;
            let request = MoveRequest::parse(&m.from, &m.to, m.promotion.as_deref())?;
            Ok(InputMessage::Move(request))
        }
        other => Err(ProtocolError::UnknownCommand(other.to_string())),
    }
}

/// Encode an inbound message (used by clients and tests).
pub fn encode_input(msg: &InputMessage) -> Result<String, ProtocolError> {
    let envelope = match msg {
        InputMessage::Move(m) => Envelope {
            event: EVENT_MOVE,
            data: WireMove {
                from: m.from.to_string(),
                to: m.to.to_string(),
                promotion: m.promotion.map(|p| p.as_char().to_string()),
            },
        },
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Encode one outbound message.
pub fn encode_output(msg: &OutputMessage) -> Result<String, ProtocolError> {
    let envelope = match msg {
        OutputMessage::PlayerRole(role) => Envelope {
            event: EVENT_PLAYER_ROLE,
            data: role.as_str(),
        },
        OutputMessage::BoardState(fen) => Envelope {
            event: EVENT_BOARD_STATE,
            data: fen.as_str(),
        },
        OutputMessage::InvalidMove(reason) => Envelope {
            event: EVENT_INVALID_MOVE,
            data: reason.as_str(),
        },
        OutputMessage::GameOver(message) => Envelope {
            event: EVENT_GAME_OVER,
            data: message.as_str(),
        },
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode an outbound line (used by clients and tests).
pub fn decode_output(line: &str) -> Result<OutputMessage, ProtocolError> {
    let Envelope { event, data } = serde_json::from_str::<Envelope<String, String>>(line)?;
    let msg = match event.as_str() {
        EVENT_PLAYER_ROLE => {
            OutputMessage::PlayerRole(Role::from_wire(&data).ok_or(ProtocolError::InvalidField("role"))?)
        }
        EVENT_BOARD_STATE if data.is_empty() => return Err(ProtocolError::InvalidField("fen")),
        EVENT_BOARD_STATE => OutputMessage::BoardState(data),
        EVENT_INVALID_MOVE => OutputMessage::InvalidMove(data),
        EVENT_GAME_OVER => OutputMessage::GameOver(data),
        other => return Err(ProtocolError::UnknownCommand(other.to_string())),
    };
    Ok(msg)
}
