// crates/chess-protocol/src/text_codec.rs

//! Plain-text line codec, for netcat and quick manual testing.
//!
//! Input format (lines → `InputMessage`):
//!
//! - Move with separate squares:
//!   `move <from> <to> [q|r|b|n]`, e.g. `move e2 e4` or `move e7 e8 q`
//!
//! - Bare coordinate move:
//!   `e2e4`, `e7e8q`
//!
//! Blank lines and lines starting with `#` carry no message.
//!
//! Output format (`OutputMessage` → line):
//!
//! - PlayerRole:  `role W` / `role B` / `role Spectator`
//! - BoardState:  `board <fen>`
//! - InvalidMove: `invalid <reason>`
//! - GameOver:    `gameover <message>`

use chess_core::{InputMessage, MoveRequest, OutputMessage, Role};

use crate::error::ProtocolError;

/// Parse a single input line.
///
/// Returns `Ok(None)` for blank lines or comments.
pub fn parse_input_line(line: &str) -> Result<Option<InputMessage>, ProtocolError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    let request = match tokens.as_slice() {
        [cmd, from, to] if cmd.eq_ignore_ascii_case("move") => MoveRequest::parse(from, to, None)?,
        [cmd, from, to, promotion] if cmd.eq_ignore_ascii_case("move") => {
            MoveRequest::parse(from, to, Some(*promotion))?
        }
        [cmd, ..] if cmd.eq_ignore_ascii_case("move") => {
            return Err(ProtocolError::InvalidField("move arguments"))
        }
        [coordinate] if looks_like_coordinate(coordinate) => MoveRequest::from_coordinate(coordinate)?,
        [other, ..] => return Err(ProtocolError::UnknownCommand(other.to_string())),
        [] => return Ok(None),
    };

    Ok(Some(InputMessage::Move(request)))
}

/// Format an input message as a line (used by clients).
pub fn format_input(msg: &InputMessage) -> String {
    match msg {
        InputMessage::Move(m) => match m.promotion {
            Some(p) => format!("move {} {} {}", m.from, m.to, p.as_char()),
            None => format!("move {} {}", m.from, m.to),
        },
    }
}

/// Format an `OutputMessage` as a line.
pub fn format_output(msg: &OutputMessage) -> String {
    match msg {
        OutputMessage::PlayerRole(role) => format!("role {}", role.as_str()),
        OutputMessage::BoardState(fen) => format!("board {}", fen),
        OutputMessage::InvalidMove(reason) => format!("invalid {}", reason),
        OutputMessage::GameOver(message) => format!("gameover {}", message),
    }
}

/// Parse an output line back into an `OutputMessage` (used by clients).
pub fn parse_output_line(line: &str) -> Result<OutputMessage, ProtocolError> {
    let trimmed = line.trim();
    let (kind, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
    let rest = rest.trim();

    match kind {
        "role" => Role::from_wire(rest)
            .map(OutputMessage::PlayerRole)
            .ok_or(ProtocolError::InvalidField("role")),
        "board" if !rest.is_empty() => Ok(OutputMessage::BoardState(rest.to_string())),
        "board" => Err(ProtocolError::InvalidField("fen")),
        "invalid" => Ok(OutputMessage::InvalidMove(rest.to_string())),
        "gameover" => Ok(OutputMessage::GameOver(rest.to_string())),
        other => Err(ProtocolError::UnknownCommand(other.to_string())),
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn looks_like_coordinate(token: &str) -> bool {
    (token.len() == 4 || token.len() == 5)
        && token.as_bytes().first().is_some_and(|b| b.is_ascii_alphabetic())
        && token.as_bytes().get(1).is_some_and(|b| b.is_ascii_digit())
}
