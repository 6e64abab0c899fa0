//! Errors that can arise when encoding / decoding a line.

use chess_core::MoveParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Not valid JSON, or not one of the known events.
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),

    /// Text command or JSON event name that is not known.
    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    /// Squares or promotion piece did not parse.
    #[error(transparent)]
    InvalidMove(#[from] MoveParseError),

    /// Semantic issue in an otherwise well-formed message.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    #[error("line too long ({0} bytes)")]
    LineTooLong(usize),

    #[error("unknown wire format {0:?}")]
    UnknownFormat(String),
}
