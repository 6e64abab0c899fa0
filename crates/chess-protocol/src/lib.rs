//! chess-protocol
//!
//! Wire-level encoding/decoding for the chess session server.
//!
//! This crate is responsible for turning logical session messages
//! (`chess_core::InputMessage` / `OutputMessage`) into lines of text
//! and back again.
//!
//! - [`json_codec`] : JSON objects, one per line (default)
//! - [`text_codec`] : space-separated words (for netcat / tools)

pub mod error;
pub mod wire_types;
pub mod json_codec;
pub mod text_codec;

use chess_core::{InputMessage, OutputMessage};

pub use error::ProtocolError;
pub use wire_types::{WireFormat, MAX_LINE_LEN};

/// Decode one inbound line in the given format.
///
/// Blank lines yield `Ok(None)`.
pub fn decode_input(format: WireFormat, line: &str) -> Result<Option<InputMessage>, ProtocolError> {
    wire_types::validate_line_len(line)?;
    match format {
        WireFormat::Json if line.trim().is_empty() => Ok(None),
        WireFormat::Json => json_codec::decode_input(line.trim()).map(Some),
        WireFormat::Text => text_codec::parse_input_line(line),
    }
}

/// Encode one outbound message in the given format, without newline.
pub fn encode_output(format: WireFormat, msg: &OutputMessage) -> Result<String, ProtocolError> {
    match format {
        WireFormat::Json => json_codec::encode_output(msg),
        WireFormat::Text => Ok(text_codec::format_output(msg)),
    }
}

/// Encode one inbound message in the given format, without newline.
pub fn encode_input(format: WireFormat, msg: &InputMessage) -> Result<String, ProtocolError> {
    match format {
        WireFormat::Json => json_codec::encode_input(msg),
        WireFormat::Text => Ok(text_codec::format_input(msg)),
    }
}

/// Decode one outbound line in the given format.
pub fn decode_output(format: WireFormat, line: &str) -> Result<OutputMessage, ProtocolError> {
    match format {
        WireFormat::Json => json_codec::decode_output(line.trim()),
        WireFormat::Text => text_codec::parse_output_line(line),
    }
}
