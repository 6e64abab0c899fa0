// crates/chess-server/src/client.rs

//! Per-connection I/O.
//!
//! Each connection gets a writer task that encodes `OutputMessage`s
//! from its outbound channel, and a reader loop that splits the byte
//! stream into lines, decodes them and queues them for the session
//! task. When the reader stops, a `Disconnect` is queued.
//!
//! A line longer than `MAX_LINE_LEN` is answered with `invalidMove` and
//! the connection is closed.

use chess_core::OutputMessage;
use chess_protocol::{ProtocolError, WireFormat, MAX_LINE_LEN};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::types::{ConnectionId, OutboundRx, SessionRequest, SessionTx};

/// Run the I/O loops for a single connection.
///
/// Returns once the peer has gone and its `Disconnect` is queued.
pub async fn run_client(
    connection_id: ConnectionId,
    stream: TcpStream,
    format: WireFormat,
    session_tx: SessionTx,
    out_rx: OutboundRx,
) -> anyhow::Result<()> {
    let (read_stream, write_stream) = stream.into_split();

    // Writer task: ends when the session task drops our sender.
    tokio::spawn(async move {
        if let Err(e) = run_writer(connection_id, write_stream, format, out_rx).await {
            debug!(connection = %connection_id, error = %e, "write side closed");
        }
    });

    let result = run_reader(connection_id, read_stream, format, &session_tx).await;

    let _ = session_tx.send(SessionRequest::Disconnect { connection_id });

    result
}

async fn run_reader(
    connection_id: ConnectionId,
    mut read_stream: OwnedReadHalf,
    format: WireFormat,
    session_tx: &SessionTx,
) -> anyhow::Result<()> {
    let mut buffer = Vec::new();
    let mut temp_buf = [0u8; 1024];

    loop {
        let n = read_stream.read(&mut temp_buf).await?;
        if n == 0 {
            info!(connection = %connection_id, "peer closed connection");
            return Ok(());
        }
        buffer.extend_from_slice(&temp_buf[..n]);

        // Process complete lines
        while let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
            let line = buffer.drain(..=newline_pos).collect::<Vec<u8>>();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');

            if line.len() > MAX_LINE_LEN {
                reject_overlong(connection_id, line.len(), session_tx);
                return Ok(());
            }

            debug!(connection = %connection_id, %line, "received");

            let request = match chess_protocol::decode_input(format, line) {
                Ok(Some(msg)) => SessionRequest::Input { connection_id, msg },
                Ok(None) => continue,
                Err(e) => SessionRequest::Reject {
                    connection_id,
                    reason: e.to_string(),
                },
            };

            if session_tx.send(request).is_err() {
                anyhow::bail!("session channel closed");
            }
        }

        if buffer.len() > MAX_LINE_LEN {
            reject_overlong(connection_id, buffer.len(), session_tx);
            return Ok(());
        }
    }
}

/// Tell the peer why, then let the caller close the connection. Applies
/// whether or not the newline has arrived yet.
fn reject_overlong(connection_id: ConnectionId, len: usize, session_tx: &SessionTx) {
    let reason = ProtocolError::LineTooLong(len).to_string();
    warn!(connection = %connection_id, %reason, "dropping connection");
    let _ = session_tx.send(SessionRequest::Reject { connection_id, reason });
}

async fn run_writer(
    connection_id: ConnectionId,
    mut write_stream: OwnedWriteHalf,
    format: WireFormat,
    mut out_rx: OutboundRx,
) -> anyhow::Result<()> {
    while let Some(msg) = out_rx.recv().await {
        write_message(&mut write_stream, format, &msg).await?;
        debug!(connection = %connection_id, ?msg, "sent");
    }
    Ok(())
}

async fn write_message(
    stream: &mut OwnedWriteHalf,
    format: WireFormat,
    msg: &OutputMessage,
) -> anyhow::Result<()> {
    let line = chess_protocol::encode_output(format, msg)?;
    let data = format!("{}\n", line);

    stream.write_all(data.as_bytes()).await?;
    stream.flush().await?;

    Ok(())
}
