//! TCP listener and top-level server wiring.
//!
//! This module:
//! - Listens on the configured address/port.
//! - Accepts new TCP connections, up to `max_clients`.
//! - Assigns each connection a `ConnectionId`.
//! - Spawns:
//!   - a per-connection task to handle I/O,
//!   - a single central session task that owns the `SessionCoordinator`.
//!
//! The actual per-connection logic and session loop live in `client`
//! and `session_task` modules respectively.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chess_core::SessionCoordinator;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::client;
use crate::config::Config;
use crate::session_task;
use crate::types::{ConnectionId, OutboundRx, OutboundTx, SessionRequest, SessionRx, SessionTx};

/// Pause after a failed `accept` before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Hands out process-unique `ConnectionId`s.
#[derive(Debug)]
struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    fn new() -> Self {
        IdAllocator {
            next: AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> ConnectionId {
        ConnectionId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, format = %config.wire_format, "listening");

    tokio::select! {
        res = serve(listener, config) => res,
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down");
            Ok(())
        }
    }
}

/// Accept connections on `listener` forever.
pub async fn serve(listener: TcpListener, config: Config) -> anyhow::Result<()> {
    let ids = IdAllocator::new();
    let active = Arc::new(AtomicUsize::new(0));

    // Channel from connections → session task.
    let (session_tx, session_rx): (SessionTx, SessionRx) = mpsc::unbounded_channel();

    // Spawn the central session task.
    tokio::spawn(session_task::run_session_loop(SessionCoordinator::new(), session_rx));

    loop {
        let (stream, peer_addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                // EMFILE / ECONNABORTED and friends: keep serving.
                warn!(error = %e, "accept failed");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };

        if active.load(Ordering::SeqCst) >= config.max_clients {
            warn!(
                %peer_addr,
                max_clients = config.max_clients,
                "rejecting connection: max_clients reached"
            );
            // Just drop the stream; the peer sees the connection closed.
            continue;
        }

        let connection_id = ids.next_id();
        info!(connection = %connection_id, %peer_addr, "accepted connection");

        if let Err(e) = stream.set_nodelay(true) {
            warn!(connection = %connection_id, error = %e, "set_nodelay failed");
        }

        // Outbound channel for this connection, registered with the
        // session task before any of its input can be queued.
        let (out_tx, out_rx): (OutboundTx, OutboundRx) = mpsc::unbounded_channel();
        session_tx
            .send(SessionRequest::Connect {
                connection_id,
                outbound: out_tx,
            })
            .context("session task stopped")?;

        active.fetch_add(1, Ordering::SeqCst);
        let active = active.clone();
        let session_tx = session_tx.clone();
        let format = config.wire_format;

        tokio::spawn(async move {
            if let Err(e) = client::run_client(connection_id, stream, format, session_tx, out_rx).await {
                warn!(connection = %connection_id, error = %e, "connection error");
            }
            active.fetch_sub(1, Ordering::SeqCst);
            info!(connection = %connection_id, "disconnected");
        });
    }
}
