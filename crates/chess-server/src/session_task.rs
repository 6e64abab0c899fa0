//! Central session loop.
//!
//! This task owns the `SessionCoordinator` and the table of outbound
//! channels, and processes every `SessionRequest` to completion before
//! taking the next one. That single consumer is what keeps connects,
//! disconnects and moves from interleaving.
//!
//! Fan-out is fire-and-forget: each peer has an unbounded channel
//! drained by its own writer task, so a slow peer never holds up the
//! loop.

use std::collections::HashMap;

use chess_core::{Delivery, OutputMessage, RulesEngine, SessionCoordinator, SessionEvent};
use tracing::{debug, info, warn};

use crate::types::{ConnectionId, OutboundTx, SessionRequest, SessionRx};

/// Run the central session processing loop until every sender of
/// `session_rx` is gone.
pub async fn run_session_loop<R: RulesEngine>(mut session: SessionCoordinator<R>, mut session_rx: SessionRx) {
    let mut peers: HashMap<ConnectionId, OutboundTx> = HashMap::new();

    while let Some(req) = session_rx.recv().await {
        let deliveries = match req {
            SessionRequest::Connect {
                connection_id,
                outbound,
            } => {
                peers.insert(connection_id, outbound);
                session.process_event(SessionEvent::Connect(connection_id))
            }
            SessionRequest::Disconnect { connection_id } => {
                peers.remove(&connection_id);
                session.process_event(SessionEvent::Disconnect(connection_id))
            }
            SessionRequest::Input { connection_id, msg } => {
                session.process_event(SessionEvent::Input(connection_id, msg))
            }
            SessionRequest::Reject {
                connection_id,
                reason,
            } => {
                warn!(connection = %connection_id, %reason, "undecodable message");
                vec![Delivery::Unicast(connection_id, OutputMessage::InvalidMove(reason))]
            }
        };

        for delivery in &deliveries {
            route_delivery(delivery, &peers);
        }
    }

    info!("Session loop shutting down (session_rx closed)");
}

/// Hand a delivery to the writer task(s) it targets.
///
/// A closed channel just means the peer is on its way out; its
/// `Disconnect` is already queued.
fn route_delivery(delivery: &Delivery, peers: &HashMap<ConnectionId, OutboundTx>) {
    match delivery {
        Delivery::Unicast(connection_id, msg) => match peers.get(connection_id) {
            Some(tx) => {
                let _ = tx.send(msg.clone());
            }
            None => debug!(connection = %connection_id, "dropping message for departed connection"),
        },
        Delivery::Broadcast(msg) => {
            for tx in peers.values() {
                let _ = tx.send(msg.clone());
            }
        }
    }
}
