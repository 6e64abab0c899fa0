//! Session coordinator: one chess game shared by every connection.
//!
//! Owns the [`SeatRegistry`], the rules engine and the list of
//! connected peers (in connection order), and turns each
//! [`SessionEvent`] into the [`Delivery`]s it causes.
//!
//! Routing policy:
//! - `PlayerRole` and snapshot `BoardState` on connect / promotion:
//!   sent **only** to the affected connection.
//! - `InvalidMove`: sent **only** to the requester.
//! - `BoardState` after a move or reset, `GameOver`: broadcast to
//!   **all** connections.
//!
//! Seat policy:
//! - New connections take White, then Black, then watch.
//! - When a player leaves, the longest-connected spectator takes the
//!   vacated seat.
//! - When both seats end up vacant the game is reset.
//!
//! A panic inside the rules engine is caught and answered with
//! `invalidMove` to the mover; the engine is left as it was before the
//! move. The process-wide panic hook still runs first, so the panic
//! message also reaches stderr.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, info, warn};

use crate::error::MoveRejection;
use crate::messages::{ConnectionId, Delivery, InputMessage, OutputMessage, SessionEvent};
use crate::moves::MoveRequest;
use crate::rules::{GameStatus, RulesEngine, StandardRules};
use crate::seat::{Role, Seat};
use crate::seat_registry::SeatRegistry;

/// Seat registry + rules engine + connected peers for one game.
#[derive(Debug)]
pub struct SessionCoordinator<R = StandardRules> {
    seats: SeatRegistry,
    rules: R,

    /// Connected peers, oldest first.
    connections: Vec<ConnectionId>,
}

impl Default for SessionCoordinator<StandardRules> {
    fn default() -> Self {
        SessionCoordinator::with_rules(StandardRules::new())
    }
}

impl SessionCoordinator<StandardRules> {
    /// A fresh session at the starting position with no one connected.
    pub fn new() -> Self {
        SessionCoordinator::default()
    }
}

impl<R: RulesEngine> SessionCoordinator<R> {
    /// A session driven by the given rules engine.
    pub fn with_rules(rules: R) -> Self {
        SessionCoordinator {
            seats: SeatRegistry::new(),
            rules,
            connections: Vec::new(),
        }
    }

    /// Process a single event and return the deliveries it causes.
    pub fn process_event(&mut self, event: SessionEvent) -> Vec<Delivery> {
        match event {
            SessionEvent::Connect(id) => self.on_connect(id),
            SessionEvent::Disconnect(id) => self.on_disconnect(id),
            SessionEvent::Input(id, InputMessage::Move(mv)) => self.on_move(id, mv),
        }
    }

    /// Register a new peer, give it a role and a board snapshot.
    pub fn on_connect(&mut self, id: ConnectionId) -> Vec<Delivery> {
        if !self.connections.contains(&id) {
            self.connections.push(id);
        }

        let role = self.seats.assign_role(id);
        info!(
            connection = %id,
            role = %role,
            white = ?self.seats.occupant_of(Seat::White),
            black = ?self.seats.occupant_of(Seat::Black),
            "connected"
        );

        self.snapshot_for(id, role)
    }

    /// Forget a peer; hand its seat to the longest-waiting spectator.
    ///
    /// Unknown or already-disconnected ids are ignored.
    pub fn on_disconnect(&mut self, id: ConnectionId) -> Vec<Delivery> {
        let Some(pos) = self.connections.iter().position(|&c| c == id) else {
            debug!(connection = %id, "disconnect for unknown connection ignored");
            return Vec::new();
        };
        self.connections.remove(pos);

        let Some(seat) = self.seats.vacate(id) else {
            info!(connection = %id, "spectator disconnected");
            return Vec::new();
        };
        info!(connection = %id, seat = seat.name(), "player disconnected");

        let mut outputs = Vec::new();

        if let Some(next) = self.next_waiting() {
            if self.seats.occupy(seat, next) {
                info!(connection = %next, seat = seat.name(), "spectator promoted");
                outputs.extend(self.snapshot_for(next, Role::Player(seat)));
            }
        }

        if self.seats.both_vacant() {
            info!("both seats vacant, resetting game");
            self.rules.reset();
        }

        outputs
    }

    /// Authorize and play a move.
    pub fn on_move(&mut self, id: ConnectionId, mv: MoveRequest) -> Vec<Delivery> {
        let status = match self.try_move(id, &mv) {
            Ok(status) => status,
            Err(rejection) => {
                warn!(connection = %id, %mv, reason = %rejection, "move rejected");
                return vec![Delivery::Unicast(
                    id,
                    OutputMessage::InvalidMove(rejection.to_string()),
                )];
            }
        };

        let mut outputs = vec![Delivery::Broadcast(OutputMessage::BoardState(self.rules.fen()))];

        if let Some(message) = status.game_over_message() {
            info!(?status, "game over");
            outputs.push(Delivery::Broadcast(OutputMessage::GameOver(message)));
            self.rules.reset();
            outputs.push(Delivery::Broadcast(OutputMessage::BoardState(self.rules.fen())));
        }

        outputs
    }

    /// Seat check, turn check, then the rules engine. On success the
    /// move has been applied and the resulting status is returned.
    pub fn try_move(&mut self, id: ConnectionId, mv: &MoveRequest) -> Result<GameStatus, MoveRejection> {
        let seat = self
            .seats
            .seat_of(id)
            .ok_or(MoveRejection::NotASeatedPlayer)?;

        if seat != self.rules.turn() {
            return Err(MoveRejection::WrongTurn);
        }

        let mut next = self.rules.clone();
        guarded(|| next.apply(mv))
            .map_err(|msg| {
                error!(connection = %id, %mv, %msg, "rules engine panicked, move discarded");
                MoveRejection::EngineFault(msg)
            })??;
        self.rules = next;
        debug!(connection = %id, seat = seat.name(), %mv, "move accepted");

        let rules = &self.rules;
        let status = guarded(|| rules.status()).unwrap_or_else(|msg| {
            error!(%msg, "status check failed after move, treating game as ongoing");
            GameStatus::Ongoing
        });

        Ok(status)
    }

    /// Role of a connected peer; `None` if `id` is not connected.
    pub fn role_of(&self, id: ConnectionId) -> Option<Role> {
        self.connections
            .contains(&id)
            .then(|| self.seats.role_of(id))
    }

    pub fn seats(&self) -> &SeatRegistry {
        &self.seats
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Connected peers, oldest first.
    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    pub fn fen(&self) -> String {
        self.rules.fen()
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// Oldest connected peer without a seat.
    fn next_waiting(&self) -> Option<ConnectionId> {
        self.connections
            .iter()
            .copied()
            .find(|&c| !self.seats.is_seated(c))
    }

    fn snapshot_for(&self, id: ConnectionId, role: Role) -> Vec<Delivery> {
        vec![
            Delivery::Unicast(id, OutputMessage::PlayerRole(role)),
            Delivery::Unicast(id, OutputMessage::BoardState(self.rules.fen())),
        ]
    }
}

/// Run a rules-engine call, turning a panic into an error message.
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("Internal error: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("Internal error: {s}")
    } else {
        "Internal error".to_string()
    }
}
