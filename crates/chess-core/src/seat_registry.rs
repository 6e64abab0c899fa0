//! Seat registry: who sits at White and who sits at Black.
//!
//! - Assignment order is White, then Black, then spectator.
//! - A connection occupies at most one seat.
//! - Vacating is idempotent.

use crate::messages::ConnectionId;
use crate::seat::{Role, Seat};

/// Authoritative `{White: occupant?, Black: occupant?}` map.
#[derive(Debug, Default, Clone)]
pub struct SeatRegistry {
    white: Option<ConnectionId>,
    black: Option<ConnectionId>,
}

impl SeatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        SeatRegistry::default()
    }

    /// Seat `id` in the first vacant seat, or report it as a spectator.
    ///
    /// A connection that already holds a seat keeps it.
    pub fn assign_role(&mut self, id: ConnectionId) -> Role {
        if let Some(seat) = self.seat_of(id) {
            return Role::Player(seat);
        }

        match self.first_vacant() {
            Some(seat) => {
                *self.slot_mut(seat) = Some(id);
                Role::Player(seat)
            }
            None => Role::Spectator,
        }
    }

    /// Put `id` into a specific seat if that seat is vacant and `id`
    /// holds no other seat. Returns whether the seat was taken.
    pub fn occupy(&mut self, seat: Seat, id: ConnectionId) -> bool {
        if self.occupant_of(seat).is_some() || self.seat_of(id).is_some() {
            return false;
        }
        *self.slot_mut(seat) = Some(id);
        true
    }

    /// Clear the seat held by `id`, returning it. Spectators (and ids
    /// already vacated) yield `None`.
    pub fn vacate(&mut self, id: ConnectionId) -> Option<Seat> {
        let seat = self.seat_of(id)?;
        *self.slot_mut(seat) = None;
        Some(seat)
    }

    pub fn occupant_of(&self, seat: Seat) -> Option<ConnectionId> {
        match seat {
            Seat::White => self.white,
            Seat::Black => self.black,
        }
    }

    /// Seat held by `id`, if any.
    pub fn seat_of(&self, id: ConnectionId) -> Option<Seat> {
        if self.white == Some(id) {
            Some(Seat::White)
        } else if self.black == Some(id) {
            Some(Seat::Black)
        } else {
            None
        }
    }

    /// Role of `id`: its seat, or spectator.
    pub fn role_of(&self, id: ConnectionId) -> Role {
        self.seat_of(id).map_or(Role::Spectator, Role::Player)
    }

    pub fn is_seated(&self, id: ConnectionId) -> bool {
        self.seat_of(id).is_some()
    }

    pub fn is_full(&self) -> bool {
        self.white.is_some() && self.black.is_some()
    }

    pub fn both_vacant(&self) -> bool {
        self.white.is_none() && self.black.is_none()
    }

    /// First vacant seat in assignment order.
    pub fn first_vacant(&self) -> Option<Seat> {
        Seat::ALL
            .into_iter()
            .find(|&seat| self.occupant_of(seat).is_none())
    }

    /// Empty both seats.
    pub fn clear(&mut self) {
        self.white = None;
        self.black = None;
    }

    fn slot_mut(&mut self, seat: Seat) -> &mut Option<ConnectionId> {
        match seat {
            Seat::White => &mut self.white,
            Seat::Black => &mut self.black,
        }
    }
}
