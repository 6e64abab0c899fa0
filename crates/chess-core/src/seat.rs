//! Seats (White / Black) and the roles a connection can hold.

use std::fmt;

/// One of the two playing seats.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Seat {
    White,
    Black,
}

impl Seat {
    /// Both seats, in assignment order.
    pub const ALL: [Seat; 2] = [Seat::White, Seat::Black];

    /// The other seat.
    pub fn opponent(self) -> Self {
        match self {
            Seat::White => Seat::Black,
            Seat::Black => Seat::White,
        }
    }

    /// Colour name as used in human-readable messages.
    pub fn name(self) -> &'static str {
        match self {
            Seat::White => "White",
            Seat::Black => "Black",
        }
    }

    /// FEN side-to-move character (`'w'` / `'b'`).
    pub fn fen_char(self) -> char {
        match self {
            Seat::White => 'w',
            Seat::Black => 'b',
        }
    }
}

impl From<chess::Color> for Seat {
    fn from(color: chess::Color) -> Self {
        match color {
            chess::Color::White => Seat::White,
            chess::Color::Black => Seat::Black,
        }
    }
}

impl From<Seat> for chess::Color {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::White => chess::Color::White,
            Seat::Black => chess::Color::Black,
        }
    }
}

/// Role of a connection: a seated player or a spectator.
///
/// Never stored per connection; always recomputed from the
/// [`SeatRegistry`](crate::SeatRegistry).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Player(Seat),
    Spectator,
}

impl Role {
    /// Wire representation: `"W"`, `"B"` or `"Spectator"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Player(Seat::White) => "W",
            Role::Player(Seat::Black) => "B",
            Role::Spectator => "Spectator",
        }
    }

    /// Parse the wire representation (case-sensitive).
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "W" => Some(Role::Player(Seat::White)),
            "B" => Some(Role::Player(Seat::Black)),
            "Spectator" => Some(Role::Spectator),
            _ => None,
        }
    }

    pub fn seat(self) -> Option<Seat> {
        match self {
            Role::Player(seat) => Some(seat),
            Role::Spectator => None,
        }
    }
}

impl From<Seat> for Role {
    fn from(seat: Seat) -> Self {
        Role::Player(seat)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

