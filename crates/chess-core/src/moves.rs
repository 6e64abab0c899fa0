//! Validated move requests.
//!
//! A [`MoveRequest`] can only be built from well-formed squares
//! (file `a`..=`h`, rank `1`..=`8`) and an optional promotion piece,
//! so malformed input is rejected at the protocol boundary and never
//! reaches the rules engine.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while parsing squares, promotion pieces or moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("invalid square {0:?}")]
    InvalidSquare(String),

    #[error("invalid promotion piece {0:?}")]
    InvalidPromotion(String),

    #[error("invalid move {0:?}")]
    InvalidMove(String),
}

/// A board square. `file` and `rank` are zero-based (`a1` = 0, 0).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Build a square from zero-based file and rank indices.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub(crate) fn to_chess(self) -> chess::Square {
        chess::Square::make_square(
            chess::Rank::from_index(self.rank as usize),
            chess::File::from_index(self.file as usize),
        )
    }
}

impl FromStr for Square {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(MoveParseError::InvalidSquare(s.to_string()));
        }

        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(MoveParseError::InvalidSquare(s.to_string()));
        }

        Ok(Square {
            file: file - b'a',
            rank: rank - b'1',
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

/// Piece kinds a pawn may promote to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PromotionPiece {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionPiece {
    /// Lowercase letter used on the wire (`q`, `r`, `b`, `n`).
    pub fn as_char(self) -> char {
        match self {
            PromotionPiece::Queen => 'q',
            PromotionPiece::Rook => 'r',
            PromotionPiece::Bishop => 'b',
            PromotionPiece::Knight => 'n',
        }
    }

    /// Parse from a letter, either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(PromotionPiece::Queen),
            'r' => Some(PromotionPiece::Rook),
            'b' => Some(PromotionPiece::Bishop),
            'n' => Some(PromotionPiece::Knight),
            _ => None,
        }
    }

    pub(crate) fn to_chess(self) -> chess::Piece {
        match self {
            PromotionPiece::Queen => chess::Piece::Queen,
            PromotionPiece::Rook => chess::Piece::Rook,
            PromotionPiece::Bishop => chess::Piece::Bishop,
            PromotionPiece::Knight => chess::Piece::Knight,
        }
    }
}

impl FromStr for PromotionPiece {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                PromotionPiece::from_char(c).ok_or_else(|| MoveParseError::InvalidPromotion(s.to_string()))
            }
            _ => Err(MoveParseError::InvalidPromotion(s.to_string())),
        }
    }
}

/// A request to move a piece from one square to another.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PromotionPiece>,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square, promotion: Option<PromotionPiece>) -> Self {
        MoveRequest { from, to, promotion }
    }

    /// Build a request from its string parts, e.g. `("e7", "e8", Some("q"))`.
    pub fn parse(from: &str, to: &str, promotion: Option<&str>) -> Result<Self, MoveParseError> {
        let promotion = match promotion {
            Some(p) if !p.is_empty() => Some(p.parse()?),
            _ => None,
        };
        Ok(MoveRequest {
            from: from.parse()?,
            to: to.parse()?,
            promotion,
        })
    }

    /// Parse coordinate notation: `e2e4`, `e7e8q`.
    pub fn from_coordinate(s: &str) -> Result<Self, MoveParseError> {
        if !s.is_ascii() || !(s.len() == 4 || s.len() == 5) {
            return Err(MoveParseError::InvalidMove(s.to_string()));
        }
        let promotion = if s.len() == 5 { Some(&s[4..5]) } else { None };
        MoveRequest::parse(&s[0..2], &s[2..4], promotion)
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion {
            write!(f, "{}", p.as_char())?;
        }
        Ok(())
    }
}
