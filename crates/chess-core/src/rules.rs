//! Rules engine: position, legality, turn owner, terminal status.
//!
//! [`RulesEngine`] is the seam the session coordinator talks to.
//! [`StandardRules`] implements it on top of the `chess` crate, which
//! does move generation and mate / stalemate detection. On top of that
//! it tracks the move counters (so the FEN it reports is complete) and
//! the draw rules the board alone cannot see: fifty-move rule,
//! threefold repetition, insufficient material.

use std::str::FromStr;

use chess::{Board, BoardStatus, ChessMove, Piece};

use crate::error::{IllegalMoveReason, RulesError};
use crate::moves::MoveRequest;
use crate::seat::Seat;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Why a game ended in a draw.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

/// Status of the current game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// `winner` is the side that delivered mate.
    Checkmate { winner: Seat },
    Draw(DrawReason),
}

impl GameStatus {
    /// Text of the `gameOver` message, or `None` while the game is on.
    pub fn game_over_message(&self) -> Option<String> {
        match self {
            GameStatus::Ongoing => None,
            GameStatus::Checkmate { winner } => Some(format!("Checkmate! {} wins!", winner.name())),
            GameStatus::Draw(_) => Some("Game drawn!".to_string()),
        }
    }
}

/// The collaborator that knows the rules of chess.
///
/// Implementations must be all-or-nothing: a rejected `apply` leaves
/// the position untouched. The session plays each move on a clone and
/// keeps it only once `apply` has returned `Ok`.
pub trait RulesEngine: Clone {
    /// Canonical FEN of the current position.
    fn fen(&self) -> String;

    /// Side to move.
    fn turn(&self) -> Seat;

    /// Try to play `mv` for the side to move.
    fn apply(&mut self, mv: &MoveRequest) -> Result<(), RulesError>;

    fn status(&self) -> GameStatus;

    /// Back to the starting position.
    fn reset(&mut self);
}

/// Standard chess rules backed by [`chess::Board`].
#[derive(Debug, Clone)]
pub struct StandardRules {
    board: Board,

    /// Plies since the last pawn move or capture.
    halfmove_clock: u32,

    /// Starts at 1, incremented after each Black move.
    fullmove_number: u32,

    /// Position hashes since the last irreversible move, current one last.
    history: Vec<u64>,
}

impl Default for StandardRules {
    fn default() -> Self {
        StandardRules::with_board(Board::default(), 0, 1)
    }
}

impl StandardRules {
    /// Engine at the starting position.
    pub fn new() -> Self {
        StandardRules::default()
    }

    /// Engine at an arbitrary position. Missing move counters default
    /// to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let board = Board::from_str(fen).map_err(|_| RulesError::InvalidFen(fen.to_string()))?;

        let mut fields = fen.split_whitespace().skip(4);
        let halfmove_clock = fields.next().and_then(|f| f.parse().ok()).unwrap_or(0);
        let fullmove_number = fields.next().and_then(|f| f.parse().ok()).unwrap_or(1);

        Ok(StandardRules::with_board(board, halfmove_clock, fullmove_number))
    }

    fn with_board(board: Board, halfmove_clock: u32, fullmove_number: u32) -> Self {
        StandardRules {
            history: vec![board.get_hash()],
            board,
            halfmove_clock,
            fullmove_number,
        }
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// How many times the current position has occurred since the
    /// last irreversible move (including now).
    fn repetitions(&self) -> usize {
        let current = self.board.get_hash();
        self.history.iter().filter(|&&h| h == current).count()
    }

    fn to_chess_move(&self, mv: &MoveRequest) -> Result<(ChessMove, Piece), IllegalMoveReason> {
        let from = mv.from.to_chess();
        let to = mv.to.to_chess();
        let mover = self.board.side_to_move();

        let piece = self
            .board
            .piece_on(from)
            .ok_or_else(|| IllegalMoveReason::EmptySource(mv.from.to_string()))?;

        if self.board.color_on(from) != Some(mover) {
            return Err(IllegalMoveReason::WrongColor(mv.from.to_string()));
        }

        let last_rank = match Seat::from(mover) {
            Seat::White => 7,
            Seat::Black => 0,
        };

        // Promotion defaults to a queen when the client does not say.
        let promotion = match mv.promotion {
            Some(p) => Some(p.to_chess()),
            None if piece == Piece::Pawn && mv.to.rank() == last_rank => Some(Piece::Queen),
            None => None,
        };

        Ok((ChessMove::new(from, to, promotion), piece))
    }
}

impl RulesEngine for StandardRules {
    fn fen(&self) -> String {
        let board_fen = self.board.to_string();
        let fields: Vec<&str> = board_fen.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            fields.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    fn turn(&self) -> Seat {
        Seat::from(self.board.side_to_move())
    }

    fn apply(&mut self, mv: &MoveRequest) -> Result<(), RulesError> {
        let (chess_move, piece) = self.to_chess_move(mv)?;

        if !self.board.legal(chess_move) {
            return Err(IllegalMoveReason::NotLegal(mv.to_string()).into());
        }

        let capture = self.board.piece_on(chess_move.get_dest()).is_some();
        let mover = self.turn();
        let next = self.board.make_move_new(chess_move);

        if piece == Piece::Pawn || capture {
            self.halfmove_clock = 0;
            self.history.clear();
        } else {
            self.halfmove_clock += 1;
        }
        if mover == Seat::Black {
            self.fullmove_number += 1;
        }

        self.history.push(next.get_hash());
        self.board = next;

        Ok(())
    }

    fn status(&self) -> GameStatus {
        match self.board.status() {
            BoardStatus::Checkmate => GameStatus::Checkmate {
                winner: self.turn().opponent(),
            },
            BoardStatus::Stalemate => GameStatus::Draw(DrawReason::Stalemate),
            BoardStatus::Ongoing => {
                if insufficient_material(&self.board) {
                    GameStatus::Draw(DrawReason::InsufficientMaterial)
                } else if self.halfmove_clock >= 100 {
                    GameStatus::Draw(DrawReason::FiftyMoveRule)
                } else if self.repetitions() >= 3 {
                    GameStatus::Draw(DrawReason::ThreefoldRepetition)
                } else {
                    GameStatus::Ongoing
                }
            }
        }
    }

    fn reset(&mut self) {
        *self = StandardRules::new();
    }
}

/// K v K, K+minor v K, or kings plus bishops all on one square colour.
fn insufficient_material(board: &Board) -> bool {
    let heavy = *board.pieces(Piece::Pawn) | *board.pieces(Piece::Rook) | *board.pieces(Piece::Queen);
    if heavy.popcnt() > 0 {
        return false;
    }

    let knights = board.pieces(Piece::Knight).popcnt();
    let bishops = *board.pieces(Piece::Bishop);
    if knights + bishops.popcnt() <= 1 {
        return true;
    }
    if knights > 0 {
        return false;
    }

    let mut shades = bishops.map(|sq| (sq.get_rank().to_index() + sq.get_file().to_index()) % 2);
    let first = shades.next();
    shades.all(|shade| Some(shade) == first)
}
