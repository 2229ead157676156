use serde::{Deserialize, Serialize};
use std::fmt;

/// The two sides of a game.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row holding this color's king and rooks at the start.
    pub fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row delta of a forward pawn step. White moves towards row 0.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn promotion_row(self) -> u8 {
        self.opponent().home_row()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    fn fen_letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// Pieces a pawn may turn into on the far rank.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Promotion {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl From<Promotion> for PieceKind {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Knight => PieceKind::Knight,
        }
    }
}

impl TryFrom<PieceKind> for Promotion {
    type Error = PieceKind;

    fn try_from(kind: PieceKind) -> Result<Self, Self::Error> {
        match kind {
            PieceKind::Queen => Ok(Promotion::Queen),
            PieceKind::Rook => Ok(Promotion::Rook),
            PieceKind::Bishop => Ok(Promotion::Bishop),
            PieceKind::Knight => Ok(Promotion::Knight),
            other => Err(other),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Uppercase for white, lowercase for black.
    pub fn fen_char(self) -> char {
        let letter = self.kind.fen_letter();
        match self.color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }
}

/// A square on the board. Row 0 is black's back rank, row 7 is white's.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Position { row, col }
    }

    pub fn is_valid(self) -> bool {
        self.row < 8 && self.col < 8
    }

    /// Shift by a signed delta, `None` when it leaves the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Position> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Position::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Every square, row by row.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Position {
    /// Algebraic square name, e.g. row 6 col 4 is `e2`. Off-board
    /// positions print as raw `row,col`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "{},{}", self.row, self.col);
        }
        let file = (b'a' + self.col) as char;
        let rank = 8 - self.row;
        write!(f, "{}{}", file, rank)
    }
}

/// Fixed 8x8 grid, indexed `[row][col]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Board([[Option<Piece>; 8]; 8]);

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    pub fn empty() -> Self {
        Board([[None; 8]; 8])
    }

    /// Standard starting position.
    pub fn initial() -> Self {
        let mut board = Board::empty();
        for col in 0..8u8 {
            let kind = BACK_RANK[col as usize];
            board.set(Position::new(0, col), Some(Piece::new(kind, Color::Black)));
            board.set(Position::new(1, col), Some(Piece::new(PieceKind::Pawn, Color::Black)));
            board.set(Position::new(6, col), Some(Piece::new(PieceKind::Pawn, Color::White)));
            board.set(Position::new(7, col), Some(Piece::new(kind, Color::White)));
        }
        board
    }

    /// Piece on `pos`; off-board squares read as empty.
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        self.0[pos.row as usize][pos.col as usize]
    }

    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.0[pos.row as usize][pos.col as usize] = piece;
    }

    pub fn take(&mut self, pos: Position) -> Option<Piece> {
        self.0[pos.row as usize][pos.col as usize].take()
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Occupied squares with their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }

    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(pos, _)| pos)
    }

    /// True when every square strictly between `from` and `to` is empty.
    /// Only meaningful for squares sharing a row, column or diagonal.
    pub fn is_path_clear(&self, from: Position, to: Position) -> bool {
        let d_row = (to.row as i8 - from.row as i8).signum();
        let d_col = (to.col as i8 - from.col as i8).signum();
        let mut current = from;
        loop {
            current = match current.offset(d_row, d_col) {
                Some(next) => next,
                None => return false,
            };
            if current == to {
                return true;
            }
            if !self.is_empty_at(current) {
                return false;
            }
        }
    }

    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.0
    }
}
