use serde::{Deserialize, Serialize};

use super::board::{Board, Color, Piece, PieceKind, Position};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CastlingSide {
    Kingside,
    Queenside,
}

impl CastlingSide {
    /// Column the rook starts on.
    pub fn rook_col(self) -> u8 {
        match self {
            CastlingSide::Kingside => 7,
            CastlingSide::Queenside => 0,
        }
    }

    /// Column the rook lands on after castling.
    pub fn rook_target_col(self) -> u8 {
        match self {
            CastlingSide::Kingside => 5,
            CastlingSide::Queenside => 3,
        }
    }

    pub fn king_target_col(self) -> u8 {
        match self {
            CastlingSide::Kingside => 6,
            CastlingSide::Queenside => 2,
        }
    }

    /// Side implied by a two-column king move.
    pub fn from_king_move(from: Position, to: Position) -> CastlingSide {
        if to.col > from.col {
            CastlingSide::Kingside
        } else {
            CastlingSide::Queenside
        }
    }
}

/// Which of one color's castling pieces have left home.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub struct SideRights {
    pub king_moved: bool,
    pub kingside_rook_moved: bool,
    pub queenside_rook_moved: bool,
}

/// Castling-rights flags for both colors. Flags only ever go from
/// `false` to `true`; there is no way to clear one.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    white: SideRights,
    black: SideRights,
}

impl CastlingRights {
    pub fn side(&self, color: Color) -> SideRights {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    fn side_mut(&mut self, color: Color) -> &mut SideRights {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    pub fn king_moved(&self, color: Color) -> bool {
        self.side(color).king_moved
    }

    pub fn rook_moved(&self, color: Color, side: CastlingSide) -> bool {
        let rights = self.side(color);
        match side {
            CastlingSide::Kingside => rights.kingside_rook_moved,
            CastlingSide::Queenside => rights.queenside_rook_moved,
        }
    }

    pub fn mark_king_moved(&mut self, color: Color) {
        self.side_mut(color).king_moved = true;
    }

    pub fn mark_rook_moved(&mut self, color: Color, side: CastlingSide) {
        let rights = self.side_mut(color);
        match side {
            CastlingSide::Kingside => rights.kingside_rook_moved = true,
            CastlingSide::Queenside => rights.queenside_rook_moved = true,
        }
    }

    /// Rook flag tied to a corner square, if `pos` is one.
    pub fn corner(pos: Position) -> Option<(Color, CastlingSide)> {
        let color = match pos.row {
            7 => Color::White,
            0 => Color::Black,
            _ => return None,
        };
        match pos.col {
            7 => Some((color, CastlingSide::Kingside)),
            0 => Some((color, CastlingSide::Queenside)),
            _ => None,
        }
    }
}

/// One applied half-move. Never edited once pushed to the history.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
    /// The mover as it stood before the move (a pawn, for promotions).
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub is_en_passant: bool,
    pub is_castling: bool,
    pub promotion: Option<PieceKind>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    White,
    Black,
    Draw,
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Winner::White,
            Color::Black => Winner::Black,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameOverReason {
    Checkmate,
    Stalemate,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: Winner,
    pub reason: GameOverReason,
}

/// Immutable snapshot of a game. Every transition builds a new one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub current_turn: Color,
    pub move_history: Vec<MoveRecord>,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub castling: CastlingRights,
    pub en_passant_target: Option<Position>,
}

impl GameState {
    /// Starting position, white to move, all rights intact.
    pub fn initial() -> Self {
        GameState::from_board(Board::initial(), Color::White)
    }

    /// A state over an arbitrary board with nothing consumed and no history.
    /// The check/mate flags are left false; callers that need them run the
    /// detectors themselves.
    pub fn from_board(board: Board, current_turn: Color) -> Self {
        GameState {
            board,
            current_turn,
            move_history: Vec::new(),
            is_check: false,
            is_checkmate: false,
            is_stalemate: false,
            castling: CastlingRights::default(),
            en_passant_target: None,
        }
    }

    /// Winner and reason once the game has ended.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.is_checkmate {
            Some(GameOutcome {
                winner: self.current_turn.opponent().into(),
                reason: GameOverReason::Checkmate,
            })
        } else if self.is_stalemate {
            Some(GameOutcome {
                winner: Winner::Draw,
                reason: GameOverReason::Stalemate,
            })
        } else {
            None
        }
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.move_history.last()
    }
}

/// Standard starting state.
pub fn initial_state() -> GameState {
    GameState::initial()
}
