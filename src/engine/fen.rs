use super::board::{Color, Piece, PieceKind, Position};
use super::state::{CastlingSide, GameState};

impl GameState {
    /// Forsyth-Edwards notation for the current position.
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for (index, row) in self.board.rows().iter().enumerate() {
            if index > 0 {
                placement.push('/');
            }
            let mut empty = 0;
            for square in row {
                match square {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
        }

        let side = match self.current_turn {
            Color::White => "w",
            Color::Black => "b",
        };

        let en_passant = self
            .en_passant_target
            .map(|target| target.to_string())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{} {} {} {} {} {}",
            placement,
            side,
            self.castling_field(),
            en_passant,
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }

    fn castling_field(&self) -> String {
        let mut field = String::new();
        for color in [Color::White, Color::Black] {
            for side in [CastlingSide::Kingside, CastlingSide::Queenside] {
                if self.castling_available(color, side) {
                    let letter = match side {
                        CastlingSide::Kingside => 'k',
                        CastlingSide::Queenside => 'q',
                    };
                    field.push(match color {
                        Color::White => letter.to_ascii_uppercase(),
                        Color::Black => letter,
                    });
                }
            }
        }
        if field.is_empty() {
            field.push('-');
        }
        field
    }

    /// Rights are intact and both pieces still stand at home. Says nothing
    /// about whether castling is playable right now.
    fn castling_available(&self, color: Color, side: CastlingSide) -> bool {
        let row = color.home_row();
        !self.castling.king_moved(color)
            && !self.castling.rook_moved(color, side)
            && self.board.get(Position::new(row, 4)) == Some(Piece::new(PieceKind::King, color))
            && self.board.get(Position::new(row, side.rook_col()))
                == Some(Piece::new(PieceKind::Rook, color))
    }

    /// Half-moves since the last pawn move or capture.
    fn halfmove_clock(&self) -> usize {
        self.move_history
            .iter()
            .rev()
            .take_while(|record| record.piece.kind != PieceKind::Pawn && record.captured.is_none())
            .count()
    }

    fn fullmove_number(&self) -> usize {
        1 + self
            .move_history
            .iter()
            .filter(|record| record.piece.color == Color::Black)
            .count()
    }
}
