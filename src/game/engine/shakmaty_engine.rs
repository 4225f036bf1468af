//! [`MoveEngine`] backed by the `shakmaty` rules library
//!
//! Converts between the controller's tagged records and shakmaty's types.
//! Shakmaty encodes castling as "king takes own rook"; this adapter reports
//! castles with the king's landing square as `to`, and en passant as a
//! capture whose captured square differs from `to`.

use super::{EngineError, MoveEngine};
use crate::game::types::{
    BoardSnapshot, CastleSide, Captured, Move, MoveClass, MoveRequest, Piece, PieceColor,
    PieceKind, Square,
};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color, Position, Role};

/// Chess rules engine wrapping a shakmaty [`Chess`] position
#[derive(Debug, Clone, Default)]
pub struct ShakmatyEngine {
    position: Chess,
}

impl ShakmatyEngine {
    /// Engine at the standard starting position
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine at an arbitrary position given as FEN
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let fen: Fen = fen.trim().parse().map_err(|e: shakmaty::fen::ParseFenError| {
            EngineError::Fen {
                message: e.to_string(),
            }
        })?;
        let position: Chess =
            fen.into_position(CastlingMode::Standard)
                .map_err(|e| EngineError::Position {
                    message: e.to_string(),
                })?;
        Ok(Self { position })
    }

    /// Converts a shakmaty move into the controller's record; drop moves
    /// (`Put`) have no meaning in standard chess and yield `None`.
    fn convert_move(&self, m: &shakmaty::Move) -> Option<Move> {
        let color = color_from_engine(self.position.turn());
        match m {
            shakmaty::Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                let to = square_from_engine(*to);
                let captured = capture.map(|role| Captured {
                    square: to,
                    kind: kind_from_role(role),
                });
                let class = if promotion.is_some() {
                    MoveClass::Promotion
                } else if captured.is_some() {
                    MoveClass::Capture
                } else {
                    MoveClass::Normal
                };
                Some(Move {
                    from: square_from_engine(*from),
                    to,
                    piece: Piece::new(kind_from_role(*role), color),
                    class,
                    promotion: promotion.map(kind_from_role),
                    captured,
                })
            }
            shakmaty::Move::EnPassant { from, to } => {
                let from = square_from_engine(*from);
                let to = square_from_engine(*to);
                Some(Move {
                    from,
                    to,
                    piece: Piece::new(PieceKind::Pawn, color),
                    class: MoveClass::Capture,
                    promotion: None,
                    captured: Some(Captured {
                        square: Square::from_coords(to.file, from.rank),
                        kind: PieceKind::Pawn,
                    }),
                })
            }
            shakmaty::Move::Castle { king, rook } => {
                let king = square_from_engine(*king);
                let rook = square_from_engine(*rook);
                let (side, class) = if rook.file > king.file {
                    (CastleSide::Kingside, MoveClass::CastleKingside)
                } else {
                    (CastleSide::Queenside, MoveClass::CastleQueenside)
                };
                Some(Move {
                    from: king,
                    to: king.with_file(side.king_file()),
                    piece: Piece::new(PieceKind::King, color),
                    class,
                    promotion: None,
                    captured: None,
                })
            }
            shakmaty::Move::Put { .. } => None,
        }
    }
}

impl MoveEngine for ShakmatyEngine {
    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position
            .board()
            .piece_at(square_to_engine(square))
            .map(|piece| Piece::new(kind_from_role(piece.role), color_from_engine(piece.color)))
    }

    fn legal_moves(&self, square: Square) -> Vec<Move> {
        self.position
            .legal_moves()
            .iter()
            .filter_map(|m| self.convert_move(m))
            .filter(|m| m.from == square)
            .collect()
    }

    fn apply_move(&mut self, request: MoveRequest) -> Result<Option<Move>, EngineError> {
        if let Some(kind) = request.promotion.filter(|kind| !kind.is_promotion_choice()) {
            return Err(EngineError::InvalidPromotion { kind });
        }

        let found = self.position.legal_moves().into_iter().find_map(|m| {
            self.convert_move(&m)
                .filter(|converted| converted.matches(&request))
                .map(|converted| (m, converted))
        });
        let Some((engine_move, committed)) = found else {
            return Ok(None);
        };

        self.position.play_unchecked(engine_move);
        Ok(Some(committed))
    }

    fn is_in_check(&self) -> bool {
        self.position.is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn side_to_move(&self) -> PieceColor {
        color_from_engine(self.position.turn())
    }

    fn board_snapshot(&self) -> BoardSnapshot {
        let mut snapshot: BoardSnapshot = [[None; 8]; 8];
        for square in Square::all() {
            snapshot[square.row() as usize][square.col() as usize] = self.piece_at(square);
        }
        snapshot
    }
}

fn square_to_engine(square: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(
        shakmaty::File::new(u32::from(square.file.index())),
        shakmaty::Rank::new(u32::from(square.rank.index())),
    )
}

fn square_from_engine(square: shakmaty::Square) -> Square {
    Square::from_index_wrapping(square as u8)
}

fn kind_from_role(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn color_from_engine(color: Color) -> PieceColor {
    match color {
        Color::White => PieceColor::White,
        Color::Black => PieceColor::Black,
    }
}
