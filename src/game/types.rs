//! Type definitions for the board controller
//!
//! Tagged records for squares, pieces and moves. Everything the engine hands
//! back is converted into these types at the boundary, so the rest of the
//! controller never inspects loosely-typed engine data.
//!
//! # Coordinates
//!
//! - `file`: 0 (file 'a') to 7 (file 'h')
//! - `rank`: 0 (rank 1) to 7 (rank 8)
//! - `row`: screen row, 0 at the top of the board (rank 8)

use crate::game::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board coordinate representing a file (column) on the chessboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct File(u8);

impl File {
    pub const A: File = File(0);
    pub const C: File = File(2);
    pub const D: File = File(3);
    pub const F: File = File(5);
    pub const G: File = File(6);
    pub const H: File = File(7);

    pub fn new(index: u8) -> Option<Self> {
        (index < 8).then_some(File(index))
    }

    /// Create a file from a character ('a'..='h')
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board coordinate representing a rank (row) on the chessboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(u8);

impl Rank {
    pub const FIRST: Rank = Rank(0);
    pub const EIGHTH: Rank = Rank(7);

    pub fn new(index: u8) -> Option<Self> {
        (index < 8).then_some(Rank(index))
    }

    /// Create a rank from its printed number (1-8)
    pub fn from_number(n: u8) -> Option<Self> {
        (1..=8).contains(&n).then(|| Rank(n - 1))
    }

    pub fn to_number(self) -> u8 {
        self.0 + 1
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board square position (file, rank)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub file: File,
    pub rank: Rank,
}

impl Square {
    /// Create a square from file and rank indices (both 0-7)
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        Some(Square {
            file: File::new(file)?,
            rank: Rank::new(rank)?,
        })
    }

    pub fn from_coords(file: File, rank: Rank) -> Self {
        Square { file, rank }
    }

    /// Create a square from a linear index where a1 = 0 and h8 = 63
    pub fn from_index(index: u8) -> Option<Self> {
        Square::new(index % 8, index / 8).filter(|_| index < 64)
    }

    /// Total variant of [`Square::from_index`]; only the low six bits are used
    pub fn from_index_wrapping(index: u8) -> Self {
        Square {
            file: File(index & 7),
            rank: Rank((index >> 3) & 7),
        }
    }

    pub fn index(self) -> usize {
        self.rank.index() as usize * 8 + self.file.index() as usize
    }

    /// Create a square from screen coordinates (row 0 = rank 8, col 0 = file a)
    pub fn from_row_col(row: u8, col: u8) -> Option<Self> {
        if row > 7 {
            return None;
        }
        Square::new(col, 7 - row)
    }

    pub fn row(self) -> u8 {
        7 - self.rank.index()
    }

    pub fn col(self) -> u8 {
        self.file.index()
    }

    /// Same file, rank shifted by `delta`; `None` when it leaves the board
    pub fn offset_rank(self, delta: i8) -> Option<Self> {
        let rank = self.rank.index() as i8 + delta;
        if !(0..8).contains(&rank) {
            return None;
        }
        Square::new(self.file.index(), rank as u8)
    }

    pub fn with_file(self, file: File) -> Self {
        Square { file, rank: self.rank }
    }

    /// All 64 squares, a1 first
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).filter_map(Square::from_index)
    }

    pub fn to_algebraic(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file.to_char(), self.rank.to_number())
    }
}

impl FromStr for Square {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidSquare {
            notation: s.to_string(),
        };
        let mut chars = s.trim().chars();
        let file = chars.next().and_then(File::from_char).ok_or_else(invalid)?;
        let rank = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .and_then(|n| Rank::from_number(n as u8))
            .ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }
        Ok(Square { file, rank })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Rank a pawn of this color promotes on
    pub fn promotion_rank(self) -> Rank {
        match self {
            PieceColor::White => Rank::EIGHTH,
            PieceColor::Black => Rank::FIRST,
        }
    }

    /// Rank the king and rooks start on
    pub fn back_rank(self) -> Rank {
        self.opposite().promotion_rank()
    }

    pub fn prefix(self) -> char {
        match self {
            PieceColor::White => 'w',
            PieceColor::Black => 'b',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may promote to, in chooser order
    pub const PROMOTION_CHOICES: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn is_promotion_choice(self) -> bool {
        Self::PROMOTION_CHOICES.contains(&self)
    }

    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Piece { kind, color }
    }

    /// Texture key used by the presentation layer, e.g. `wq` or `bp`
    pub fn texture_key(self) -> String {
        format!("{}{}", self.color.prefix(), self.kind.letter())
    }

    /// Single-character board glyph, uppercase for white
    pub fn glyph(self) -> char {
        match self.color {
            PieceColor::White => self.kind.letter().to_ascii_uppercase(),
            PieceColor::Black => self.kind.letter(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// File the king lands on
    pub fn king_file(self) -> File {
        match self {
            CastleSide::Kingside => File::G,
            CastleSide::Queenside => File::C,
        }
    }

    /// Fixed origin file of the castling rook
    pub fn rook_origin_file(self) -> File {
        match self {
            CastleSide::Kingside => File::H,
            CastleSide::Queenside => File::A,
        }
    }

    /// Fixed destination file of the castling rook
    pub fn rook_target_file(self) -> File {
        match self {
            CastleSide::Kingside => File::F,
            CastleSide::Queenside => File::D,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveClass {
    Normal,
    Capture,
    CastleKingside,
    CastleQueenside,
    Promotion,
}

impl MoveClass {
    pub fn castle_side(self) -> Option<CastleSide> {
        match self {
            MoveClass::CastleKingside => Some(CastleSide::Kingside),
            MoveClass::CastleQueenside => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}

/// A piece removed by a move, and where it stood
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captured {
    pub square: Square,
    pub kind: PieceKind,
}

/// A move committed (or offered) by the engine
///
/// `to` is always the moving piece's destination; for castling that is the
/// king's landing square, never the rook's. A promotion that also captures is
/// classified as `Promotion` with `captured` set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub class: MoveClass,
    pub promotion: Option<PieceKind>,
    pub captured: Option<Captured>,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_castle(&self) -> bool {
        self.class.castle_side().is_some()
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Whether this move answers the given request
    pub fn matches(&self, request: &MoveRequest) -> bool {
        self.from == request.from && self.to == request.to && self.promotion == request.promotion
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            MoveClass::CastleKingside => write!(f, "O-O"),
            MoveClass::CastleQueenside => write!(f, "O-O-O"),
            _ => {
                let sep = if self.is_capture() { 'x' } else { '-' };
                write!(f, "{}{}{}", self.from, sep, self.to)?;
                if let Some(kind) = self.promotion {
                    write!(f, "={}", kind.letter().to_ascii_uppercase())?;
                }
                Ok(())
            }
        }
    }
}

/// What the controller asks the engine to play
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square) -> Self {
        MoveRequest {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        MoveRequest {
            from,
            to,
            promotion: Some(kind),
        }
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

/// 8×8 board matrix, row 0 = rank 8
pub type BoardSnapshot = [[Option<Piece>; 8]; 8];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_to_char() {
        assert_eq!(File::A.to_char(), 'a');
        assert_eq!(File::new(4).map(File::to_char), Some('e'));
        assert_eq!(File::H.to_char(), 'h');
        assert_eq!(File::new(8), None);
    }

    #[test]
    fn test_rank_from_number() {
        assert_eq!(Rank::from_number(1), Some(Rank::FIRST));
        assert_eq!(Rank::from_number(8), Some(Rank::EIGHTH));
        assert_eq!(Rank::from_number(0), None);
        assert_eq!(Rank::from_number(9), None);
    }

    #[test]
    fn test_square_algebraic() {
        let square: Square = "e4".parse().unwrap();
        assert_eq!(square.file.index(), 4);
        assert_eq!(square.rank.index(), 3);
        assert_eq!(square.to_algebraic(), "e4");

        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
    }

    #[test]
    fn test_rank_eight_is_row_zero() {
        let a8: Square = "a8".parse().unwrap();
        assert_eq!((a8.row(), a8.col()), (0, 0));
        let h1: Square = "h1".parse().unwrap();
        assert_eq!((h1.row(), h1.col()), (7, 7));
        assert_eq!(Square::from_row_col(0, 0), Some(a8));
        assert_eq!(Square::from_row_col(8, 0), None);
    }

    #[test]
    fn test_square_index() {
        assert_eq!(Square::from_index(0).map(Square::to_algebraic).as_deref(), Some("a1"));
        assert_eq!(Square::from_index(63).map(Square::to_algebraic).as_deref(), Some("h8"));
        assert_eq!(Square::from_index(64), None);
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn test_texture_keys() {
        assert_eq!(Piece::new(PieceKind::Queen, PieceColor::White).texture_key(), "wq");
        assert_eq!(Piece::new(PieceKind::Knight, PieceColor::Black).texture_key(), "bn");
    }

    #[test]
    fn test_promotion_choices_exclude_pawn_and_king() {
        assert!(PieceKind::Queen.is_promotion_choice());
        assert!(PieceKind::Knight.is_promotion_choice());
        assert!(!PieceKind::Pawn.is_promotion_choice());
        assert!(!PieceKind::King.is_promotion_choice());
    }

    #[test]
    fn test_castle_files() {
        assert_eq!(CastleSide::Kingside.rook_origin_file(), File::H);
        assert_eq!(CastleSide::Kingside.rook_target_file(), File::F);
        assert_eq!(CastleSide::Queenside.rook_origin_file(), File::A);
        assert_eq!(CastleSide::Queenside.rook_target_file(), File::D);
    }
}
